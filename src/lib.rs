//! termgrid (workspace facade crate).
//!
//! Re-exports the engine crates under one roof: `termgrid::{types, core, term, input}`.
//! The implementation lives in dedicated crates under `crates/`.

pub use termgrid_core as core;
pub use termgrid_input as input;
pub use termgrid_term as term;
pub use termgrid_types as types;
