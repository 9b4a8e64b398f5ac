//! Terminal frame controller module.
//!
//! This crate connects the pure [`core`] engine pieces to a terminal. The
//! [`Engine`] owns the viewport buffer and a [`Surface`], flushes ink to it
//! once per frame and paces frames against a target rate.
//!
//! Surfaces:
//! - [`CrosstermSurface`] drives the real terminal through crossterm
//! - [`HeadlessSurface`] keeps an in-memory grid (tests, offscreen use)

pub mod engine;
pub mod headless;
pub mod renderer;
pub mod surface;

pub use termgrid_core as core;
pub use termgrid_types as types;

pub use engine::{Engine, EngineState};
pub use headless::HeadlessSurface;
pub use renderer::{encode_erase_into, encode_str_into, CrosstermSurface};
pub use surface::Surface;
