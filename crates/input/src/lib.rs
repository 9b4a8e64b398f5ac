//! Terminal input module.
//!
//! A thin shim over crossterm events: non-blocking key reads, dropping
//! buffered input, and the quit-key check. Key codes are crossterm's own
//! [`KeyCode`](crossterm::event::KeyCode).

pub mod keys;

pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
pub use keys::{flush_input, is_quit, poll_key, read_key};
