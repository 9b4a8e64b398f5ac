//! Key capture from the terminal.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Wait up to `timeout` for a key press.
///
/// Non-key events and key releases are consumed and ignored.
pub fn poll_key(timeout: Duration) -> Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Read a buffered key press without blocking.
pub fn read_key() -> Result<Option<KeyEvent>> {
    poll_key(Duration::ZERO)
}

/// Discard every pending input event. Returns how many were dropped.
pub fn flush_input() -> Result<usize> {
    let mut dropped = 0;
    while event::poll(Duration::ZERO)? {
        event::read()?;
        dropped += 1;
    }
    Ok(dropped)
}

/// Check if key should quit the application.
pub fn is_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
