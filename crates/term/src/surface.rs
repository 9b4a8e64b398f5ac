//! The terminal surface the engine draws on.
//!
//! The engine only issues these primitive operations; everything about how
//! they reach a display lives behind the trait.

use anyhow::Result;

use crate::types::Color;

pub trait Surface {
    /// Raw, non-blocking character mode with the cursor hidden.
    fn enter(&mut self) -> Result<()>;

    /// Undo [`Surface::enter`] and show the cursor again.
    fn exit(&mut self) -> Result<()>;

    /// Current window size as `(cols, rows)`.
    fn window_size(&self) -> Result<(u16, u16)>;

    /// Whether the base palette of 8 colors can be shown.
    fn supports_color(&self) -> bool;

    /// Write `text` starting at `(col, row)` in `color`.
    fn put_str(&mut self, col: u16, row: u16, text: &str, color: Color) -> Result<()>;

    /// Blank a `cols × rows` region whose top-left corner is `(col, row)`.
    fn erase(&mut self, col: u16, row: u16, cols: u16, rows: u16) -> Result<()>;

    /// Push everything written since the last call to the display.
    fn present(&mut self) -> Result<()>;
}
