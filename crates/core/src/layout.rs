//! Screen layout of the engine surface and the window fit check.
//!
//! The surface sits at the window origin:
//!
//! ```text
//! ┌────────────┐   <- border (optional, 1 cell on each side)
//! │ viewport   │      2·width cols × height rows
//! └────────────┘
//! title: value     <- debug panel rows (optional, only while visible)
//! ```

use crate::error::EngineError;
use crate::types::{BORDER_MARGIN, CELLS_PER_POINT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Viewport width in points.
    pub width: u16,
    /// Viewport height in rows.
    pub height: u16,
    pub border: bool,
    /// Debug panel rows counted towards the required area.
    pub debug_rows: u16,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            border: false,
            debug_rows: 0,
        }
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn with_debug_rows(mut self, rows: u16) -> Self {
        self.debug_rows = rows;
        self
    }

    /// Cells added on each axis by the border.
    pub fn padding(&self) -> u16 {
        if self.border {
            BORDER_MARGIN
        } else {
            0
        }
    }

    pub fn viewport_cols(&self) -> u16 {
        self.width.saturating_mul(CELLS_PER_POINT as u16)
    }

    /// Border box size: viewport plus padding, without the debug panel.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            self.viewport_cols().saturating_add(self.padding()),
            self.height.saturating_add(self.padding()),
        )
    }

    pub fn required_cols(&self) -> u16 {
        self.frame_size().0
    }

    pub fn required_rows(&self) -> u16 {
        self.frame_size().1.saturating_add(self.debug_rows)
    }

    /// Window position of viewport cell `(0, 0)`.
    pub fn viewport_origin(&self) -> (u16, u16) {
        let inset = self.padding() / 2;
        (inset, inset)
    }

    /// Window position of debug panel row 0.
    pub fn debug_origin(&self) -> (u16, u16) {
        (0, self.frame_size().1)
    }

    /// Check that a `cols × rows` window can host this layout.
    pub fn check_fit(&self, cols: u16, rows: u16) -> Result<(), EngineError> {
        if cols < self.required_cols() || rows < self.required_rows() {
            return Err(EngineError::WindowTooSmall {
                cols,
                rows,
                required_cols: self.required_cols(),
                required_rows: self.required_rows(),
            });
        }
        Ok(())
    }
}
