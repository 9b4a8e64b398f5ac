//! Debug overlay rows: labeled key/value lines shown under the viewport.

use log::debug;

use crate::error::EngineError;

/// Highest line number a debug row may use; rows are placed on `u16`
/// terminal rows.
pub const MAX_DEBUG_LINE: usize = u16::MAX as usize - 1;

/// One row of the debug panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugRow {
    pub line: usize,
    pub title: String,
    pub value: String,
}

impl DebugRow {
    /// Text as printed in the panel.
    pub fn display(&self) -> String {
        format!("{}: {}", self.title, self.value)
    }
}

/// Row storage for the debug panel.
///
/// Rows are indexed by line number. The panel grows on demand when a row
/// past the current height is written and never shrinks on its own; rows
/// in between stay unset until written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugOverlay {
    rows: Vec<Option<DebugRow>>,
    visible: bool,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// An overlay with `height` unset rows, capped at `MAX_DEBUG_LINE + 1`.
    pub fn with_height(height: usize) -> Self {
        Self {
            rows: vec![None; height.min(MAX_DEBUG_LINE + 1)],
            visible: false,
        }
    }

    /// Number of panel rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the panel. Rows are kept.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Write row `line`, growing the panel to `line + 1` rows if needed.
    ///
    /// Returns `true` when the panel height changed. Lines past
    /// [`MAX_DEBUG_LINE`] are rejected and leave the panel untouched.
    pub fn set_attribute(
        &mut self,
        line: usize,
        title: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<bool, EngineError> {
        if line > MAX_DEBUG_LINE {
            return Err(EngineError::DebugLineOutOfRange {
                line,
                max: MAX_DEBUG_LINE,
            });
        }
        let grew = line >= self.rows.len();
        if grew {
            let height = line + 1;
            debug!("debug panel grows from {} to {} rows", self.rows.len(), height);
            self.rows.resize(height, None);
        }
        self.rows[line] = Some(DebugRow {
            line,
            title: title.into(),
            value: value.into(),
        });
        Ok(grew)
    }

    pub fn row(&self, line: usize) -> Option<&DebugRow> {
        self.rows.get(line).and_then(Option::as_ref)
    }

    /// Rows that have been written, in line order.
    pub fn rows(&self) -> impl Iterator<Item = &DebugRow> {
        self.rows.iter().flatten()
    }

    /// Drop every row and hide the panel.
    pub fn destroy(&mut self) {
        self.rows = Vec::new();
        self.visible = false;
    }
}
