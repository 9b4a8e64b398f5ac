//! Engine configuration applied at initialization.

use crate::types::DEFAULT_TARGET_FPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Target frame rate; `0` renders as fast as possible.
    pub target_fps: u16,
    pub border: bool,
    /// Request color. Ignored when the terminal cannot show it.
    pub color: bool,
    /// Show the debug panel.
    pub debug: bool,
    /// Initial number of debug panel rows.
    pub debug_height: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            border: false,
            color: false,
            debug: false,
            debug_height: 0,
        }
    }
}

impl EngineConfig {
    pub fn with_target_fps(mut self, fps: u16) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_debug_height(mut self, rows: usize) -> Self {
        self.debug_height = rows;
        self
    }
}
