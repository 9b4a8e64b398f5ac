//! Engine error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Width or height is zero, or the doubled width does not fit in a terminal column index.
    #[error("invalid viewport dimension {width}x{height}")]
    InvalidDimension { width: u16, height: u16 },

    #[error("viewport is not configured")]
    NotConfigured,

    #[error("operation `{op}` is not allowed while the engine is {state}")]
    InvalidState { op: &'static str, state: &'static str },

    #[error("debug line {line} is past the last panel row {max}")]
    DebugLineOutOfRange { line: usize, max: usize },

    #[error("terminal window {cols}x{rows} is smaller than the required {required_cols}x{required_rows}")]
    WindowTooSmall {
        cols: u16,
        rows: u16,
        required_cols: u16,
        required_rows: u16,
    },
}
