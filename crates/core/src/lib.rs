//! Core rendering module - pure, deterministic, and testable
//!
//! This crate holds everything about the engine that does not touch the
//! terminal: the viewport buffer, the rasterizer, collision predicates, the
//! debug overlay rows, layout/fit arithmetic and frame pacing bookkeeping.
//!
//! # Module Structure
//!
//! - [`viewport`]: double-width cell grid with clipped pixel/point writes
//! - [`raster`]: Bresenham lines, midpoint-style circles, rectangles, text
//! - [`collision`]: point/rectangle/circle predicates
//! - [`debug`]: grow-on-demand debug panel rows
//! - [`layout`]: surface layout and the window fit check
//! - [`pacing`]: frame pacer and wrapping frame counter
//! - [`config`]: initial engine configuration
//! - [`error`]: engine error type
//!
//! # Example
//!
//! ```
//! use termgrid_core::{Ink, ViewportBuffer};
//! use termgrid_core::types::Color;
//!
//! let mut vp = ViewportBuffer::new(20, 10).unwrap();
//! vp.draw_rectangle(0, 0, 20, 10, false, Ink::plain('#'));
//! vp.draw_circle(10, 5, 3, true, Ink::new('o', Color::Red));
//! vp.draw_text(2, 1, "hello", false, Color::Default);
//!
//! assert!(vp.filled_count() > 0);
//! vp.clear();
//! assert_eq!(vp.filled_count(), 0);
//! ```

pub mod collision;
pub mod config;
pub mod debug;
pub mod error;
pub mod layout;
pub mod pacing;
pub mod raster;
pub mod viewport;

pub use termgrid_types as types;

pub use collision::{circles_overlap, point_in_circle, point_in_rect, rects_overlap};
pub use config::EngineConfig;
pub use debug::{DebugOverlay, DebugRow, MAX_DEBUG_LINE};
pub use error::EngineError;
pub use layout::Layout;
pub use pacing::{FrameCounter, FramePacer};
pub use raster::{circle_points, line_points, LineWalk};
pub use viewport::{Cell, Ink, InkRun, ViewportBuffer};
