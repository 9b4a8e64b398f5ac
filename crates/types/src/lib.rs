//! Core types module - shared value types and constants
//!
//! Everything here is plain data with no behavior beyond construction and
//! simple accessors, so it can be used from the rasterizer, the collision
//! predicates and the terminal layer alike.
//!
//! # Coordinate convention
//!
//! - A **point** is one logical drawable unit. It covers two horizontally
//!   adjacent terminal cells so that points look roughly square.
//! - A **pixel** is one raw terminal cell (half of a point).
//!
//! All geometry types use signed integer coordinates. Negative or oversized
//! coordinates are legal; drawing clips them.
//!
//! # Engine constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CELLS_PER_POINT` | 2 | Terminal cells per logical point |
//! | `BORDER_MARGIN` | 2 | Extra cells per axis when the border is enabled |
//! | `DEFAULT_TARGET_FPS` | 12 | Frame rate used until one is configured |
//! | `FRAME_COUNTER_WRAP` | 4,000,000,001 | Frame counter returns to 0 at this value |
//!
//! # Examples
//!
//! ```
//! use termgrid_types::{Circle, Color, Rectangle, Vector2};
//!
//! let p = Vector2::new(3, 4);
//! let c = Circle::new(0, 0, 5);
//! let r = Rectangle::new(0, 0, 10, 10);
//!
//! assert_eq!(c.center(), Vector2::new(0, 0));
//! assert_eq!(r.right(), 9);
//! assert_eq!(p.x + p.y, 7);
//! assert_eq!(Color::PALETTE.len(), 8);
//! ```

/// Terminal cells per logical point.
pub const CELLS_PER_POINT: usize = 2;

/// Cells added on each axis when the viewport border is enabled.
pub const BORDER_MARGIN: u16 = 2;

/// Target frame rate used until the caller configures one.
pub const DEFAULT_TARGET_FPS: u16 = 12;

/// The frame counter wraps back to 0 when it reaches this value.
pub const FRAME_COUNTER_WRAP: u64 = 4_000_000_001;


/// Integer 2D vector (a point position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Vector2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Circle given by its center and radius, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Circle {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
}

impl Circle {
    pub const fn new(x: i32, y: i32, radius: i32) -> Self {
        Self { x, y, radius }
    }

    pub const fn center(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// Axis-aligned rectangle covering `[x, x + width - 1] × [y, y + height - 1]`.
///
/// A rectangle occupies exactly `width × height` discrete points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn origin(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Last column covered by the rectangle (inclusive).
    pub const fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Last row covered by the rectangle (inclusive).
    pub const fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }
}

/// Foreground color of a cell.
///
/// `Default` leaves the terminal's own foreground; the other eight are the
/// base palette registered when color is enabled:
///
/// | Color | ANSI index |
/// |-------|------------|
/// | Black | 0 |
/// | Red | 1 |
/// | Green | 2 |
/// | Yellow | 3 |
/// | Blue | 4 |
/// | Magenta | 5 |
/// | Cyan | 6 |
/// | White | 7 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// The fixed base palette, in ANSI order.
    pub const PALETTE: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// ANSI palette index, or `None` for the terminal default.
    ///
    /// # Examples
    ///
    /// ```
    /// use termgrid_types::Color;
    ///
    /// assert_eq!(Color::Red.ansi_index(), Some(1));
    /// assert_eq!(Color::Default.ansi_index(), None);
    /// ```
    pub fn ansi_index(&self) -> Option<u8> {
        match self {
            Color::Default => None,
            Color::Black => Some(0),
            Color::Red => Some(1),
            Color::Green => Some(2),
            Color::Yellow => Some(3),
            Color::Blue => Some(4),
            Color::Magenta => Some(5),
            Color::Cyan => Some(6),
            Color::White => Some(7),
        }
    }
}
