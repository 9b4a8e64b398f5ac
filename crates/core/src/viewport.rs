//! Viewport buffer: the double-width cell grid every draw call writes into.

use crate::error::EngineError;
use crate::types::{Color, CELLS_PER_POINT};

/// A character and the color it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ink {
    pub ch: char,
    pub color: Color,
}

impl Ink {
    pub const fn new(ch: char, color: Color) -> Self {
        Self { ch, color }
    }

    /// Ink in the terminal's default color.
    pub const fn plain(ch: char) -> Self {
        Self {
            ch,
            color: Color::Default,
        }
    }
}

/// A single backing cell.
///
/// `Empty` is "no ink" and is never flushed to the terminal. A filled cell
/// holding `' '` is real ink and overwrites whatever is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Ink),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn ink(&self) -> Option<Ink> {
        match self {
            Cell::Empty => None,
            Cell::Filled(ink) => Some(*ink),
        }
    }
}

/// A horizontal run of filled cells sharing one color.
#[derive(Debug, Clone, Copy)]
pub struct InkRun<'a> {
    pub col: u16,
    pub row: u16,
    pub color: Color,
    cells: &'a [Cell],
}

impl<'a> InkRun<'a> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + 'a {
        let cells: &'a [Cell] = self.cells;
        cells.iter().filter_map(|c| c.ink()).map(|ink| ink.ch)
    }
}

/// Grid of `width × height` points backed by `2·width × height` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl ViewportBuffer {
    pub fn new(width: u16, height: u16) -> Result<Self, EngineError> {
        let mut buffer = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        };
        buffer.configure(width, height)?;
        Ok(buffer)
    }

    /// (Re)allocate the grid for `width × height` points, all cells empty.
    ///
    /// On error the buffer keeps its previous size and contents.
    pub fn configure(&mut self, width: u16, height: u16) -> Result<(), EngineError> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * CELLS_PER_POINT * height as usize, Cell::Empty);
        Ok(())
    }

    /// Width in points.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in points (and in cells).
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Width in backing cells.
    pub fn pixel_width(&self) -> usize {
        self.width as usize * CELLS_PER_POINT
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    #[inline(always)]
    fn idx(&self, px: i32, py: i32) -> Option<usize> {
        if px < 0 || py < 0 {
            return None;
        }
        let (px, py) = (px as usize, py as usize);
        if px >= self.pixel_width() || py >= self.height as usize {
            return None;
        }
        Some(py * self.pixel_width() + px)
    }

    /// Read a backing cell at pixel coordinates.
    pub fn pixel(&self, px: i32, py: i32) -> Option<Cell> {
        self.idx(px, py).map(|i| self.cells[i])
    }

    /// Read the left cell of a point.
    pub fn point(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || x >= self.width as i32 {
            return None;
        }
        self.pixel(x * CELLS_PER_POINT as i32, y)
    }

    /// Write one backing cell at pixel coordinates.
    ///
    /// Callers must account for the doubled horizontal resolution. Writes
    /// outside the grid are dropped.
    #[inline]
    pub fn draw_pixel(&mut self, px: i32, py: i32, ink: Ink) {
        if let Some(i) = self.idx(px, py) {
            self.cells[i] = Cell::Filled(ink);
        }
    }

    /// Write both cells of the point `(x, y)`. Writes outside the grid are dropped.
    #[inline]
    pub fn draw_point(&mut self, x: i32, y: i32, ink: Ink) {
        if x < 0 || x >= self.width as i32 {
            return;
        }
        if let Some(i) = self.idx(x * CELLS_PER_POINT as i32, y) {
            self.cells[i..i + CELLS_PER_POINT].fill(Cell::Filled(ink));
        }
    }

    /// Visit every run of same-colored ink, row by row, left to right.
    pub fn for_each_ink_run<E>(
        &self,
        mut f: impl FnMut(InkRun<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        let w = self.pixel_width();
        if w == 0 {
            return Ok(());
        }

        for (y, row) in self.cells.chunks_exact(w).enumerate() {
            let mut x = 0;
            while x < w {
                let Some(ink) = row[x].ink() else {
                    x += 1;
                    continue;
                };

                let start = x;
                x += 1;
                while x < w {
                    match row[x].ink() {
                        Some(next) if next.color == ink.color => x += 1,
                        _ => break,
                    }
                }
                f(InkRun {
                    col: start as u16,
                    row: y as u16,
                    color: ink.color,
                    cells: &row[start..x],
                })?;
            }
        }

        Ok(())
    }
}

fn validate_dimensions(width: u16, height: u16) -> Result<(), EngineError> {
    let max_width = u16::MAX / CELLS_PER_POINT as u16;
    if width == 0 || height == 0 || width > max_width {
        return Err(EngineError::InvalidDimension { width, height });
    }
    Ok(())
}
