//! HeadlessSurface: an in-memory [`Surface`] for tests and offscreen use.
//!
//! Writes land in a character grid immediately; anything outside the window
//! is dropped, like on a real terminal with line wrap disabled.

use anyhow::Result;

use crate::surface::Surface;
use crate::types::Color;

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    cols: u16,
    rows: u16,
    color: bool,
    grid: Vec<(char, Color)>,
    entered: bool,
    presents: usize,
}

impl HeadlessSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            color: true,
            grid: vec![(' ', Color::Default); cols as usize * rows as usize],
            entered: false,
            presents: 0,
        }
    }

    /// Pretend the terminal has no color support.
    pub fn monochrome(mut self) -> Self {
        self.color = false;
        self
    }

    /// Simulate a window resize. Existing content is discarded.
    pub fn set_window_size(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.grid = vec![(' ', Color::Default); cols as usize * rows as usize];
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    fn idx(&self, col: u16, row: u16) -> Option<usize> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn char_at(&self, col: u16, row: u16) -> Option<char> {
        self.idx(col, row).map(|i| self.grid[i].0)
    }

    pub fn color_at(&self, col: u16, row: u16) -> Option<Color> {
        self.idx(col, row).map(|i| self.grid[i].1)
    }

    /// One window row as a string, trailing blanks included.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.char_at(col, row))
            .collect()
    }

    /// The whole window, rows joined with `'\n'`.
    pub fn contents(&self) -> String {
        (0..self.rows)
            .map(|row| self.row_text(row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for HeadlessSurface {
    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.entered = false;
        Ok(())
    }

    fn window_size(&self) -> Result<(u16, u16)> {
        Ok((self.cols, self.rows))
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn put_str(&mut self, col: u16, row: u16, text: &str, color: Color) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            let Some(c) = u16::try_from(i).ok().and_then(|i| col.checked_add(i)) else {
                break;
            };
            match self.idx(c, row) {
                Some(idx) => self.grid[idx] = (ch, color),
                None => break,
            }
        }
        Ok(())
    }

    fn erase(&mut self, col: u16, row: u16, cols: u16, rows: u16) -> Result<()> {
        for y in row..row.saturating_add(rows) {
            for x in col..col.saturating_add(cols) {
                if let Some(idx) = self.idx(x, y) {
                    self.grid[idx] = (' ', Color::Default);
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}
