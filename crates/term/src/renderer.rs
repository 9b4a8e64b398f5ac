//! CrosstermSurface: a [`Surface`] on the real terminal.
//!
//! Commands are queued into a byte buffer and written with a single
//! `write_all` per [`Surface::present`], so an erase and the next frame's
//! draws reach the terminal together.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::surface::Surface;
use crate::types::Color;

pub struct CrosstermSurface {
    stdout: io::Stdout,
    buf: Vec<u8>,
    /// Foreground currently set on the terminal, `None` when unknown.
    current: Option<Color>,
}

impl CrosstermSurface {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
            current: None,
        }
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Default for CrosstermSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for CrosstermSurface {
    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        self.current = None;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn window_size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn supports_color(&self) -> bool {
        style::available_color_count() >= Color::PALETTE.len() as u16
    }

    fn put_str(&mut self, col: u16, row: u16, text: &str, color: Color) -> Result<()> {
        encode_str_into(&mut self.buf, &mut self.current, col, row, text, color)
    }

    fn erase(&mut self, col: u16, row: u16, cols: u16, rows: u16) -> Result<()> {
        encode_erase_into(&mut self.buf, &mut self.current, col, row, cols, rows)
    }

    fn present(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.flush_buf()
    }
}

/// Encode a positioned string into `out`, switching color only when needed.
pub fn encode_str_into(
    out: &mut Vec<u8>,
    current: &mut Option<Color>,
    col: u16,
    row: u16,
    text: &str,
    color: Color,
) -> Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    if *current != Some(color) {
        out.queue(SetForegroundColor(palette_color(color)))?;
        *current = Some(color);
    }
    out.queue(Print(text))?;
    Ok(())
}

/// Encode a blanked region into `out`.
pub fn encode_erase_into(
    out: &mut Vec<u8>,
    current: &mut Option<Color>,
    col: u16,
    row: u16,
    cols: u16,
    rows: u16,
) -> Result<()> {
    if cols == 0 || rows == 0 {
        return Ok(());
    }
    out.queue(ResetColor)?;
    *current = Some(Color::Default);

    let blank = " ".repeat(cols as usize);
    for dy in 0..rows {
        out.queue(cursor::MoveTo(col, row.saturating_add(dy)))?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

/// Map the base palette onto the terminal's ANSI colors 0-7.
fn palette_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
    }
}
