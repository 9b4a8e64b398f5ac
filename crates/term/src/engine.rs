//! Engine: the frame controller that owns the viewport and the surface.
//!
//! One engine per terminal. The caller drives it strictly in sequence:
//!
//! ```text
//! initialize → configure_viewport → loop { draw …; render; clear } → shutdown
//! ```
//!
//! A terminal window smaller than the layout is fatal: the engine restores
//! the terminal, prints a diagnostic and exits the process with status 1.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, error, info, trace, warn};

use crate::core::{
    DebugOverlay, EngineConfig, EngineError, FrameCounter, FramePacer, Layout, ViewportBuffer,
};
use crate::renderer::CrosstermSurface;
use crate::surface::Surface;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Configured,
    Running,
    ShuttingDown,
    Terminated,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Configured => "configured",
            EngineState::Running => "running",
            EngineState::ShuttingDown => "shutting down",
            EngineState::Terminated => "terminated",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Engine<S: Surface = CrosstermSurface> {
    surface: S,
    config: EngineConfig,
    state: EngineState,
    viewport: Option<ViewportBuffer>,
    border: bool,
    color_enabled: bool,
    debug: DebugOverlay,
    pacer: FramePacer,
    frames: FrameCounter,
    /// Window size seen at the last fit check.
    window: Option<(u16, u16)>,
    /// Layout changed since the last fit check.
    fit_dirty: bool,
    scratch: String,
}

impl Engine<CrosstermSurface> {
    /// Initialize an engine on the real terminal.
    pub fn start(config: EngineConfig) -> Result<Self> {
        Self::with_config(CrosstermSurface::new(), config)
    }
}

impl<S: Surface> Engine<S> {
    /// Create an uninitialized engine. No terminal I/O happens until
    /// [`Engine::initialize`].
    pub fn new(surface: S, config: EngineConfig) -> Self {
        Self {
            surface,
            config,
            state: EngineState::Uninitialized,
            viewport: None,
            border: false,
            color_enabled: false,
            debug: DebugOverlay::new(),
            pacer: FramePacer::new(config.target_fps),
            frames: FrameCounter::default(),
            window: None,
            fit_dirty: true,
            scratch: String::new(),
        }
    }

    /// Create and initialize in one step.
    pub fn with_config(surface: S, config: EngineConfig) -> Result<Self> {
        let mut engine = Self::new(surface, config);
        engine.initialize()?;
        Ok(engine)
    }

    /// Acquire the terminal surface and apply the configuration.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(self.invalid("initialize").into());
        }

        self.surface.enter()?;
        let config = self.config;
        self.pacer = FramePacer::new(config.target_fps);
        self.frames = FrameCounter::default();
        self.border = config.border;
        self.debug = DebugOverlay::with_height(config.debug_height);
        if config.debug {
            self.debug.show();
        }
        self.state = EngineState::Configured;
        if config.color {
            self.enable_color();
        }

        info!(
            "engine initialized (fps={}, border={}, debug={})",
            config.target_fps, config.border, config.debug
        );
        Ok(())
    }

    /// Allocate (or reallocate) the viewport for `width × height` points.
    ///
    /// Exits the process if the window cannot host the resulting layout.
    pub fn configure_viewport(&mut self, width: u16, height: u16) -> Result<()> {
        self.require_live("configure_viewport")?;

        let old_area = self.layout().map(|layout| self.surface_area(layout));
        match self.viewport.as_mut() {
            Some(viewport) => viewport.configure(width, height)?,
            None => self.viewport = Some(ViewportBuffer::new(width, height)?),
        }
        if let Some(area) = old_area {
            self.erase_area(area)?;
        }

        info!("viewport configured: {}x{} points", width, height);
        self.fit_dirty = true;
        self.ensure_fit()
    }

    /// Surround the viewport with a border, growing the surface by the
    /// border margin on each axis.
    pub fn enable_border(&mut self) -> Result<()> {
        self.require_live("enable_border")?;
        if self.border {
            return Ok(());
        }

        if let Some(layout) = self.layout() {
            self.erase_area(self.surface_area(layout))?;
        }
        self.border = true;
        self.fit_dirty = true;
        debug!("border enabled");

        if self.viewport.is_some() {
            self.ensure_fit()?;
        }
        Ok(())
    }

    /// Turn on the base palette if the terminal supports it; otherwise stay
    /// monochrome.
    pub fn enable_color(&mut self) {
        if self.surface.supports_color() {
            self.color_enabled = true;
            debug!("color enabled ({} palette entries)", Color::PALETTE.len());
        } else {
            warn!("terminal has no color support, rendering monochrome");
        }
    }

    /// Set the target frame rate; `0` disables pacing.
    pub fn set_target_fps(&mut self, fps: u16) {
        self.pacer.set_target_fps(fps);
        debug!("target fps set to {}", fps);
    }

    /// Flush the viewport (and border/debug panel) to the terminal, then
    /// sleep out the rest of the frame period.
    pub fn render(&mut self) -> Result<()> {
        self.require_live("render")?;
        let Some(viewport) = self.viewport.as_ref() else {
            return Err(EngineError::NotConfigured.into());
        };
        let layout = self.layout_for(viewport);
        self.state = EngineState::Running;

        self.ensure_fit()?;

        if layout.border {
            let (w, h) = layout.frame_size();
            draw_border(&mut self.surface, w, h)?;
        }

        if let Some(viewport) = self.viewport.as_ref() {
            let color_enabled = self.color_enabled;
            let (ox, oy) = layout.viewport_origin();
            let surface = &mut self.surface;
            let scratch = &mut self.scratch;
            viewport.for_each_ink_run(|run| {
                scratch.clear();
                scratch.extend(run.chars());
                let color = if color_enabled {
                    run.color
                } else {
                    Color::Default
                };
                surface.put_str(
                    ox.saturating_add(run.col),
                    oy.saturating_add(run.row),
                    scratch.as_str(),
                    color,
                )
            })?;
        }

        if self.debug.is_visible() {
            let (dx, dy) = layout.debug_origin();
            let max_cols = layout.required_cols() as usize;
            for row in self.debug.rows() {
                let Ok(line) = u16::try_from(row.line) else {
                    break;
                };
                let text: String = row.display().chars().take(max_cols).collect();
                self.surface
                    .put_str(dx, dy.saturating_add(line), &text, Color::Default)?;
            }
        }

        self.surface.present()?;
        let frame = self.frames.advance();

        let wait = self.pacer.remaining(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.pacer.start_frame(Instant::now());
        trace!("frame {} presented, slept {:?}", frame, wait);
        Ok(())
    }

    /// Erase the surface area and reset every viewport cell to empty.
    pub fn clear(&mut self) -> Result<()> {
        self.require_live("clear")?;
        let Some(layout) = self.layout() else {
            return Err(EngineError::NotConfigured.into());
        };
        self.erase_area(self.surface_area(layout))?;
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.clear();
        }
        Ok(())
    }

    /// Restore the terminal and release the viewport.
    pub fn shutdown(&mut self) -> Result<()> {
        match self.state {
            EngineState::Terminated => return Ok(()),
            EngineState::Uninitialized => {
                self.state = EngineState::Terminated;
                return Ok(());
            }
            _ => {}
        }

        self.state = EngineState::ShuttingDown;
        let result = self.surface.exit();
        self.viewport = None;
        self.debug.destroy();
        self.state = EngineState::Terminated;
        info!("engine shut down after {} frames", self.frames.get());
        result
    }

    pub fn show_debug(&mut self) {
        if !self.debug.is_visible() {
            self.debug.show();
            self.fit_dirty = true;
        }
    }

    /// Hide the debug panel. Its rows are kept for the next `show_debug`.
    pub fn hide_debug(&mut self) -> Result<()> {
        if self.debug.is_visible() {
            self.erase_debug_panel()?;
            self.debug.hide();
            self.fit_dirty = true;
        }
        Ok(())
    }

    /// Write debug row `line`, growing the panel if needed.
    pub fn set_debug_attribute(
        &mut self,
        line: usize,
        title: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), EngineError> {
        if self.debug.set_attribute(line, title, value)? && self.debug.is_visible() {
            self.fit_dirty = true;
        }
        Ok(())
    }

    /// Drop all debug rows and hide the panel.
    pub fn destroy_debug(&mut self) -> Result<()> {
        self.erase_debug_panel()?;
        self.debug.destroy();
        self.fit_dirty = true;
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    pub fn target_fps(&self) -> u16 {
        self.pacer.target_fps()
    }

    /// Measured rate of the last frame.
    pub fn current_fps(&self) -> f64 {
        self.pacer.current_fps()
    }

    /// Time since the engine was initialized.
    pub fn elapsed(&self) -> Duration {
        self.pacer.elapsed(Instant::now())
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    pub fn is_color_enabled(&self) -> bool {
        self.color_enabled
    }

    pub fn debug(&self) -> &DebugOverlay {
        &self.debug
    }

    pub fn viewport(&self) -> Option<&ViewportBuffer> {
        self.viewport.as_ref()
    }

    /// The viewport to draw into.
    pub fn viewport_mut(&mut self) -> Result<&mut ViewportBuffer, EngineError> {
        self.viewport.as_mut().ok_or(EngineError::NotConfigured)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current layout, `None` until the viewport is configured.
    pub fn layout(&self) -> Option<Layout> {
        self.viewport.as_ref().map(|vp| self.layout_for(vp))
    }

    fn layout_for(&self, viewport: &ViewportBuffer) -> Layout {
        let debug_rows = if self.debug.is_visible() {
            u16::try_from(self.debug.height()).unwrap_or(u16::MAX)
        } else {
            0
        };
        Layout::new(viewport.width(), viewport.height())
            .with_border(self.border)
            .with_debug_rows(debug_rows)
    }

    /// Everything the engine may have drawn for `layout`, including hidden
    /// debug rows, as `(cols, rows)`.
    fn surface_area(&self, layout: Layout) -> (u16, u16) {
        let debug_rows = u16::try_from(self.debug.height()).unwrap_or(u16::MAX);
        (
            layout.required_cols(),
            layout.frame_size().1.saturating_add(debug_rows),
        )
    }

    /// Erase `area` at the origin, clipped to the last known window size.
    fn erase_area(&mut self, (cols, rows): (u16, u16)) -> Result<()> {
        let (max_cols, max_rows) = self.window.unwrap_or((cols, rows));
        self.surface
            .erase(0, 0, cols.min(max_cols), rows.min(max_rows))
    }

    fn erase_debug_panel(&mut self) -> Result<()> {
        let Some(layout) = self.layout() else {
            return Ok(());
        };
        let (_, top) = layout.debug_origin();
        let (cols, rows) = self.surface_area(layout);
        let (max_cols, max_rows) = self.window.unwrap_or((cols, rows));
        let bottom = rows.min(max_rows);
        self.surface
            .erase(0, top, cols.min(max_cols), bottom.saturating_sub(top))
    }

    /// Re-run the fit check when the window or the layout changed.
    fn ensure_fit(&mut self) -> Result<()> {
        let Some(layout) = self.layout() else {
            return Ok(());
        };
        let size = self.surface.window_size()?;
        if !self.fit_dirty && self.window == Some(size) {
            return Ok(());
        }

        if self.window.is_some_and(|old| old != size) {
            debug!("window resized to {}x{}", size.0, size.1);
        }
        self.window = Some(size);
        self.fit_dirty = false;

        if let Err(err) = layout.check_fit(size.0, size.1) {
            self.abort(err);
        }
        Ok(())
    }

    /// Release the terminal and end the process with status 1.
    fn abort(&mut self, err: EngineError) -> ! {
        error!("{}", err);
        self.state = EngineState::ShuttingDown;
        let _ = self.surface.exit();
        self.state = EngineState::Terminated;
        eprintln!("Exited: {}", err);
        std::process::exit(1);
    }

    fn require_live(&self, op: &'static str) -> Result<(), EngineError> {
        match self.state {
            EngineState::Configured | EngineState::Running => Ok(()),
            _ => Err(self.invalid(op)),
        }
    }

    fn invalid(&self, op: &'static str) -> EngineError {
        EngineError::InvalidState {
            op,
            state: self.state.as_str(),
        }
    }
}

impl<S: Surface> Drop for Engine<S> {
    fn drop(&mut self) {
        if matches!(self.state, EngineState::Configured | EngineState::Running) {
            let _ = self.surface.exit();
        }
    }
}

fn draw_border<S: Surface>(surface: &mut S, w: u16, h: u16) -> Result<()> {
    if w < 2 || h < 2 {
        return Ok(());
    }

    let edge = "─".repeat((w - 2) as usize);
    surface.put_str(0, 0, &format!("┌{}┐", edge), Color::Default)?;
    for y in 1..h - 1 {
        surface.put_str(0, y, "│", Color::Default)?;
        surface.put_str(w - 1, y, "│", Color::Default)?;
    }
    surface.put_str(0, h - 1, &format!("└{}┘", edge), Color::Default)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Ink;
    use crate::headless::HeadlessSurface;
    use test_log::test;

    fn engine(cols: u16, rows: u16) -> Engine<HeadlessSurface> {
        let config = EngineConfig::default().with_target_fps(0);
        Engine::with_config(HeadlessSurface::new(cols, rows), config).unwrap()
    }

    #[test]
    fn initialize_enters_surface_with_defaults() {
        let e = Engine::with_config(HeadlessSurface::new(10, 10), EngineConfig::default()).unwrap();
        assert_eq!(e.state(), EngineState::Configured);
        assert!(e.surface().is_entered());
        assert_eq!(e.target_fps(), 12);
        assert!(!e.has_border());
        assert!(!e.is_color_enabled());
        assert!(!e.debug().is_visible());
        assert_eq!(e.frame_count(), 0);
    }

    #[test]
    fn initialize_twice_is_rejected() {
        let mut e = engine(10, 10);
        let err = e.initialize().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidState { op: "initialize", .. })
        ));
    }

    #[test]
    fn render_before_configure_is_an_error() {
        let mut e = engine(10, 10);
        let err = e.render().unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::NotConfigured)
        );
        assert_eq!(e.viewport_mut().unwrap_err(), EngineError::NotConfigured);
    }

    #[test]
    fn configure_rejects_zero_size() {
        let mut e = engine(10, 10);
        let err = e.configure_viewport(0, 3).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidDimension { .. })
        ));
        assert!(e.viewport().is_none());
    }

    #[test]
    fn render_flushes_points_as_two_cells() {
        let mut e = engine(10, 5);
        e.configure_viewport(4, 3).unwrap();
        e.viewport_mut().unwrap().draw_point(1, 2, Ink::plain('#'));
        e.render().unwrap();

        assert_eq!(e.state(), EngineState::Running);
        assert_eq!(e.surface().row_text(2), "  ##      ");
        assert_eq!(e.surface().presents(), 1);
        assert_eq!(e.frame_count(), 1);
    }

    #[test]
    fn color_only_applies_when_enabled() {
        let mut e = engine(10, 5);
        e.configure_viewport(4, 3).unwrap();
        let ink = Ink::new('o', Color::Red);
        e.viewport_mut().unwrap().draw_point(0, 0, ink);
        e.render().unwrap();
        assert_eq!(e.surface().color_at(0, 0), Some(Color::Default));

        e.enable_color();
        e.render().unwrap();
        assert_eq!(e.surface().color_at(0, 0), Some(Color::Red));
    }

    #[test]
    fn monochrome_terminal_keeps_color_off() {
        let surface = HeadlessSurface::new(10, 5).monochrome();
        let config = EngineConfig::default().with_color(true);
        let e = Engine::with_config(surface, config).unwrap();
        assert!(!e.is_color_enabled());
    }

    #[test]
    fn border_offsets_viewport() {
        let mut e = engine(12, 6);
        e.configure_viewport(3, 2).unwrap();
        e.enable_border().unwrap();
        e.viewport_mut().unwrap().draw_point(0, 0, Ink::plain('@'));
        e.render().unwrap();

        let s = e.surface();
        assert_eq!(s.row_text(0), "┌──────┐    ");
        assert_eq!(s.row_text(1), "│@@    │    ");
        assert_eq!(s.row_text(3), "└──────┘    ");
    }

    #[test]
    fn clear_erases_surface_and_buffer() {
        let mut e = engine(10, 5);
        e.configure_viewport(4, 3).unwrap();
        e.viewport_mut().unwrap().draw_rectangle(0, 0, 4, 3, true, Ink::plain('x'));
        e.render().unwrap();
        e.clear().unwrap();

        assert_eq!(e.viewport().unwrap().filled_count(), 0);
        assert!(e.surface().contents().chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn debug_rows_render_under_viewport() {
        let mut e = engine(20, 8);
        e.configure_viewport(5, 2).unwrap();
        e.show_debug();
        e.set_debug_attribute(0, "frame", "1").unwrap();
        e.set_debug_attribute(2, "fps", "12").unwrap();
        e.render().unwrap();

        let s = e.surface();
        assert!(s.row_text(2).starts_with("frame: 1"));
        assert!(s.row_text(3).trim().is_empty());
        assert!(s.row_text(4).starts_with("fps: 12"));
        assert_eq!(e.layout().unwrap().required_rows(), 5);
    }

    #[test]
    fn hidden_debug_rows_are_not_rendered() {
        let mut e = engine(20, 8);
        e.configure_viewport(5, 2).unwrap();
        e.show_debug();
        e.set_debug_attribute(0, "frame", "1").unwrap();
        e.render().unwrap();
        e.hide_debug().unwrap();
        e.render().unwrap();

        assert!(e.surface().row_text(2).trim().is_empty());
        assert_eq!(e.debug().height(), 1);
        assert_eq!(e.layout().unwrap().required_rows(), 2);
    }

    #[test]
    fn resized_window_is_rechecked() {
        let mut e = engine(10, 5);
        e.configure_viewport(4, 3).unwrap();
        e.render().unwrap();
        e.surface_mut().set_window_size(40, 20);
        e.render().unwrap();
        assert_eq!(e.window, Some((40, 20)));
    }

    #[test]
    fn shutdown_releases_surface() {
        let mut e = engine(10, 5);
        e.configure_viewport(4, 3).unwrap();
        e.shutdown().unwrap();

        assert_eq!(e.state(), EngineState::Terminated);
        assert!(!e.surface().is_entered());
        assert!(e.viewport().is_none());
        assert!(e.render().is_err());
        assert!(e.shutdown().is_ok());
    }

    #[test]
    fn frame_pacing_sleeps_out_the_period() {
        let config = EngineConfig::default().with_target_fps(10);
        let mut e = Engine::with_config(HeadlessSurface::new(10, 5), config).unwrap();
        e.configure_viewport(4, 3).unwrap();
        e.render().unwrap();

        let start = Instant::now();
        e.render().unwrap();
        let took = start.elapsed();
        assert!(took >= Duration::from_millis(90), "render took {:?}", took);
        assert!(e.current_fps() > 0.0);
    }
}
