//! termgrid demo (default binary).
//!
//! Bounces a filled circle inside a bordered viewport with a debug panel
//! showing the frame counter and measured fps. Quit with `q`, `Esc` or Ctrl-C.

use anyhow::Result;

use termgrid::core::{circles_overlap, EngineConfig, Ink};
use termgrid::input::{flush_input, is_quit, read_key, KeyCode};
use termgrid::term::Engine;
use termgrid::types::{Circle, Color};

const WIDTH: u16 = 32;
const HEIGHT: u16 = 16;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = EngineConfig::default()
        .with_target_fps(24)
        .with_border(true)
        .with_color(true)
        .with_debug(true);
    let mut engine = Engine::start(config)?;

    let result = run(&mut engine);

    // Always try to restore terminal state.
    let _ = engine.shutdown();
    result
}

fn run(engine: &mut Engine) -> Result<()> {
    engine.configure_viewport(WIDTH, HEIGHT)?;

    let mut ball = Circle::new(6, 5, 3);
    let (mut vx, mut vy) = (1, 1);
    let target = Circle::new(WIDTH as i32 - 7, HEIGHT as i32 - 6, 2);
    let mut paused = false;

    loop {
        if let Some(key) = read_key()? {
            if is_quit(key) {
                return Ok(());
            }
            if key.code == KeyCode::Char(' ') {
                paused = !paused;
                flush_input()?;
            }
        }

        if !paused {
            ball.x += vx;
            ball.y += vy;
            if ball.x - ball.radius <= 0 || ball.x + ball.radius >= WIDTH as i32 - 1 {
                vx = -vx;
            }
            if ball.y - ball.radius <= 0 || ball.y + ball.radius >= HEIGHT as i32 - 1 {
                vy = -vy;
            }
        }
        let hit = circles_overlap(ball, target);

        let vp = engine.viewport_mut()?;
        vp.draw_rectangle(0, 0, WIDTH as i32, HEIGHT as i32, false, Ink::new('.', Color::Blue));
        vp.draw_circle_shape(target, false, Ink::new('o', Color::Yellow));
        let ball_color = if hit { Color::Red } else { Color::Green };
        vp.draw_circle_shape(ball, true, Ink::new('#', ball_color));
        vp.draw_line(1, HEIGHT as i32 - 2, ball.x, ball.y, Ink::new('*', Color::Cyan));
        vp.draw_text(4, 1, "termgrid  [space] pause  [q] quit", false, Color::White);

        engine.set_debug_attribute(0, "frame", engine.frame_count().to_string())?;
        engine.set_debug_attribute(1, "fps", format!("{:.1}", engine.current_fps()))?;
        engine.set_debug_attribute(2, "hit", hit.to_string())?;

        engine.render()?;
        engine.clear()?;
    }
}
