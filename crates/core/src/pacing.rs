//! Frame pacing and the frame counter.
//!
//! The pacer is pure bookkeeping over [`Instant`]s; the caller does the
//! actual sleep. This keeps it deterministic under test.

use std::time::{Duration, Instant};

use crate::types::{DEFAULT_TARGET_FPS, FRAME_COUNTER_WRAP};

/// Frame counter that returns to 0 when it reaches [`FRAME_COUNTER_WRAP`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCounter(u64);

impl FrameCounter {
    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn advance(&mut self) -> u64 {
        self.0 += 1;
        if self.0 >= FRAME_COUNTER_WRAP {
            self.0 = 0;
        }
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct FramePacer {
    target_fps: u16,
    epoch: Instant,
    frame_start: Instant,
    last_frame: Option<Duration>,
}

impl FramePacer {
    pub fn new(target_fps: u16) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    pub fn starting_at(target_fps: u16, now: Instant) -> Self {
        Self {
            target_fps,
            epoch: now,
            frame_start: now,
            last_frame: None,
        }
    }

    pub fn target_fps(&self) -> u16 {
        self.target_fps
    }

    /// Set the target rate. `0` disables pacing.
    pub fn set_target_fps(&mut self, fps: u16) {
        self.target_fps = fps;
    }

    /// Frame period implied by the target rate, `None` when uncapped.
    pub fn period(&self) -> Option<Duration> {
        match self.target_fps {
            0 => None,
            fps => Some(Duration::from_secs(1) / fps as u32),
        }
    }

    /// Time left in the current frame at `now`. Zero when already past due.
    pub fn remaining(&self, now: Instant) -> Duration {
        let Some(period) = self.period() else {
            return Duration::ZERO;
        };
        period.saturating_sub(now.saturating_duration_since(self.frame_start))
    }

    /// Close the current frame and start the next one at `now`.
    pub fn start_frame(&mut self, now: Instant) {
        self.last_frame = Some(now.saturating_duration_since(self.frame_start));
        self.frame_start = now;
    }

    /// Measured rate of the last completed frame.
    pub fn current_fps(&self) -> f64 {
        match self.last_frame {
            Some(d) if !d.is_zero() => 1.0 / d.as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Time since the pacer was created.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.epoch)
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_wraps_to_zero() {
        let mut counter = FrameCounter(FRAME_COUNTER_WRAP - 2);
        assert_eq!(counter.advance(), FRAME_COUNTER_WRAP - 1);
        assert_eq!(counter.advance(), 0);
        assert_eq!(counter.advance(), 1);
    }

    #[test]
    fn period_from_target_rate() {
        let pacer = FramePacer::new(10);
        assert_eq!(pacer.period(), Some(Duration::from_millis(100)));
        assert_eq!(FramePacer::new(0).period(), None);
        assert_eq!(FramePacer::default().target_fps(), DEFAULT_TARGET_FPS);
    }

    #[test]
    fn remaining_counts_down_and_clamps_at_zero() {
        let t0 = Instant::now();
        let pacer = FramePacer::starting_at(10, t0);
        assert_eq!(pacer.remaining(t0), Duration::from_millis(100));
        assert_eq!(
            pacer.remaining(t0 + Duration::from_millis(30)),
            Duration::from_millis(70)
        );
        assert_eq!(pacer.remaining(t0 + Duration::from_millis(250)), Duration::ZERO);
    }

    #[test]
    fn uncapped_never_waits() {
        let t0 = Instant::now();
        let pacer = FramePacer::starting_at(0, t0);
        assert_eq!(pacer.remaining(t0), Duration::ZERO);
    }

    #[test]
    fn start_frame_measures_rate() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::starting_at(10, t0);
        assert_eq!(pacer.current_fps(), 0.0);
        pacer.start_frame(t0 + Duration::from_millis(100));
        assert!((pacer.current_fps() - 10.0).abs() < 1e-9);
        assert_eq!(
            pacer.remaining(t0 + Duration::from_millis(150)),
            Duration::from_millis(50)
        );
        assert_eq!(
            pacer.elapsed(t0 + Duration::from_millis(150)),
            Duration::from_millis(150)
        );
    }
}
