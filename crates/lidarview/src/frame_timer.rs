//! Rolling frame-rate measurement for the statistics overlay.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of frames averaged.
const WINDOW: usize = 60;

/// Averages frame durations over the last [`WINDOW`] frames.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: Option<Instant>,
    samples: VecDeque<Duration>,
    total: Duration,
}

impl FrameTimer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            samples: VecDeque::with_capacity(WINDOW),
            total: Duration::ZERO,
        }
    }

    /// Marks the start of a frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Marks a frame start at `now`.
    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last.replace(now) {
            self.record(now.saturating_duration_since(last));
        }
    }

    fn record(&mut self, frame: Duration) {
        if self.samples.len() == WINDOW {
            if let Some(oldest) = self.samples.pop_front() {
                self.total -= oldest;
            }
        }
        self.samples.push_back(frame);
        self.total += frame;
    }

    /// Mean frame time in milliseconds, 0 before two ticks.
    #[must_use]
    pub fn frame_time_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.total.as_secs_f32() * 1000.0 / self.samples.len() as f32
    }

    /// Frames per second, 0 before two ticks.
    #[must_use]
    pub fn fps(&self) -> f32 {
        let ms = self.frame_time_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_timer_reports_zero() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.fps(), 0.0);
        timer.tick_at(Instant::now());
        assert_eq!(timer.frame_time_ms(), 0.0);
    }

    #[test]
    fn test_steady_frames() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        for i in 0..=10 {
            timer.tick_at(start + Duration::from_millis(20 * i));
        }
        assert!((timer.frame_time_ms() - 20.0).abs() < 1e-3);
        assert!((timer.fps() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn test_old_frames_fall_out() {
        let mut timer = FrameTimer::new();
        let mut now = Instant::now();
        timer.tick_at(now);
        now += Duration::from_millis(500);
        timer.tick_at(now);
        for _ in 0..WINDOW {
            now += Duration::from_millis(10);
            timer.tick_at(now);
        }
        assert!((timer.frame_time_ms() - 10.0).abs() < 1e-3);
    }
}
