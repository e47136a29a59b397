use std::time::Duration;

/// Manually advanced clock for runs that are not tied to wall time.
#[derive(Debug, Default, Clone)]
pub struct PlaybackClock {
    pub time_seconds: f64,
}

impl PlaybackClock {
    pub fn advance(&mut self, delta: f64) {
        self.time_seconds = (self.time_seconds + delta).max(0.0);
    }
}

/// Sleeps away whatever is left of a fixed per-frame budget.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget_ms: u64,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            budget_ms: 1000 / u64::from(fps.max(1)),
        }
    }

    /// Delay to apply after a frame that took `spent_seconds` to draw.
    pub fn remaining(&self, spent_seconds: f64) -> Duration {
        let spent_ms = (spent_seconds.max(0.0) * 1000.0) as u64;
        Duration::from_millis(self.budget_ms.saturating_sub(spent_ms))
    }
}

/// Counts frames and reports the rate roughly once per second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    window_start: f64,
}

impl FpsCounter {
    pub fn new(now: f64) -> Self {
        Self {
            frames: 0,
            window_start: now,
        }
    }

    /// Records a frame at `now`; returns the rate when a full second passed.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        self.frames += 1;
        let elapsed = now - self.window_start;
        if elapsed < 1.0 {
            return None;
        }
        let fps = f64::from(self.frames) / elapsed;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_never_goes_negative() {
        let mut clock = PlaybackClock::default();
        clock.advance(0.5);
        clock.advance(-2.0);
        assert_eq!(clock.time_seconds, 0.0);
    }

    #[test]
    fn pacer_fills_the_frame_budget() {
        let pacer = FramePacer::new(60);
        assert_eq!(pacer.remaining(0.0), Duration::from_millis(16));
        assert_eq!(pacer.remaining(0.010), Duration::from_millis(6));
        assert_eq!(pacer.remaining(0.5), Duration::ZERO);
    }

    #[test]
    fn fps_reported_once_per_second() {
        let mut counter = FpsCounter::new(0.0);
        let mut reports = Vec::new();
        for frame in 1..=120 {
            if let Some(fps) = counter.tick(f64::from(frame) / 60.0) {
                reports.push(fps);
            }
        }
        assert_eq!(reports.len(), 2);
        assert!((reports[0] - 60.0).abs() < 1e-9);
    }
}
