use std::time::Duration;

use crate::{audio::MusicPlayer, input::InputEvent, render::Canvas, Result};

/// Everything the frame loop needs from the platform: a canvas, music
/// volume control, an event queue, presentation and a clock.
pub trait Backend: Canvas + MusicPlayer {
    /// Non-blocking; `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Shows the frame drawn since the last call.
    fn present(&mut self) -> Result<()>;

    /// Monotonic seconds since the backend was created.
    fn elapsed_seconds(&self) -> f64;

    fn delay(&mut self, duration: Duration);
}
