use std::{collections::VecDeque, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    audio::{MusicPlayer, SilentPlayer},
    backend::Backend,
    input::InputEvent,
    render::{BlendMode, Canvas, Framebuffer, Image, Point, Rect, Rgba},
    timeline::PlaybackClock,
    Result,
};

/// Configuration options for headless recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Frames to present before a quit request is injected. The fade that
    /// follows is recorded as well.
    pub frames: u64,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            fps: 60,
            frames: 600,
        }
    }
}

/// Destination for presented frames.
pub trait FrameSink {
    fn write_frame(&mut self, index: u64, frame: &Image) -> Result<()>;
}

/// Sink that only counts frames and keeps the most recent one.
#[derive(Debug, Default)]
pub struct LastFrame {
    pub count: u64,
    pub frame: Option<Image>,
}

impl FrameSink for LastFrame {
    fn write_frame(&mut self, index: u64, frame: &Image) -> Result<()> {
        self.count = index + 1;
        self.frame = Some(frame.clone());
        Ok(())
    }
}

/// Headless [`Backend`]: software rendering on a virtual clock that advances
/// one frame period per present, feeding every frame to a [`FrameSink`].
#[derive(Debug)]
pub struct Recorder<S> {
    settings: RecordingSettings,
    canvas: Framebuffer,
    music: SilentPlayer,
    clock: PlaybackClock,
    events: VecDeque<InputEvent>,
    presented: u64,
    quit_sent: bool,
    sink: S,
}

impl<S: FrameSink> Recorder<S> {
    pub fn new(settings: RecordingSettings, sink: S) -> Self {
        Self {
            canvas: Framebuffer::new(settings.width, settings.height),
            settings,
            music: SilentPlayer::new(),
            clock: PlaybackClock::default(),
            events: VecDeque::new(),
            presented: 0,
            quit_sent: false,
            sink,
        }
    }

    /// Queues an event to be returned by the next `poll_event` calls.
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn volume_history(&self) -> &[u8] {
        self.music.history()
    }

    pub fn samples_played(&self) -> u32 {
        self.music.samples_played()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.canvas
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: FrameSink> Backend for Recorder<S> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        if let Some(event) = self.events.pop_front() {
            return Some(event);
        }
        if !self.quit_sent && self.presented >= self.settings.frames {
            self.quit_sent = true;
            tracing::info!(frames = self.presented, "frame budget reached, requesting quit");
            return Some(InputEvent::Quit);
        }
        None
    }

    fn present(&mut self) -> Result<()> {
        self.sink.write_frame(self.presented, self.canvas.image())?;
        self.presented += 1;
        self.clock.advance(1.0 / f64::from(self.settings.fps.max(1)));
        Ok(())
    }

    fn elapsed_seconds(&self) -> f64 {
        self.clock.time_seconds
    }

    fn delay(&mut self, _duration: Duration) {}
}

impl<S> MusicPlayer for Recorder<S> {
    fn play_looping(&mut self) -> Result<()> {
        self.music.play_looping()
    }

    fn set_volume(&mut self, volume: u8) {
        self.music.set_volume(volume);
    }

    fn volume(&self) -> u8 {
        self.music.volume()
    }

    fn play_sample(&mut self) -> Result<()> {
        self.music.play_sample()
    }
}

impl<S> Canvas for Recorder<S> {
    type Texture = Image;

    fn size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    fn set_draw_color(&mut self, color: Rgba) {
        self.canvas.set_draw_color(color);
    }

    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()> {
        self.canvas.set_blend_mode(mode)
    }

    fn clear(&mut self) -> Result<()> {
        self.canvas.clear()
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<()> {
        self.canvas.draw_line(from, to)
    }

    fn draw_point(&mut self, at: Point) -> Result<()> {
        self.canvas.draw_point(at)
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        self.canvas.fill_rect(rect)
    }

    fn copy(
        &mut self,
        texture: &Image,
        src: Option<Rect>,
        dst: Rect,
        flip_vertical: bool,
    ) -> Result<()> {
        self.canvas.copy(texture, src, dst, flip_vertical)
    }

    fn create_texture(&mut self, image: &Image) -> Result<Image> {
        self.canvas.create_texture(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(frames: u64) -> Recorder<LastFrame> {
        Recorder::new(
            RecordingSettings {
                width: 8,
                height: 8,
                fps: 50,
                frames,
            },
            LastFrame::default(),
        )
    }

    #[test]
    fn present_advances_the_virtual_clock() {
        let mut rec = recorder(10);
        rec.present().unwrap();
        rec.present().unwrap();
        assert_eq!(rec.presented(), 2);
        assert!((rec.elapsed_seconds() - 0.04).abs() < 1e-12);
        assert_eq!(rec.sink().count, 2);
    }

    #[test]
    fn queued_events_come_first_then_a_single_quit() {
        let mut rec = recorder(1);
        rec.push_event(InputEvent::KeyDown(crate::input::Key::Up));
        assert_eq!(rec.poll_event(), Some(InputEvent::KeyDown(crate::input::Key::Up)));
        assert_eq!(rec.poll_event(), None);

        rec.present().unwrap();
        assert_eq!(rec.poll_event(), Some(InputEvent::Quit));
        assert_eq!(rec.poll_event(), None);
    }
}
