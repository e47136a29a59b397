//! Window, renderer and music playback on SDL2.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use cubetro_core::{
    audio::scale_volume, Backend, BlendMode, Canvas, DemoError, Image, InputEvent, Key,
    MusicPlayer, Point, Rect, Result, Rgba,
};
use sdl2::{
    event::Event,
    keyboard::Keycode,
    mixer::{self, Channel, Chunk, InitFlag, Music, Sdl2MixerContext, AUDIO_S16LSB, MAX_VOLUME},
    pixels::{Color, PixelFormatEnum},
    render::{Texture, TextureCreator, WindowCanvas},
    video::WindowContext,
    EventPump, Sdl,
};

pub struct SdlBackend {
    canvas: WindowCanvas,
    textures: TextureCreator<WindowContext>,
    events: EventPump,
    music: Music<'static>,
    sample: Option<Chunk>,
    volume: u8,
    size: (u32, u32),
    started: Instant,
    _mixer: Sdl2MixerContext,
    _sdl: Sdl,
}

impl SdlBackend {
    /// Opens a centred borderless window of `window` size, or a fullscreen
    /// desktop window when `None`, and loads the music track and the optional
    /// intro sample.
    pub fn new(window: Option<(u32, u32)>, music: &Path, sample: Option<&Path>) -> Result<Self> {
        let sdl = sdl2::init().map_err(DemoError::backend)?;
        let video = sdl.video().map_err(DemoError::backend)?;

        let (width, height) = window.unwrap_or((1, 1));
        let mut builder = video.window("cubetro", width, height);
        builder.position_centered();
        match window {
            Some(_) => builder.borderless(),
            None => builder.fullscreen_desktop(),
        };
        let sdl_window = builder.build().map_err(DemoError::backend)?;

        let canvas = sdl_window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(DemoError::backend)?;
        let size = canvas.output_size().map_err(DemoError::backend)?;
        sdl.mouse().show_cursor(false);

        mixer::open_audio(44_100, AUDIO_S16LSB, 2, 1024).map_err(DemoError::backend)?;
        let mixer_context = mixer::init(InitFlag::MOD).map_err(DemoError::backend)?;
        let track = Music::from_file(music)
            .map_err(|err| DemoError::asset(music.display().to_string(), err))?;
        let sample = sample
            .map(|path| {
                Chunk::from_file(path)
                    .map_err(|err| DemoError::asset(path.display().to_string(), err))
            })
            .transpose()?;

        tracing::info!(width = size.0, height = size.1, "display opened");
        Ok(Self {
            textures: canvas.texture_creator(),
            events: sdl.event_pump().map_err(DemoError::backend)?,
            canvas,
            music: track,
            sample,
            volume: u8::MAX,
            size,
            started: Instant::now(),
            _mixer: mixer_context,
            _sdl: sdl,
        })
    }
}

fn to_sdl_point(point: Point) -> sdl2::rect::Point {
    sdl2::rect::Point::new(point.x, point.y)
}

fn to_sdl_rect(rect: Rect) -> sdl2::rect::Rect {
    sdl2::rect::Rect::new(rect.x, rect.y, rect.w, rect.h)
}

fn to_key(keycode: Keycode) -> Key {
    if keycode == Keycode::Up {
        Key::Up
    } else if keycode == Keycode::Down {
        Key::Down
    } else if keycode == Keycode::Q {
        Key::Q
    } else if keycode == Keycode::Escape {
        Key::Escape
    } else {
        Key::Other
    }
}

impl Canvas for SdlBackend {
    type Texture = Texture;

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_draw_color(&mut self, color: Rgba) {
        self.canvas
            .set_draw_color(Color::RGBA(color.r, color.g, color.b, color.a));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()> {
        self.canvas.set_blend_mode(match mode {
            BlendMode::None => sdl2::render::BlendMode::None,
            BlendMode::Blend => sdl2::render::BlendMode::Blend,
        });
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.canvas.clear();
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<()> {
        self.canvas
            .draw_line(to_sdl_point(from), to_sdl_point(to))
            .map_err(DemoError::backend)
    }

    fn draw_point(&mut self, at: Point) -> Result<()> {
        self.canvas
            .draw_point(to_sdl_point(at))
            .map_err(DemoError::backend)
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        self.canvas
            .fill_rect(to_sdl_rect(rect))
            .map_err(DemoError::backend)
    }

    fn copy(
        &mut self,
        texture: &Texture,
        src: Option<Rect>,
        dst: Rect,
        flip_vertical: bool,
    ) -> Result<()> {
        self.canvas
            .copy_ex(
                texture,
                src.map(to_sdl_rect),
                to_sdl_rect(dst),
                0.0,
                None,
                false,
                flip_vertical,
            )
            .map_err(DemoError::backend)
    }

    fn create_texture(&mut self, image: &Image) -> Result<Texture> {
        // ABGR8888 is laid out as R, G, B, A bytes on little-endian targets.
        let mut texture = self
            .textures
            .create_texture_static(PixelFormatEnum::ABGR8888, image.width(), image.height())
            .map_err(DemoError::backend)?;
        texture
            .update(None, &image.to_rgba8(), image.width() as usize * 4)
            .map_err(DemoError::backend)?;
        texture.set_blend_mode(sdl2::render::BlendMode::Blend);
        Ok(texture)
    }
}

impl MusicPlayer for SdlBackend {
    fn play_looping(&mut self) -> Result<()> {
        Music::set_volume(scale_volume(self.volume, MAX_VOLUME));
        self.music.play(-1).map_err(DemoError::backend)
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
        Music::set_volume(scale_volume(volume, MAX_VOLUME));
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn play_sample(&mut self) -> Result<()> {
        let Some(chunk) = &self.sample else {
            return Ok(());
        };
        Channel::all()
            .play(chunk, 0)
            .map(|_| ())
            .map_err(DemoError::backend)
    }
}

impl Backend for SdlBackend {
    fn poll_event(&mut self) -> Option<InputEvent> {
        while let Some(event) = self.events.poll_event() {
            match event {
                Event::Quit { .. } => return Some(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => return Some(InputEvent::KeyDown(to_key(keycode))),
                _ => {}
            }
        }
        None
    }

    fn present(&mut self) -> Result<()> {
        self.canvas.present();
        Ok(())
    }

    fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
