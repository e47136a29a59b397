//! Frame orchestration: owns every effect, drains input once per frame and
//! draws the effects in a fixed order.

use std::time::Duration;

use crate::{
    assets::SceneImages,
    backend::Backend,
    copper::CopperBars,
    cube::Cube,
    input::{Action, KeyMap},
    intro::{Intro, IntroPhase},
    logo::Logo,
    rainbow::RainbowRuler,
    render::{BlendMode, Canvas, Rect, Rgba},
    scroll::ScrollText,
    shutdown::{ShutdownPhase, ShutdownSequencer},
    starfield::Starfield,
    timeline::{FpsCounter, FramePacer},
    DemoConfig, Result,
};

/// All mutable animation state. Each effect owns only its own slice.
#[derive(Debug)]
pub struct AnimationState {
    pub cube: Cube,
    pub starfield: Starfield,
    pub scroll: ScrollText,
    pub copper: CopperBars,
    pub logo: Logo,
    pub rulers: [RainbowRuler; 2],
}

impl AnimationState {
    pub fn new(config: &DemoConfig, width: u32, height: u32, logo_size: (u32, u32)) -> Self {
        let (logo_w, logo_h) = logo_size;
        Self {
            cube: Cube::new(&config.cube),
            starfield: Starfield::new(&config.starfield),
            scroll: ScrollText::new(&config.scroll, config.window.fps, width),
            copper: CopperBars::new(&config.copper, height),
            logo: Logo::new(&config.logo, logo_w, logo_h, height),
            rulers: RainbowRuler::pair(height),
        }
    }
}

/// Backend textures uploaded once at start-up.
#[derive(Debug)]
pub struct SceneTextures<T> {
    pub font: T,
    pub logo: T,
    pub bars: Vec<T>,
    pub splash: Option<T>,
}

impl<T> SceneTextures<T> {
    /// Uploads the decoded pictures and pre-renders one gradient per copper
    /// bar.
    pub fn upload<C>(canvas: &mut C, images: &SceneImages, copper: &CopperBars) -> Result<Self>
    where
        C: Canvas<Texture = T> + ?Sized,
    {
        let (width, _) = canvas.size();
        let bars = copper
            .render_gradients(width)?
            .iter()
            .map(|image| canvas.create_texture(image))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            font: canvas.create_texture(&images.font)?,
            logo: canvas.create_texture(&images.logo)?,
            bars,
            splash: images
                .splash
                .as_ref()
                .map(|image| canvas.create_texture(image))
                .transpose()?,
        })
    }
}

/// The running demo.
#[derive(Debug)]
pub struct Scene<T> {
    state: AnimationState,
    textures: SceneTextures<T>,
    keys: KeyMap,
    shutdown: ShutdownSequencer,
    step_delay: Duration,
    intro: Option<Intro>,
    running: bool,
    started: f64,
}

impl<T> Scene<T> {
    pub fn new<B>(config: &DemoConfig, backend: &mut B, images: &SceneImages) -> Result<Self>
    where
        B: Backend<Texture = T> + ?Sized,
    {
        let (width, height) = backend.size();
        let logo_size = (images.logo.width(), images.logo.height());
        let state = AnimationState::new(config, width, height, logo_size);
        let textures = SceneTextures::upload(backend, images, &state.copper)?;
        let intro = config
            .intro
            .enabled
            .then(|| Intro::new(&config.intro, textures.splash.is_some()));
        if !config.intro.enabled && images.splash.is_some() {
            tracing::warn!("splash image configured but the intro is disabled");
        }

        Ok(Self {
            state,
            textures,
            keys: config.keys.clone(),
            shutdown: ShutdownSequencer::new(),
            step_delay: Duration::from_millis(config.shutdown.step_delay_ms),
            intro,
            running: true,
            started: backend.elapsed_seconds(),
        })
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn shutdown_phase(&self) -> ShutdownPhase {
        self.shutdown.phase()
    }

    fn elapsed<B: Backend + ?Sized>(&self, backend: &B) -> f64 {
        backend.elapsed_seconds() - self.started
    }

    /// Plays the splash, flash and decrunch once. A quit request skips the
    /// rest of the intro. Animation time starts when the intro ends.
    pub fn play_intro<B>(&mut self, backend: &mut B, pacer: FramePacer) -> Result<()>
    where
        B: Backend<Texture = T> + ?Sized,
    {
        let Some(intro) = self.intro.take() else {
            return Ok(());
        };
        tracing::info!("playing intro");
        let start = backend.elapsed_seconds();
        let mut sample_played = false;
        loop {
            let frame_start = backend.elapsed_seconds();
            while let Some(event) = backend.poll_event() {
                if self.keys.action(event) == Some(Action::Quit) {
                    tracing::info!("intro skipped");
                    self.started = backend.elapsed_seconds();
                    return Ok(());
                }
            }
            let elapsed = frame_start - start;
            let phase = intro.phase_at(elapsed);
            if !sample_played && phase != IntroPhase::Splash {
                sample_played = true;
                if let Err(err) = backend.play_sample() {
                    tracing::warn!(error = %err, "intro sample failed to play");
                }
            }
            if phase == IntroPhase::Done {
                break;
            }
            if let Err(err) = intro.draw(backend, elapsed, self.textures.splash.as_ref()) {
                tracing::debug!(error = %err, "intro frame dropped");
            }
            backend.present()?;
            backend.delay(pacer.remaining(backend.elapsed_seconds() - frame_start));
        }
        self.started = backend.elapsed_seconds();
        Ok(())
    }

    /// Runs one frame. A quit request runs the whole fade before returning.
    /// Does nothing once the scene has stopped.
    pub fn frame<B>(&mut self, backend: &mut B) -> Result<()>
    where
        B: Backend<Texture = T> + ?Sized,
    {
        if !self.running {
            return Ok(());
        }
        let mut quit = false;
        while let Some(event) = backend.poll_event() {
            match self.keys.action(event) {
                Some(Action::ZoomIn) => self.state.cube.zoom_mut().zoom_in(),
                Some(Action::ZoomOut) => self.state.cube.zoom_mut().zoom_out(),
                Some(Action::Quit) => quit = true,
                None => {}
            }
        }
        if quit {
            return self.run_shutdown(backend);
        }

        self.state.cube.zoom_mut().update();
        let elapsed = self.elapsed(backend);
        let (width, height) = backend.size();

        backend.set_draw_color(Rgba::BLACK);
        backend.clear()?;

        let [top, bottom] = &self.state.rulers;
        soft(top.draw(backend, elapsed), "top ruler");

        self.state.starfield.update(width, height);
        soft(self.state.starfield.draw(backend), "starfield");

        soft(
            self.state.copper.draw(backend, &self.textures.bars, elapsed),
            "copper bars",
        );

        soft(self.state.cube.draw(backend), "cube");
        self.state.cube.advance_rotation();

        soft(self.state.scroll.draw(backend, &self.textures.font), "scroll text");
        self.state.scroll.advance();

        self.state.logo.update(elapsed);
        soft(self.state.logo.draw(backend, &self.textures.logo), "logo");

        soft(bottom.draw(backend, elapsed), "bottom ruler");

        backend.present()
    }

    /// Fades picture and music out over a fixed number of steps, then stops
    /// the scene. Events are not polled while fading.
    pub fn run_shutdown<B>(&mut self, backend: &mut B) -> Result<()>
    where
        B: Backend<Texture = T> + ?Sized,
    {
        if !self.shutdown.trigger() {
            return Ok(());
        }
        tracing::info!("shutting down");
        backend.set_blend_mode(BlendMode::Blend)?;

        while let Some(step) = self.shutdown.next_step() {
            let (width, height) = backend.size();
            backend.set_volume(step.volume);
            self.state.cube.advance_rotation();
            self.state.scroll.advance();

            backend.set_draw_color(Rgba::BLACK);
            backend.clear()?;
            self.state.starfield.update(width, height);
            soft(self.state.starfield.draw(backend), "starfield");
            soft(self.state.cube.draw(backend), "cube");
            soft(self.state.scroll.draw(backend, &self.textures.font), "scroll text");

            backend.set_draw_color(Rgba::new(0, 0, 0, step.overlay_alpha));
            backend.fill_rect(Rect::new(0, 0, width, height))?;
            backend.present()?;
            backend.delay(self.step_delay);
        }

        self.running = false;
        tracing::info!("thanks for watching");
        Ok(())
    }
}

fn soft(result: Result<()>, effect: &str) {
    if let Err(err) = result {
        tracing::debug!(effect, error = %err, "draw failed, skipping for this frame");
    }
}

/// Plays the intro when enabled, starts the music, then runs frames until
/// the shutdown fade has finished.
pub fn run<B>(scene: &mut Scene<B::Texture>, backend: &mut B, fps: u32, debug: bool) -> Result<()>
where
    B: Backend + ?Sized,
{
    let pacer = FramePacer::new(fps);
    scene.play_intro(backend, pacer)?;
    if !scene.is_running() {
        return Ok(());
    }

    backend.play_looping()?;
    tracing::info!(fps, "demo started");
    let mut counter = FpsCounter::new(backend.elapsed_seconds());

    while scene.is_running() {
        let frame_start = backend.elapsed_seconds();
        scene.frame(backend)?;
        if !scene.is_running() {
            break;
        }
        let now = backend.elapsed_seconds();
        if let Some(rate) = counter.tick(now) {
            if debug {
                tracing::info!(fps = format!("{rate:.1}"), "frame rate");
            }
        }
        backend.delay(pacer.remaining(now - frame_start));
    }
    Ok(())
}
