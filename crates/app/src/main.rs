use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use cubetro_core::{
    AssetPaths, DemoConfig, DemoError, Image, Recorder, RecordingSettings, Result, Scene,
    SceneImages,
};
use tracing_subscriber::EnvFilter;

mod frames;
#[cfg(feature = "sdl")]
mod sdl;

use frames::PngSink;

const DEFAULT_WINDOW: (u32, u32) = (1024, 768);

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "cubetro failed");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    let (config, base) = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Live { win, debug } => {
            let window = match win.as_deref() {
                None => None,
                Some([]) => Some(DEFAULT_WINDOW),
                Some([width, height]) => Some((*width, *height)),
                Some(_) => return Err(DemoError::msg("--win takes either no values or WIDTH HEIGHT")),
            };
            run_live(config, &base, window, debug)
        }
        Commands::Record {
            out_dir,
            frames,
            width,
            height,
        } => {
            let settings = RecordingSettings {
                width: width.unwrap_or(config.window.width),
                height: height.unwrap_or(config.window.height),
                fps: config.window.fps,
                frames,
            };
            run_record(config, &base, &out_dir, settings)
        }
    }
}

/// Reads the configuration file when one is given. Relative asset paths are
/// resolved against the file's directory, or the working directory without
/// one.
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<(DemoConfig, PathBuf)> {
    let (mut config, base) = match path {
        Some(path) => {
            tracing::info!(?path, "loading configuration");
            let base = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            (DemoConfig::load(path)?, base)
        }
        None => (DemoConfig::default(), std::env::current_dir()?),
    };
    if seed.is_some() {
        config.starfield.seed = seed;
    }
    config.validate()?;
    Ok((config, base))
}

fn load_image(path: &Path) -> Result<Image> {
    let decoded = image::open(path)
        .map_err(|err| DemoError::asset(path.display().to_string(), err.to_string()))?
        .into_rgba8();
    Image::from_rgba8(decoded.width(), decoded.height(), decoded.as_raw())
}

fn load_images(paths: &AssetPaths) -> Result<SceneImages> {
    let font = load_image(&paths.font)?;
    let logo = load_image(&paths.logo)?;
    let splash = paths.splash.as_deref().map(load_image).transpose()?;
    SceneImages::new(font, logo, splash)
}

fn run_record(
    config: DemoConfig,
    base: &Path,
    out_dir: &Path,
    settings: RecordingSettings,
) -> Result<()> {
    let paths = config.assets.resolve(base, false)?;
    let images = load_images(&paths)?;
    std::fs::create_dir_all(out_dir)?;
    tracing::info!(
        ?out_dir,
        width = settings.width,
        height = settings.height,
        frames = settings.frames,
        "recording"
    );

    let fps = settings.fps;
    let mut recorder = Recorder::new(settings, PngSink::new(out_dir));
    let mut scene = Scene::new(&config, &mut recorder, &images)?;
    cubetro_core::run(&mut scene, &mut recorder, fps, false)?;

    tracing::info!(written = recorder.sink().written(), "recording finished");
    Ok(())
}

#[cfg(feature = "sdl")]
fn run_live(
    config: DemoConfig,
    base: &Path,
    window: Option<(u32, u32)>,
    debug: bool,
) -> Result<()> {
    let paths = config.assets.resolve(base, true)?;
    let images = load_images(&paths)?;
    let mut backend = sdl::SdlBackend::new(window, &paths.music, paths.sample.as_deref())?;
    let mut scene = Scene::new(&config, &mut backend, &images)?;
    cubetro_core::run(&mut scene, &mut backend, config.window.fps, debug)
}

#[cfg(not(feature = "sdl"))]
fn run_live(
    _config: DemoConfig,
    _base: &Path,
    _window: Option<(u32, u32)>,
    _debug: bool,
) -> Result<()> {
    Err(DemoError::msg(
        "live mode needs a build with the `sdl` feature; use `record` for headless output",
    ))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Rotating cube demo with starfield, scroller and copper bars", long_about = None)]
struct Cli {
    /// JSON configuration file; omitted sections keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Fixed seed for the starfield.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the demo on screen, fullscreen unless `--win` is given.
    Live {
        /// Run in a window, optionally with an explicit size.
        #[arg(long, num_args = 0..=2, value_names = ["WIDTH", "HEIGHT"])]
        win: Option<Vec<u32>>,
        /// Log the frame rate once per second.
        #[arg(long)]
        debug: bool,
    },
    /// Render headless into numbered PNG files, fade-out included.
    Record {
        /// Directory that receives `frame_00000.png` and onwards.
        out_dir: PathBuf,
        /// Frames to render before the fade starts.
        #[arg(long, default_value_t = 600)]
        frames: u64,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
}
