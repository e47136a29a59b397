//! Core library for the cubetro demo.
//!
//! Each module owns one effect or one piece of plumbing: geometry and
//! rasterisation, the individual effects (cube, starfield, scroller, copper
//! bars, logo, rulers, intro), the shutdown fade, and the frame loop that
//! ties them together. Drawing and audio go through the [`Backend`] trait so
//! the same scene runs in a window or headless through [`Recorder`].

pub mod assets;
pub mod audio;
pub mod backend;
pub mod config;
pub mod copper;
pub mod cube;
pub mod error;
pub mod input;
pub mod intro;
pub mod logo;
pub mod math;
pub mod rainbow;
pub mod raster;
pub mod record;
pub mod render;
pub mod scene;
pub mod scroll;
pub mod shutdown;
pub mod starfield;
pub mod timeline;

pub use assets::{AssetPaths, SceneImages};
pub use audio::{MusicPlayer, SilentPlayer};
pub use backend::Backend;
pub use config::DemoConfig;
pub use error::{DemoError, Result};
pub use input::{InputEvent, Key, KeyMap};
pub use record::{FrameSink, LastFrame, Recorder, RecordingSettings};
pub use render::{BlendMode, Canvas, Framebuffer, Image, Point, Rect, Rgba};
pub use scene::{run, AnimationState, Scene};
pub use shutdown::{ShutdownPhase, FADE_STEPS};
pub use timeline::{FpsCounter, FramePacer, PlaybackClock};
