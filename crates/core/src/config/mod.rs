use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{assets::AssetPaths, input::KeyMap, DemoError, Result};

/// Top-level configuration structure for the demo.
///
/// Every section falls back to its defaults when omitted, so a JSON file
/// only needs to mention the values it wants to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub cube: CubeConfig,
    pub starfield: StarfieldConfig,
    pub scroll: ScrollConfig,
    pub copper: CopperConfig,
    pub logo: LogoConfig,
    pub shutdown: ShutdownConfig,
    pub intro: IntroConfig,
    pub assets: AssetPaths,
    pub keys: KeyMap,
}

impl DemoConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Rejects values that would make an effect divide by zero or never
    /// converge.
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(DemoError::msg("window size must be non-zero"));
        }
        if self.window.fps == 0 {
            return Err(DemoError::msg("fps must be non-zero"));
        }
        // Rotated cube corners reach |z| = sqrt(3); the camera must stay
        // in front of all of them.
        if !(self.cube.camera_distance > 3f64.sqrt()) {
            return Err(DemoError::msg(format!(
                "camera distance {} must exceed sqrt(3)",
                self.cube.camera_distance
            )));
        }
        let zoom = &self.cube.zoom;
        if !(zoom.min > 0.0 && zoom.min <= zoom.max) {
            return Err(DemoError::msg(format!(
                "zoom range [{}, {}] is empty",
                zoom.min, zoom.max
            )));
        }
        if zoom.step <= 0.0 {
            return Err(DemoError::msg("zoom step must be positive"));
        }
        if self.starfield.count == 0 {
            return Err(DemoError::msg("starfield needs at least one star"));
        }
        let speeds = &self.starfield;
        if !(speeds.min_speed > 0.0 && speeds.min_speed <= speeds.max_speed) {
            return Err(DemoError::msg("star speeds must satisfy 0 < min <= max"));
        }
        if self.scroll.speed <= 0.0 {
            return Err(DemoError::msg("scroll speed must be positive"));
        }
        if self.copper.bar_height < 2 {
            return Err(DemoError::msg("copper bars must be at least two pixels tall"));
        }
        if self.logo.target_divisor == 0 {
            return Err(DemoError::msg("logo target divisor must be non-zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Radians added to the rotation angle every frame.
    pub rotation_step: f64,
    pub camera_distance: f64,
    pub zoom: ZoomConfig,
    /// When set, the first time the zoom reaches its target the target is
    /// swapped for this value once.
    pub bounce_back_target: Option<f64>,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            rotation_step: 0.01,
            camera_distance: 3.0,
            zoom: ZoomConfig::default(),
            bounce_back_target: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub start: f64,
    pub target: f64,
    pub step: f64,
    pub min: f64,
    pub max: f64,
    /// Target change applied per zoom key press.
    pub key_step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            start: 0.1,
            target: 0.6,
            step: 0.002,
            min: 0.1,
            max: 0.6,
            key_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            min_speed: 0.01,
            max_speed: 0.06,
            seed: None,
        }
    }
}

pub const DEFAULT_SCROLL_TEXT: &str = "..:CUBETRO PRESENTS:..    \"THE CUBE IS BACK!\"    \
..:PRESS THE UP AND DOWN KEYS TO ZOOM THE CUBE IN AND OUT:..    \
..:\"LIVE --WIN\" ON THE COMMAND LINE TO RUN IN WINDOWED MODE:..    \
..:\"LIVE --WIN WIDTH HEIGHT\" TO SET THE WINDOW SIZE:..    \
..:\"--DEBUG\" TO SHOW FPS:..    ..:PRESS Q OR ESC TO QUIT:..    \
..:GREETS TO EVERYONE STILL WRITING COPPER BARS IN 2024!!!:..          ";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub text: String,
    /// Pixels per frame at the configured frame rate.
    pub speed: f64,
    pub wave_amplitude: f64,
    pub wave_period: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_SCROLL_TEXT.to_string(),
            speed: 10.0,
            wave_amplitude: 20.0,
            wave_period: 100.0,
        }
    }
}

/// Where the copper bars oscillate around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarLayout {
    /// Anchors spread evenly from the top of the screen.
    Spread,
    /// Anchors packed half a bar apart starting at mid-screen.
    Stacked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopperConfig {
    pub count: usize,
    pub bar_height: u32,
    pub frequency: f64,
    pub phase_step: f64,
    pub layout: BarLayout,
}

impl Default for CopperConfig {
    fn default() -> Self {
        Self {
            count: 5,
            bar_height: 60,
            frequency: 2.0,
            phase_step: 0.4,
            layout: BarLayout::Spread,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub slide_factor: f64,
    pub bounce_amplitude: f64,
    pub bounce_frequency: f64,
    /// Target Y is `(screen height - logo height) / target_divisor`.
    pub target_divisor: u32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            slide_factor: 0.05,
            bounce_amplitude: 4.0,
            bounce_frequency: 20.0,
            target_divisor: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    pub step_delay_ms: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { step_delay_ms: 400 / 60 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub enabled: bool,
    pub splash_seconds: f64,
    pub decrunch_seconds: f64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            splash_seconds: 2.0,
            decrunch_seconds: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            DemoConfig::from_json_str(r#"{ "window": { "width": 640 }, "copper": { "layout": "stacked" } }"#)
                .unwrap();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 768);
        assert_eq!(config.copper.layout, BarLayout::Stacked);
        assert_eq!(config.starfield.count, 1000);
    }

    #[test]
    fn rejects_inverted_zoom_range() {
        let err = DemoConfig::from_json_str(r#"{ "cube": { "zoom": { "min": 0.8, "max": 0.2 } } }"#)
            .unwrap_err();
        assert!(format!("{err}").contains("zoom range"));
    }

    #[test]
    fn rejects_camera_inside_the_cube() {
        for distance in ["1.0", "1.7320508075688772", "-3.0"] {
            let json = format!(r#"{{ "cube": {{ "camera_distance": {distance} }} }}"#);
            let err = DemoConfig::from_json_str(&json).unwrap_err();
            assert!(format!("{err}").contains("camera distance"));
        }
        assert!(DemoConfig::from_json_str(r#"{ "cube": { "camera_distance": 1.8 } }"#).is_ok());
    }

    #[test]
    fn reports_malformed_json() {
        let err = DemoConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DemoError::Config(_)));
    }
}
