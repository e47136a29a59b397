use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    render::{Image, Rgba},
    scroll::FONT_CELL,
    DemoError, Result,
};

/// Atlas must hold ten columns and six rows of glyph cells.
const FONT_COLUMNS: u32 = 10;
const FONT_ROWS: u32 = 6;

/// Locations of the files the demo loads at start-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub font: PathBuf,
    pub logo: PathBuf,
    pub music: PathBuf,
    /// Picture shown by the intro; the intro skips straight to the flash
    /// without one.
    pub splash: Option<PathBuf>,
    /// One-shot sound played as the splash ends.
    pub sample: Option<PathBuf>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            font: PathBuf::from("assets/font.png"),
            logo: PathBuf::from("assets/logo.png"),
            music: PathBuf::from("assets/music.mod"),
            splash: None,
            sample: None,
        }
    }
}

impl AssetPaths {
    /// Resolves relative paths against `base` and checks every required file
    /// exists. Music is only required when it will actually be played.
    pub fn resolve(&self, base: &Path, require_music: bool) -> Result<AssetPaths> {
        let resolve = |path: &Path| -> Result<PathBuf> {
            let full = if path.is_absolute() {
                path.to_path_buf()
            } else {
                base.join(path)
            };
            if full.is_file() {
                Ok(full)
            } else {
                Err(DemoError::asset(full.display().to_string(), "file not found"))
            }
        };

        Ok(AssetPaths {
            font: resolve(&self.font)?,
            logo: resolve(&self.logo)?,
            music: if require_music {
                resolve(&self.music)?
            } else {
                base.join(&self.music)
            },
            splash: self.splash.as_deref().map(resolve).transpose()?,
            sample: self.sample.as_deref().map(resolve).transpose()?,
        })
    }
}

/// Decoded pictures, ready to be uploaded as textures.
#[derive(Debug, Clone)]
pub struct SceneImages {
    pub font: Image,
    pub logo: Image,
    pub splash: Option<Image>,
}

impl SceneImages {
    /// Font and logo are keyed on black, so black becomes transparent. The
    /// splash is a full-screen picture and stays opaque.
    pub fn new(mut font: Image, mut logo: Image, splash: Option<Image>) -> Result<Self> {
        let (need_w, need_h) = (FONT_COLUMNS * FONT_CELL, FONT_ROWS * FONT_CELL);
        if font.width() < need_w || font.height() < need_h {
            return Err(DemoError::asset(
                "font",
                format!(
                    "atlas is {}x{}, needs at least {need_w}x{need_h}",
                    font.width(),
                    font.height()
                ),
            ));
        }
        if logo.width() == 0 || logo.height() == 0 {
            return Err(DemoError::asset("logo", "image is empty"));
        }
        font.apply_color_key(Rgba::BLACK);
        logo.apply_color_key(Rgba::BLACK);
        Ok(Self { font, logo, splash })
    }
}
