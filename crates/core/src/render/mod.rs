//! Immediate-mode drawing contract shared by every effect.
//!
//! Effects never own a window. They receive something implementing
//! [`Canvas`] and issue coloured points, lines, rectangles and texture blits
//! against it. The software [`Framebuffer`] implements the same contract and
//! doubles as the offscreen target used to pre-render textures.

mod framebuffer;

pub use framebuffer::{Framebuffer, Image};

use serde::{Deserialize, Serialize};

use crate::Result;

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Grey level with matching alpha, as used for fading trails.
    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level, level)
    }

    /// Source-over blend of `self` onto `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        let a = u32::from(self.a);
        let inv = 255 - a;
        let mix = |s: u8, d: u8| ((u32::from(s) * a + u32::from(d) * inv + 127) / 255) as u8;
        Rgba {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a: (a + (u32::from(dst.a) * inv + 127) / 255) as u8,
        }
    }
}

/// Integer pixel position; may lie outside the drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// How solid primitives combine with what is already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Overwrite the destination, alpha included.
    #[default]
    None,
    /// Source-over alpha blending.
    Blend,
}

/// Drawing surface consumed by the effects.
///
/// Solid primitives use the colour set by [`Canvas::set_draw_color`] and the
/// active [`BlendMode`]. Texture blits always honour per-pixel alpha.
pub trait Canvas {
    /// Backend-specific handle to an uploaded image.
    type Texture;

    fn size(&self) -> (u32, u32);

    fn set_draw_color(&mut self, color: Rgba);

    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()>;

    /// Fills the whole surface with the draw colour.
    fn clear(&mut self) -> Result<()>;

    /// Draws a line including both endpoints.
    fn draw_line(&mut self, from: Point, to: Point) -> Result<()>;

    fn draw_point(&mut self, at: Point) -> Result<()>;

    fn fill_rect(&mut self, rect: Rect) -> Result<()>;

    /// Copies `src` (the whole texture when `None`) of `texture` scaled into
    /// `dst`, optionally mirrored top to bottom.
    fn copy(
        &mut self,
        texture: &Self::Texture,
        src: Option<Rect>,
        dst: Rect,
        flip_vertical: bool,
    ) -> Result<()>;

    /// Uploads an image so it can be used with [`Canvas::copy`].
    fn create_texture(&mut self, image: &Image) -> Result<Self::Texture>;
}
