use crate::{DemoError, Result};

use super::{BlendMode, Canvas, Point, Rect, Rgba};

/// Owned RGBA pixel grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Image {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Wraps tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(DemoError::msg(format!(
                "expected {expected} bytes for a {width}x{height} image, got {}",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| [px.r, px.g, px.b, px.a])
            .collect()
    }

    /// Returns `None` outside the image.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Makes every pixel matching `key` (alpha ignored) fully transparent.
    pub fn apply_color_key(&mut self, key: Rgba) {
        for px in &mut self.pixels {
            if px.r == key.r && px.g == key.g && px.b == key.b {
                px.a = 0;
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

/// Software [`Canvas`] rendering into an [`Image`].
#[derive(Debug, Clone)]
pub struct Framebuffer {
    image: Image,
    color: Rgba,
    blend: BlendMode,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: Image::new(width, height),
            color: Rgba::BLACK,
            blend: BlendMode::None,
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn into_image(self) -> Image {
        self.image
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.image.pixel(x, y)
    }

    fn plot(&mut self, x: i32, y: i32) {
        let color = self.color;
        let blend = self.blend;
        if let Some(i) = self.image.index(x, y) {
            let dst = &mut self.image.pixels[i];
            *dst = match blend {
                BlendMode::None => color,
                BlendMode::Blend => color.over(*dst),
            };
        }
    }

    /// Cohen-Sutherland clip against the pixel grid. Keeps Bresenham from
    /// walking millions of off-screen pixels for stars close to the camera.
    fn clip(&self, from: Point, to: Point) -> Option<(Point, Point)> {
        const INSIDE: u8 = 0;
        const LEFT: u8 = 1;
        const RIGHT: u8 = 2;
        const TOP: u8 = 4;
        const BOTTOM: u8 = 8;

        let (xmin, ymin) = (0.0, 0.0);
        let xmax = f64::from(self.image.width) - 1.0;
        let ymax = f64::from(self.image.height) - 1.0;
        if xmax < 0.0 || ymax < 0.0 {
            return None;
        }

        let code = |x: f64, y: f64| {
            let mut c = INSIDE;
            if x < xmin {
                c |= LEFT;
            } else if x > xmax {
                c |= RIGHT;
            }
            if y < ymin {
                c |= TOP;
            } else if y > ymax {
                c |= BOTTOM;
            }
            c
        };

        let (mut x0, mut y0) = (f64::from(from.x), f64::from(from.y));
        let (mut x1, mut y1) = (f64::from(to.x), f64::from(to.y));
        let mut c0 = code(x0, y0);
        let mut c1 = code(x1, y1);

        loop {
            if (c0 | c1) == INSIDE {
                let a = Point::new(x0.round() as i32, y0.round() as i32);
                let b = Point::new(x1.round() as i32, y1.round() as i32);
                return Some((a, b));
            }
            if (c0 & c1) != INSIDE {
                return None;
            }
            let out = if c0 != INSIDE { c0 } else { c1 };
            let (x, y) = if out & BOTTOM != 0 {
                (x0 + (x1 - x0) * (ymax - y0) / (y1 - y0), ymax)
            } else if out & TOP != 0 {
                (x0 + (x1 - x0) * (ymin - y0) / (y1 - y0), ymin)
            } else if out & RIGHT != 0 {
                (xmax, y0 + (y1 - y0) * (xmax - x0) / (x1 - x0))
            } else {
                (xmin, y0 + (y1 - y0) * (xmin - x0) / (x1 - x0))
            };
            if out == c0 {
                x0 = x;
                y0 = y;
                c0 = code(x0, y0);
            } else {
                x1 = x;
                y1 = y;
                c1 = code(x1, y1);
            }
        }
    }
}

impl Canvas for Framebuffer {
    type Texture = Image;

    fn size(&self) -> (u32, u32) {
        (self.image.width, self.image.height)
    }

    fn set_draw_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()> {
        self.blend = mode;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        // Clearing ignores the blend mode, like a hardware clear.
        let color = self.color;
        self.image.pixels.fill(color);
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<()> {
        let Some((from, to)) = self.clip(from, to) else {
            return Ok(());
        };

        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - x).abs();
        let dy = -(to.y - y).abs();
        let sx = if x < to.x { 1 } else { -1 };
        let sy = if y < to.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y);
            if x == to.x && y == to.y {
                return Ok(());
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_point(&mut self, at: Point) -> Result<()> {
        self.plot(at.x, at.y);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (i64::from(rect.x) + i64::from(rect.w)).min(i64::from(self.image.width)) as i32;
        let y1 = (i64::from(rect.y) + i64::from(rect.h)).min(i64::from(self.image.height)) as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.plot(x, y);
            }
        }
        Ok(())
    }

    fn copy(
        &mut self,
        texture: &Image,
        src: Option<Rect>,
        dst: Rect,
        flip_vertical: bool,
    ) -> Result<()> {
        let src = src.unwrap_or(Rect::new(0, 0, texture.width, texture.height));
        if src.w == 0 || src.h == 0 || dst.w == 0 || dst.h == 0 {
            return Ok(());
        }

        let (width, height) = (self.image.width as i64, self.image.height as i64);
        let dx0 = i64::from(dst.x).max(0);
        let dy0 = i64::from(dst.y).max(0);
        let dx1 = (i64::from(dst.x) + i64::from(dst.w)).min(width);
        let dy1 = (i64::from(dst.y) + i64::from(dst.h)).min(height);

        for py in dy0..dy1 {
            let mut row = py - i64::from(dst.y);
            if flip_vertical {
                row = i64::from(dst.h) - 1 - row;
            }
            let sy = i64::from(src.y) + row * i64::from(src.h) / i64::from(dst.h);
            for px in dx0..dx1 {
                let col = px - i64::from(dst.x);
                let sx = i64::from(src.x) + col * i64::from(src.w) / i64::from(dst.w);
                let Some(texel) = texture.pixel(sx as i32, sy as i32) else {
                    continue;
                };
                if texel.a == 0 {
                    continue;
                }
                let i = py as usize * self.image.width as usize + px as usize;
                let dst_px = &mut self.image.pixels[i];
                *dst_px = texel.over(*dst_px);
            }
        }
        Ok(())
    }

    fn create_texture(&mut self, image: &Image) -> Result<Image> {
        Ok(image.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &Framebuffer) -> usize {
        fb.image().pixels().iter().filter(|px| **px != Rgba::BLACK).count()
    }

    #[test]
    fn lines_include_both_endpoints() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear().unwrap();
        fb.set_draw_color(Rgba::WHITE);
        fb.draw_line(Point::new(2, 3), Point::new(9, 3)).unwrap();

        assert_eq!(lit(&fb), 8);
        assert_eq!(fb.pixel(2, 3), Some(Rgba::WHITE));
        assert_eq!(fb.pixel(9, 3), Some(Rgba::WHITE));
    }

    #[test]
    fn far_off_screen_lines_are_clipped() {
        let mut fb = Framebuffer::new(8, 8);
        fb.clear().unwrap();
        fb.set_draw_color(Rgba::WHITE);
        fb.draw_line(Point::new(-1_000_000, 4), Point::new(1_000_000, 4))
            .unwrap();
        fb.draw_line(Point::new(-50, -50), Point::new(-10, -2)).unwrap();

        assert_eq!(lit(&fb), 8);
    }

    #[test]
    fn blended_rect_darkens_towards_black() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_draw_color(Rgba::WHITE);
        fb.clear().unwrap();
        fb.set_blend_mode(BlendMode::Blend).unwrap();

        fb.set_draw_color(Rgba::new(0, 0, 0, 128));
        fb.fill_rect(Rect::new(0, 0, 4, 4)).unwrap();
        let half = fb.pixel(1, 1).unwrap();
        assert!(half.r > 100 && half.r < 150);

        fb.set_draw_color(Rgba::new(0, 0, 0, 255));
        fb.fill_rect(Rect::new(0, 0, 4, 4)).unwrap();
        assert_eq!(fb.pixel(1, 1).unwrap().r, 0);
    }

    #[test]
    fn copy_scales_flips_and_skips_transparent_texels() {
        let mut texture = Image::from_rgba8(
            1,
            2,
            &[255, 0, 0, 255, /* second row keyed out below */ 0, 0, 0, 255],
        )
        .unwrap();
        texture.apply_color_key(Rgba::BLACK);

        let mut fb = Framebuffer::new(4, 4);
        fb.set_draw_color(Rgba::opaque(0, 0, 9));
        fb.clear().unwrap();
        fb.copy(&texture, None, Rect::new(0, 0, 2, 4), true).unwrap();

        // Flipped: the red row lands in the bottom half.
        assert_eq!(fb.pixel(0, 3), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(fb.pixel(1, 2), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(fb.pixel(0, 0), Some(Rgba::opaque(0, 0, 9)));
    }

    #[test]
    fn rejects_short_pixel_buffers() {
        assert!(Image::from_rgba8(2, 2, &[0; 15]).is_err());
    }
}
