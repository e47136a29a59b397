//! Sine-wave scroller with a mirrored reflection band underneath.

use crate::{
    config::ScrollConfig,
    render::{Canvas, Rect},
    Result,
};

/// Size of one glyph cell in the font atlas.
pub const FONT_CELL: u32 = 32;
/// Size a glyph is drawn at on screen.
pub const GLYPH_SIZE: u32 = 64;

/// Atlas layout, one string per row of ten cells.
const FONT_ROWS: [&str; 6] = [
    " !\"@*£^'()",
    "&~,-.+0123",
    "456789:;=[",
    "]?{ABCDEFG",
    "HIJKLMNOPQ",
    "RSTUVWXYZ`",
];

/// Atlas cell `(column, row)` of `c`, or `None` when the font lacks it.
pub fn glyph_cell(c: char) -> Option<(u32, u32)> {
    FONT_ROWS.iter().enumerate().find_map(|(row, chars)| {
        chars
            .chars()
            .position(|g| g == c)
            .map(|col| (col as u32, row as u32))
    })
}

#[derive(Debug, Clone)]
pub struct ScrollText {
    text: String,
    /// Atlas cells of the characters the font can draw, in order.
    glyphs: Vec<(u32, u32)>,
    pos_x: f64,
    speed: f64,
    amplitude: f64,
    period: f64,
}

impl ScrollText {
    /// Starts the message just off the right edge of a `width` wide screen.
    /// `speed` in the config is per frame at 60 fps and is rescaled for `fps`.
    pub fn new(config: &ScrollConfig, fps: u32, width: u32) -> Self {
        let glyphs = config.text.chars().filter_map(glyph_cell).collect();
        Self {
            text: config.text.clone(),
            glyphs,
            pos_x: f64::from(width),
            speed: config.speed * (60.0 / f64::from(fps.max(1))),
            amplitude: config.wave_amplitude,
            period: config.wave_period,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pos_x(&self) -> f64 {
        self.pos_x
    }

    /// Pixel width of one copy of the message.
    pub fn total_width(&self) -> f64 {
        (self.glyphs.len() as u64 * u64::from(GLYPH_SIZE)) as f64
    }

    /// Scrolls left by one frame, wrapping by exactly one message width once
    /// the whole message has left the screen.
    pub fn advance(&mut self) {
        self.pos_x -= self.speed;
        let total = self.total_width();
        if total > 0.0 && self.pos_x <= -total {
            self.pos_x += total;
        }
    }

    fn wave(&self, x: i64) -> f64 {
        self.amplitude * (x as f64 / self.period).sin()
    }

    /// Draws the banner centred vertically, with a flipped copy below it
    /// riding the inverted wave.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, font: &C::Texture) -> Result<()> {
        let (width, height) = canvas.size();
        let screen_w = i64::from(width);
        let baseline = (height / 2) as i32;
        let glyph = i64::from(GLYPH_SIZE);
        let total = self.glyphs.len() as i64 * glyph;
        let repeats = screen_w / glyph + 1;

        for repeat in 0..=repeats {
            for (j, &(col, row)) in self.glyphs.iter().enumerate() {
                let x = self.pos_x as i64 + repeat * total + j as i64 * glyph;
                if x > screen_w {
                    break;
                }
                if x + glyph < 0 {
                    continue;
                }

                let src = Rect::new(
                    (col * FONT_CELL) as i32,
                    (row * FONT_CELL) as i32,
                    FONT_CELL,
                    FONT_CELL,
                );
                let wave = self.wave(x);

                let dst = Rect::new(x as i32, baseline + wave as i32, GLYPH_SIZE, GLYPH_SIZE);
                canvas.copy(font, Some(src), dst, false)?;

                let mirrored_y = baseline + GLYPH_SIZE as i32 + (-wave) as i32;
                let mirrored = Rect::new(x as i32, mirrored_y, GLYPH_SIZE, GLYPH_SIZE);
                canvas.copy(font, Some(src), mirrored, true)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Framebuffer, Image, Rgba};

    fn scroller(text: &str, width: u32) -> ScrollText {
        let config = ScrollConfig {
            text: text.to_string(),
            ..ScrollConfig::default()
        };
        ScrollText::new(&config, 60, width)
    }

    #[test]
    fn looks_up_atlas_cells() {
        assert_eq!(glyph_cell(' '), Some((0, 0)));
        assert_eq!(glyph_cell('A'), Some((3, 3)));
        assert_eq!(glyph_cell('Q'), Some((9, 4)));
        assert_eq!(glyph_cell('`'), Some((9, 5)));
        assert_eq!(glyph_cell('a'), None);
    }

    #[test]
    fn unmapped_characters_take_no_space() {
        let s = scroller("AbC", 640);
        assert_eq!(s.total_width(), 2.0 * f64::from(GLYPH_SIZE));
    }

    #[test]
    fn wrap_lands_inside_one_message_width() {
        let mut s = scroller("HELLO", 100);
        let total = s.total_width();
        let mut previous = s.pos_x();
        let mut wrapped = false;
        for _ in 0..500 {
            s.advance();
            if s.pos_x() > previous {
                wrapped = true;
                // The jump is exactly one message width minus one step.
                assert!((s.pos_x() - (previous - 10.0) - total).abs() < 1e-9);
            }
            if wrapped {
                assert!(s.pos_x() > -total && s.pos_x() <= 0.0);
            }
            previous = s.pos_x();
        }
        assert!(wrapped);
    }

    #[test]
    fn speed_is_rescaled_for_frame_rate() {
        let config = ScrollConfig::default();
        let mut s = ScrollText::new(&config, 30, 800);
        s.advance();
        assert_eq!(s.pos_x(), 780.0);
    }

    #[test]
    fn draws_banner_and_reflection() {
        let mut font = Framebuffer::new(FONT_CELL * 10, FONT_CELL * 6);
        font.set_draw_color(Rgba::WHITE);
        font.clear().unwrap();
        let font: Image = font.into_image();

        let mut s = scroller("I", 256);
        // 26 steps park the first copy at x = -4, where the wave is still
        // under one pixel.
        for _ in 0..26 {
            s.advance();
        }
        assert_eq!(s.pos_x(), -4.0);
        let mut fb = Framebuffer::new(256, 256);
        fb.clear().unwrap();
        s.draw(&mut fb, &font).unwrap();

        assert_eq!(fb.pixel(30, 100), Some(Rgba::BLACK));
        assert_eq!(fb.pixel(30, 130), Some(Rgba::WHITE));
        assert_eq!(fb.pixel(30, 200), Some(Rgba::WHITE));
        // Later copies tile to the right edge.
        assert!((0..256).all(|x| fb.pixel(x, 160) == Some(Rgba::WHITE)));
    }
}
