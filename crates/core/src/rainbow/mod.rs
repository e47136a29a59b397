//! Colour-cycling rainbow rulers framing the screen.

use crate::{
    render::{Canvas, Point, Rgba},
    Result,
};

const PALETTE: [[u8; 3]; 12] = [
    [255, 0, 0],
    [255, 127, 0],
    [255, 255, 0],
    [127, 255, 0],
    [0, 255, 0],
    [0, 255, 127],
    [0, 255, 255],
    [0, 127, 255],
    [0, 0, 255],
    [127, 0, 255],
    [255, 0, 255],
    [255, 0, 127],
];

/// Ruler thickness minus one; each column is a line from `y` to `y + 5`.
const RULER_SPAN: i32 = 5;

fn lerp(a: [u8; 3], b: [u8; 3], t: f32) -> Rgba {
    let mix = |x: u8, y: u8| (f32::from(x) * (1.0 - t) + f32::from(y) * t) as u8;
    Rgba::opaque(mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]))
}

#[derive(Debug, Clone, Copy)]
pub struct RainbowRuler {
    pub y: i32,
    /// Milliseconds per palette slot.
    pub speed_ms: u32,
    pub reverse: bool,
}

impl RainbowRuler {
    /// The default pair: 50 px from the top and from the bottom, cycling in
    /// opposite directions.
    pub fn pair(screen_height: u32) -> [RainbowRuler; 2] {
        [
            RainbowRuler {
                y: 50,
                speed_ms: 200,
                reverse: false,
            },
            RainbowRuler {
                y: screen_height as i32 - 50,
                speed_ms: 200,
                reverse: true,
            },
        ]
    }

    /// Colour of column `x` on a `width` wide screen after `elapsed` seconds.
    pub fn color_at(&self, x: u32, width: u32, elapsed: f64) -> Rgba {
        let n = PALETTE.len() as i64;
        let segment = (width / PALETTE.len() as u32).max(1);
        let mut t = (elapsed * 1000.0) as i64 / i64::from(self.speed_ms.max(1));
        if self.reverse {
            t = -t;
        }
        let pos = (x % segment) as f32 / segment as f32;
        let index = (i64::from(x / segment) + t).rem_euclid(n) as usize;
        let next = (index + 1) % PALETTE.len();
        lerp(PALETTE[index], PALETTE[next], pos)
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, elapsed: f64) -> Result<()> {
        let (width, _) = canvas.size();
        for x in 0..width {
            canvas.set_draw_color(self.color_at(x, width, elapsed));
            let column = x as i32;
            canvas.draw_line(Point::new(column, self.y), Point::new(column, self.y + RULER_SPAN))?;
        }
        Ok(())
    }
}
