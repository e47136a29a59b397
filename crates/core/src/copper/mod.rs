//! Copper bars: pre-rendered gradient bands bobbing on phase-shifted sines.

use crate::{
    config::{BarLayout, CopperConfig},
    render::{Canvas, Framebuffer, Image, Point, Rect, Rgba},
    Result,
};

#[derive(Debug, Clone)]
pub struct CopperBars {
    bar_height: u32,
    amplitude: f64,
    frequency: f64,
    phase_step: f64,
    anchors: Vec<i32>,
}

impl CopperBars {
    pub fn new(config: &CopperConfig, screen_height: u32) -> Self {
        let count = config.count as i64;
        let anchors = (0..count)
            .map(|i| {
                let y = match config.layout {
                    BarLayout::Spread => i * (i64::from(screen_height) / count.max(1)),
                    BarLayout::Stacked => {
                        i64::from(screen_height / 2) + i * i64::from(config.bar_height) / 2
                    }
                };
                y as i32
            })
            .collect();
        Self {
            bar_height: config.bar_height,
            amplitude: f64::from(config.bar_height),
            frequency: config.frequency,
            phase_step: config.phase_step,
            anchors,
        }
    }

    pub fn count(&self) -> usize {
        self.anchors.len()
    }

    /// Renders one band per bar: full intensity on the centre row fading
    /// linearly to black at the top and bottom, cycling red, green, blue.
    pub fn render_gradients(&self, width: u32) -> Result<Vec<Image>> {
        let half = (self.bar_height / 2) as i32;
        (0..self.count())
            .map(|index| {
                let mut target = Framebuffer::new(width, self.bar_height);
                for y in 0..self.bar_height as i32 {
                    let ratio = f64::from((y - half).abs()) / f64::from(half);
                    let level = (255.0 * (1.0 - ratio)) as u8;
                    let color = match index % 3 {
                        0 => Rgba::opaque(level, 0, 0),
                        1 => Rgba::opaque(0, level, 0),
                        _ => Rgba::opaque(0, 0, level),
                    };
                    target.set_draw_color(color);
                    target.draw_line(Point::new(0, y), Point::new(width as i32, y))?;
                }
                Ok(target.into_image())
            })
            .collect()
    }

    /// Top edge of bar `index` after `elapsed` seconds.
    pub fn bar_y(&self, index: usize, elapsed: f64) -> i32 {
        let phase = self.frequency * elapsed + index as f64 * self.phase_step;
        let offset = self.amplitude * phase.sin();
        self.anchors[index] + offset as i32
    }

    pub fn draw<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        bars: &[C::Texture],
        elapsed: f64,
    ) -> Result<()> {
        let (width, _) = canvas.size();
        for (index, texture) in bars.iter().enumerate().take(self.count()) {
            let dst = Rect::new(0, self.bar_y(index, elapsed), width, self.bar_height);
            canvas.copy(texture, None, dst, false)?;
        }
        Ok(())
    }
}
