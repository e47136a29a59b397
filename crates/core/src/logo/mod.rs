//! Logo that slides down from above the screen and then keeps bouncing.

use crate::{
    config::LogoConfig,
    render::{Canvas, Rect},
    Result,
};

/// The logo only ever moves from `Sliding` to `Bouncing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoPhase {
    Sliding,
    Bouncing,
}

#[derive(Debug, Clone)]
pub struct Logo {
    phase: LogoPhase,
    y: i32,
    target_y: i32,
    width: u32,
    height: u32,
    slide_factor: f64,
    bounce_amplitude: f64,
    bounce_frequency: f64,
}

impl Logo {
    /// Places a `width` x `height` logo just above the top edge.
    pub fn new(config: &LogoConfig, width: u32, height: u32, screen_height: u32) -> Self {
        let target_y =
            (i64::from(screen_height) - i64::from(height)) / i64::from(config.target_divisor.max(1));
        let start = -(height as i32);
        Self {
            phase: LogoPhase::Sliding,
            y: start,
            target_y: target_y as i32,
            width,
            height,
            slide_factor: config.slide_factor,
            bounce_amplitude: config.bounce_amplitude,
            bounce_frequency: config.bounce_frequency,
        }
    }

    pub fn phase(&self) -> LogoPhase {
        self.phase
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn target_y(&self) -> i32 {
        self.target_y
    }

    /// Moves the logo for a frame drawn `elapsed` seconds after start.
    ///
    /// While sliding, the per-frame step grows with total elapsed time.
    pub fn update(&mut self, elapsed: f64) {
        match self.phase {
            LogoPhase::Sliding => {
                let step = (f64::from(self.height) * elapsed * self.slide_factor) as i32;
                self.y = self.y.saturating_add(step);
                if self.y >= self.target_y {
                    self.y = self.target_y;
                    self.phase = LogoPhase::Bouncing;
                }
            }
            LogoPhase::Bouncing => {
                let bounce = self.bounce_amplitude * (elapsed * self.bounce_frequency).sin();
                self.y = self.target_y + bounce as i32;
            }
        }
    }

    /// Draws the logo horizontally centred at its current height.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, texture: &C::Texture) -> Result<()> {
        let (width, _) = canvas.size();
        let x = (i64::from(width) - i64::from(self.width)) / 2;
        let dst = Rect::new(x as i32, self.y, self.width, self.height);
        canvas.copy(texture, None, dst, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logo() -> Logo {
        Logo::new(&LogoConfig::default(), 300, 100, 768)
    }

    #[test]
    fn starts_above_the_screen() {
        let logo = logo();
        assert_eq!(logo.y(), -100);
        assert_eq!(logo.target_y(), (768 - 100) / 7);
        assert_eq!(logo.phase(), LogoPhase::Sliding);
    }

    #[test]
    fn slide_speed_grows_with_elapsed_time() {
        let mut logo = logo();
        logo.update(0.1);
        assert_eq!(logo.y(), -100);
        logo.update(1.0);
        assert_eq!(logo.y(), -95);
        logo.update(2.0);
        assert_eq!(logo.y(), -85);
    }

    #[test]
    fn clamps_to_target_then_bounces_forever() {
        let mut logo = logo();
        let mut t = 0.0;
        while logo.phase() == LogoPhase::Sliding {
            t += 1.0 / 60.0;
            logo.update(t);
            assert!(logo.y() <= logo.target_y());
        }
        assert_eq!(logo.y(), logo.target_y());

        for _ in 0..600 {
            t += 1.0 / 60.0;
            logo.update(t);
            assert_eq!(logo.phase(), LogoPhase::Bouncing);
            assert!((logo.y() - logo.target_y()).abs() <= 4);
        }
    }
}
