//! Optional boot-style intro: splash picture, white flash, then decrunch
//! stripes.

use crate::{
    config::IntroConfig,
    render::{Canvas, Point, Rect, Rgba},
    Result,
};

const DECRUNCH_PALETTE: [[u8; 3]; 16] = [
    [0, 0, 0],
    [255, 255, 255],
    [136, 0, 0],
    [170, 255, 238],
    [204, 68, 204],
    [0, 204, 85],
    [0, 0, 170],
    [238, 238, 119],
    [221, 136, 85],
    [102, 68, 0],
    [255, 119, 119],
    [51, 51, 51],
    [119, 119, 119],
    [170, 255, 102],
    [0, 136, 255],
    [187, 187, 187],
];

const STRIPE_HEIGHT: u32 = 10;
const STRIPE_MS: i64 = 20;
const FLASH_SECONDS: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntroPhase {
    Splash,
    Flash,
    /// Seconds since the decrunch started.
    Decrunch(f64),
    Done,
}

#[derive(Debug, Clone)]
pub struct Intro {
    splash_seconds: f64,
    decrunch_seconds: f64,
}

impl Intro {
    /// Without a splash picture the intro starts at the flash.
    pub fn new(config: &IntroConfig, has_splash: bool) -> Self {
        Self {
            splash_seconds: if has_splash { config.splash_seconds } else { 0.0 },
            decrunch_seconds: config.decrunch_seconds,
        }
    }

    pub fn phase_at(&self, elapsed: f64) -> IntroPhase {
        let flash_start = self.splash_seconds;
        let decrunch_start = flash_start + FLASH_SECONDS;
        if elapsed < flash_start {
            IntroPhase::Splash
        } else if elapsed < decrunch_start {
            IntroPhase::Flash
        } else if elapsed < decrunch_start + self.decrunch_seconds {
            IntroPhase::Decrunch(elapsed - decrunch_start)
        } else {
            IntroPhase::Done
        }
    }

    /// Stripe colour for the stripe starting at row `y`.
    pub fn stripe_color(y: u32, decrunch_elapsed: f64) -> Rgba {
        let t = (decrunch_elapsed * 1000.0) as i64 / STRIPE_MS;
        let index = (i64::from(y) + t).rem_euclid(DECRUNCH_PALETTE.len() as i64) as usize;
        let [r, g, b] = DECRUNCH_PALETTE[index];
        Rgba::opaque(r, g, b)
    }

    /// Draws the frame for `elapsed` seconds into the intro.
    pub fn draw<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        elapsed: f64,
        splash: Option<&C::Texture>,
    ) -> Result<()> {
        let (width, height) = canvas.size();
        match self.phase_at(elapsed) {
            IntroPhase::Splash => {
                canvas.set_draw_color(Rgba::BLACK);
                canvas.clear()?;
                if let Some(texture) = splash {
                    canvas.copy(texture, None, Rect::new(0, 0, width, height), false)?;
                }
            }
            IntroPhase::Flash => {
                canvas.set_draw_color(Rgba::WHITE);
                canvas.clear()?;
            }
            IntroPhase::Decrunch(t) => {
                for y in (0..height).step_by(STRIPE_HEIGHT as usize) {
                    canvas.set_draw_color(Self::stripe_color(y, t));
                    for row in y..(y + STRIPE_HEIGHT).min(height) {
                        let row = row as i32;
                        canvas.draw_line(Point::new(0, row), Point::new(width as i32, row))?;
                    }
                }
            }
            IntroPhase::Done => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Framebuffer;

    #[test]
    fn phases_follow_each_other() {
        let intro = Intro::new(&IntroConfig::default(), true);
        assert_eq!(intro.phase_at(0.0), IntroPhase::Splash);
        assert_eq!(intro.phase_at(2.1), IntroPhase::Flash);
        assert_eq!(intro.phase_at(2.25), IntroPhase::Decrunch(0.0));
        assert_eq!(intro.phase_at(4.3), IntroPhase::Done);
    }

    #[test]
    fn no_splash_skips_straight_to_flash() {
        let intro = Intro::new(&IntroConfig::default(), false);
        assert_eq!(intro.phase_at(0.0), IntroPhase::Flash);
    }

    #[test]
    fn stripes_scroll_through_the_palette() {
        assert_eq!(Intro::stripe_color(0, 0.0), Rgba::BLACK);
        assert_eq!(Intro::stripe_color(0, 0.02), Rgba::WHITE);
        assert_eq!(Intro::stripe_color(10, 0.0), Rgba::opaque(255, 119, 119));

        let intro = Intro::new(&IntroConfig::default(), false);
        let mut fb = Framebuffer::new(8, 20);
        intro.draw(&mut fb, 0.3, None).unwrap();
        // 50 ms into the decrunch every stripe has moved two slots on.
        assert_eq!(fb.pixel(3, 12), Some(Rgba::opaque(119, 119, 119)));
    }
}
