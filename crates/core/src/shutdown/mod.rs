//! Fixed-length fade to black and silence that ends the demo.

/// Number of fade steps; step `i` uses volume `255 - i` and overlay alpha `i`.
pub const FADE_STEPS: u16 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShutdownPhase {
    #[default]
    Running,
    /// Next step to emit.
    Fading { step: u16 },
    Finished,
}

/// Values to apply for one fade step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeStep {
    pub index: u16,
    pub volume: u8,
    pub overlay_alpha: u8,
}

/// Forward-only `Running -> Fading -> Finished` machine.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSequencer {
    phase: ShutdownPhase,
}

impl ShutdownSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == ShutdownPhase::Finished
    }

    /// Starts the fade. Returns `false` when a fade already started; a
    /// second quit request never restarts or shortens it.
    pub fn trigger(&mut self) -> bool {
        if self.phase != ShutdownPhase::Running {
            return false;
        }
        self.phase = ShutdownPhase::Fading { step: 0 };
        true
    }

    /// Emits the next step, or `None` before the trigger and after the last
    /// step.
    pub fn next_step(&mut self) -> Option<FadeStep> {
        let ShutdownPhase::Fading { step } = self.phase else {
            return None;
        };
        let level = step.min(255) as u8;
        self.phase = if step + 1 >= FADE_STEPS {
            ShutdownPhase::Finished
        } else {
            ShutdownPhase::Fading { step: step + 1 }
        };
        Some(FadeStep {
            index: step,
            volume: 255 - level,
            overlay_alpha: level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_triggered() {
        let mut seq = ShutdownSequencer::new();
        assert_eq!(seq.next_step(), None);
        assert_eq!(seq.phase(), ShutdownPhase::Running);
    }

    #[test]
    fn emits_256_linear_steps_then_finishes() {
        let mut seq = ShutdownSequencer::new();
        assert!(seq.trigger());

        let steps: Vec<FadeStep> = std::iter::from_fn(|| seq.next_step()).collect();
        assert_eq!(steps.len(), 256);
        assert_eq!(steps[0].volume, 255);
        assert_eq!(steps[0].overlay_alpha, 0);
        assert_eq!(steps[255].volume, 0);
        assert_eq!(steps[255].overlay_alpha, 255);
        assert!(steps.windows(2).all(|w| w[1].volume < w[0].volume));
        assert!(seq.is_finished());
    }

    #[test]
    fn second_trigger_does_not_restart() {
        let mut seq = ShutdownSequencer::new();
        seq.trigger();
        for _ in 0..10 {
            seq.next_step();
        }
        assert!(!seq.trigger());
        assert_eq!(seq.next_step().map(|s| s.index), Some(10));

        while seq.next_step().is_some() {}
        assert!(!seq.trigger());
        assert!(seq.is_finished());
    }
}
