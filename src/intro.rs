//! Launch splash fade
//!
//! The splash is held, faded to black, then the board fades in from black.
//! Everything here is a pure function of seconds since launch.

use crate::settings::IntroTiming;

/// Which picture sits under the fade overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStage {
    /// Splash screen, fully visible
    Hold,
    /// Splash screen darkening
    FadeOut,
    /// Board brightening
    FadeIn,
    /// Intro over; input accepted
    Done,
}

#[derive(Debug, Clone, Copy)]
pub struct IntroFade {
    timing: IntroTiming,
}

impl IntroFade {
    pub fn new(timing: IntroTiming) -> Self {
        Self { timing }
    }

    /// Total intro length in seconds
    pub fn duration(&self) -> f32 {
        self.timing.hold_secs + 2.0 * self.timing.fade_secs
    }

    pub fn stage(&self, t: f32) -> IntroStage {
        let hold = self.timing.hold_secs;
        let fade = self.timing.fade_secs;
        if t < hold {
            IntroStage::Hold
        } else if t < hold + fade {
            IntroStage::FadeOut
        } else if t < hold + 2.0 * fade {
            IntroStage::FadeIn
        } else {
            IntroStage::Done
        }
    }

    /// Opacity of the black overlay at `t` seconds (0 = clear, 1 = black)
    pub fn overlay_alpha(&self, t: f32) -> f32 {
        let hold = self.timing.hold_secs;
        let fade = self.timing.fade_secs;
        if fade <= 0.0 {
            return 0.0;
        }
        match self.stage(t) {
            IntroStage::Hold | IntroStage::Done => 0.0,
            IntroStage::FadeOut => ((t - hold) / fade).clamp(0.0, 1.0),
            IntroStage::FadeIn => (1.0 - (t - hold - fade) / fade).clamp(0.0, 1.0),
        }
    }

    pub fn is_done(&self, t: f32) -> bool {
        self.stage(t) == IntroStage::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> IntroFade {
        IntroFade::new(IntroTiming {
            hold_secs: 2.0,
            fade_secs: 1.0,
        })
    }

    #[test]
    fn test_stages() {
        let f = fade();
        assert_eq!(f.stage(0.0), IntroStage::Hold);
        assert_eq!(f.stage(2.5), IntroStage::FadeOut);
        assert_eq!(f.stage(3.5), IntroStage::FadeIn);
        assert_eq!(f.stage(4.0), IntroStage::Done);
        assert_eq!(f.duration(), 4.0);
    }

    #[test]
    fn test_overlay_alpha() {
        let f = fade();
        assert_eq!(f.overlay_alpha(1.0), 0.0);
        assert!((f.overlay_alpha(2.5) - 0.5).abs() < 1e-6);
        assert!((f.overlay_alpha(2.999) - 1.0).abs() < 1e-2);
        assert!((f.overlay_alpha(3.25) - 0.75).abs() < 1e-6);
        assert_eq!(f.overlay_alpha(10.0), 0.0);
    }

    #[test]
    fn test_zero_fade_skips_straight_to_board() {
        let f = IntroFade::new(IntroTiming {
            hold_secs: 0.0,
            fade_secs: 0.0,
        });
        assert!(f.is_done(0.0));
        assert_eq!(f.overlay_alpha(0.0), 0.0);
    }
}
