/// Smallest snap band that still lands on the target in f32.
const MIN_SNAP: f32 = 1e-4;

/// Phase of the global fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Target 0 and fully faded out.
    Inactive,
    /// Current opacity still easing toward the target.
    Transitioning,
    /// Target 1 and fully faded in.
    Active,
}

/// Global fade opacity, eased toward an externally set target.
///
/// Each step closes `rate` of the remaining gap and snaps exactly onto the
/// target once the gap falls below `snap`, so opacity never overshoots and
/// always stays in [0, 1].
#[derive(Debug, Clone)]
pub struct FadeController {
    current: f32,
    target: f32,
    rate: f32,
    snap: f32,
}

impl FadeController {
    pub fn new(rate: f32, snap: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            rate: rate.clamp(f32::EPSILON, 1.0),
            snap: snap.max(MIN_SNAP),
        }
    }

    /// Change only the target; `current` follows over subsequent steps.
    pub fn activate(&mut self, active: bool) {
        self.target = if active { 1.0 } else { 0.0 };
    }

    /// Advance one frame.
    pub fn step(&mut self) -> f32 {
        if self.current != self.target {
            self.current += (self.target - self.current) * self.rate;
            if (self.target - self.current).abs() < self.snap {
                self.current = self.target;
            }
            self.current = self.current.clamp(0.0, 1.0);
        }
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn phase(&self) -> FadePhase {
        if self.current != self.target {
            FadePhase::Transitioning
        } else if self.target > 0.0 {
            FadePhase::Active
        } else {
            FadePhase::Inactive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> FadeController {
        FadeController::new(0.025, 0.005)
    }

    #[test]
    fn starts_inactive() {
        let f = fade();
        assert_eq!(f.current(), 0.0);
        assert_eq!(f.phase(), FadePhase::Inactive);
    }

    #[test]
    fn activate_changes_only_target() {
        let mut f = fade();
        f.activate(true);
        assert_eq!(f.current(), 0.0);
        assert_eq!(f.target(), 1.0);
        assert_eq!(f.phase(), FadePhase::Transitioning);
    }

    #[test]
    fn crosses_half_on_frame_28() {
        let mut f = fade();
        f.activate(true);
        for _ in 0..27 {
            f.step();
        }
        assert!(f.current() < 0.5, "after 27 frames: {}", f.current());
        f.step();
        assert!(f.current() >= 0.5, "after 28 frames: {}", f.current());
    }

    #[test]
    fn fade_in_is_monotonic_and_snaps_to_one() {
        let mut f = fade();
        f.activate(false);
        f.activate(true);
        let mut last = f.current();
        let mut snapped_at = None;
        for frame in 1..=400 {
            let now = f.step();
            assert!(now >= last && now <= 1.0);
            if now == 1.0 && snapped_at.is_none() {
                snapped_at = Some(frame);
            }
            last = now;
        }
        // The gap 0.975^n drops below 0.005 around frame 210.
        let frame = snapped_at.expect("opacity should snap to 1");
        assert!((200..=215).contains(&frame), "snapped at {}", frame);
        assert_eq!(f.phase(), FadePhase::Active);
    }

    #[test]
    fn zero_snap_still_reaches_target() {
        let mut f = FadeController::new(0.025, 0.0);
        f.activate(true);
        for _ in 0..2_000 {
            f.step();
        }
        assert_eq!(f.current(), 1.0);
        assert_eq!(f.phase(), FadePhase::Active);
    }

    #[test]
    fn fade_out_never_goes_negative() {
        let mut f = fade();
        f.activate(true);
        for _ in 0..300 {
            f.step();
        }
        f.activate(false);
        let mut last = f.current();
        for _ in 0..400 {
            let now = f.step();
            assert!(now <= last && now >= 0.0);
            last = now;
        }
        assert_eq!(f.current(), 0.0);
        assert_eq!(f.phase(), FadePhase::Inactive);
    }
}
