// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven progress with easing.

use core::time::Duration;

/// Maps raw progress in `[0, 1]` onto eased progress in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Cubic ease-in-out.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply to `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Progress from 0 to 1 over a fixed duration.
///
/// Elapsed time is accumulated as a [`Duration`] so repeated ticks do not drift.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// A tween over `duration`. A zero duration completes on the first tick.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// Advance by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Jump to the end.
    pub fn finish(&mut self) {
        self.elapsed = self.elapsed.max(self.duration);
    }

    /// Progress before easing, in `[0, 1]`.
    pub fn raw_progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress, in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.easing.apply(self.raw_progress())
    }

    /// Whether the full duration has elapsed.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_is_symmetric_and_pinned() {
        let e = Easing::CubicInOut;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.5), 0.5);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
        assert_eq!(e.apply(-3.0), 0.0);
    }

    #[test]
    fn tween_completes_after_duration() {
        let mut t = Tween::new(Duration::from_millis(1000), Easing::Linear);
        t.tick(Duration::from_millis(250));
        assert!((t.value() - 0.25).abs() < 1e-12);
        assert!(!t.is_complete());
        t.tick(Duration::from_millis(750));
        assert!(t.is_complete());
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn zero_duration_is_already_done() {
        let t = Tween::new(Duration::ZERO, Easing::CubicInOut);
        assert!(t.is_complete());
        assert_eq!(t.value(), 1.0);
    }
}
