// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Torchlight Spring: caller-driven animated scalar cells.
//!
//! This crate provides the small animation model the rest of Torchlight is
//! built on: an [`AnimatedScalar`] cell that holds a plain `f64` value and
//! interpolates it toward a target under either a damped-spring driver
//! ([`Spring`]) or a fixed-duration linear driver ([`Timing`]).
//!
//! There is no animation thread here. The host advances every cell explicitly
//! by calling [`AnimatedScalar::advance`] once per frame with the elapsed
//! [`Duration`], and reads the current value synchronously. Cells are plain
//! numeric state, so a writer (the tour orchestrator) and a reader (a
//! renderer) can share them without any channel or lock.
//!
//! ## Example
//!
//! ```rust
//! use core::time::Duration;
//! use torchlight_spring::{AnimatedScalar, SpringParams};
//!
//! let mut x = AnimatedScalar::new(0.0);
//! x.spring_to(100.0, SpringParams::default());
//!
//! // Simulate at 60fps until settled.
//! while !x.is_settled() {
//!     x.advance(Duration::from_millis(16));
//! }
//! assert!((x.value() - 100.0).abs() < 0.01);
//! ```

use core::time::Duration;

mod spring;
mod timing;

pub use spring::{Spring, SpringParams};
pub use timing::Timing;

/// Named spring parameter sets for common UI motion.
///
/// All values are for the unit-mass oscillator [`Spring`] integrates; a
/// parameter set quoted against a heavier mass `m` divides through by `m` to
/// give the same motion here.
pub mod presets {
    use super::SpringParams;

    /// Gentle and smooth; critically damped, no overshoot.
    pub const GENTLE: SpringParams = SpringParams::new(30.0, 225.0);

    /// Snappy and responsive; barely perceptible overshoot.
    pub const SNAPPY: SpringParams = SpringParams::new(27.5, 225.0);

    /// Bouncy and energetic; visible oscillation.
    pub const WIGGLY: SpringParams = SpringParams::new(22.5, 225.0);
}

/// The active interpolation driver of an [`AnimatedScalar`].
#[derive(Clone, Debug)]
enum Driver {
    /// No animation in flight; the cell holds a settled value.
    Idle,
    Spring(Spring),
    Timing(Timing),
}

/// A mutable scalar cell that interpolates toward a target.
///
/// The cell always has a current value, readable synchronously via
/// [`AnimatedScalar::value`]. Retargeting a cell that is already spring-driven
/// preserves the in-flight velocity, so successive retargets chain smoothly
/// instead of restarting from rest.
#[derive(Clone, Debug)]
pub struct AnimatedScalar {
    value: f64,
    driver: Driver,
}

impl AnimatedScalar {
    /// Creates a settled cell holding `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            driver: Driver::Idle,
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The value the cell is heading toward.
    ///
    /// For a settled cell this is the current value.
    #[must_use]
    pub fn target(&self) -> f64 {
        match &self.driver {
            Driver::Idle => self.value,
            Driver::Spring(s) => s.target(),
            Driver::Timing(t) => t.target(),
        }
    }

    /// Whether no animation is in flight.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.driver, Driver::Idle)
    }

    /// Jumps to `value` immediately, cancelling any in-flight driver.
    pub fn set(&mut self, value: f64) {
        self.value = value;
        self.driver = Driver::Idle;
    }

    /// Starts (or retargets) a spring animation toward `target`.
    ///
    /// If a spring is already driving the cell, its velocity carries over and
    /// only the target and parameters change.
    pub fn spring_to(&mut self, target: f64, params: SpringParams) {
        match &mut self.driver {
            Driver::Spring(s) => s.retarget(target, params),
            _ => {
                let s = Spring::new(self.value, target, params);
                if s.is_at_rest() {
                    // Already at the target; nothing to drive.
                    self.value = target;
                    self.driver = Driver::Idle;
                } else {
                    self.driver = Driver::Spring(s);
                }
            }
        }
    }

    /// Starts a fixed-duration linear animation toward `target`.
    ///
    /// A zero duration jumps immediately.
    pub fn timing_to(&mut self, target: f64, duration: Duration) {
        if duration.is_zero() {
            self.set(target);
            return;
        }
        self.driver = Driver::Timing(Timing::new(self.value, target, duration));
    }

    /// Advances the in-flight driver by `dt` and updates the current value.
    pub fn advance(&mut self, dt: Duration) {
        match &mut self.driver {
            Driver::Idle => {}
            Driver::Spring(s) => {
                s.advance(dt);
                self.value = s.position();
                if s.is_at_rest() {
                    self.driver = Driver::Idle;
                }
            }
            Driver::Timing(t) => {
                t.advance(dt);
                self.value = t.value();
                if t.is_done() {
                    self.driver = Driver::Idle;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn settle(cell: &mut AnimatedScalar, max_frames: usize) {
        for _ in 0..max_frames {
            if cell.is_settled() {
                return;
            }
            cell.advance(MS_16);
        }
    }

    #[test]
    fn spring_cell_converges() {
        let mut cell = AnimatedScalar::new(0.0);
        cell.spring_to(100.0, SpringParams::default());
        settle(&mut cell, 1000);
        assert!(cell.is_settled(), "cell did not settle");
        assert!((cell.value() - 100.0).abs() < 0.1, "value: {}", cell.value());
    }

    #[test]
    fn timing_cell_is_linear() {
        let mut cell = AnimatedScalar::new(0.0);
        cell.timing_to(1.0, Duration::from_millis(300));
        cell.advance(Duration::from_millis(150));
        assert!((cell.value() - 0.5).abs() < 1e-9, "value: {}", cell.value());
        cell.advance(Duration::from_millis(150));
        assert!((cell.value() - 1.0).abs() < 1e-9);
        assert!(cell.is_settled());
    }

    #[test]
    fn zero_duration_timing_jumps() {
        let mut cell = AnimatedScalar::new(3.0);
        cell.timing_to(9.0, Duration::ZERO);
        assert!((cell.value() - 9.0).abs() < f64::EPSILON);
        assert!(cell.is_settled());
    }

    #[test]
    fn set_cancels_driver() {
        let mut cell = AnimatedScalar::new(0.0);
        cell.spring_to(50.0, SpringParams::default());
        cell.advance(MS_16);
        cell.set(7.0);
        assert!(cell.is_settled());
        assert!((cell.value() - 7.0).abs() < f64::EPSILON);
        cell.advance(MS_16);
        assert!((cell.value() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn retarget_preserves_motion() {
        let mut cell = AnimatedScalar::new(0.0);
        cell.spring_to(100.0, SpringParams::default());
        for _ in 0..5 {
            cell.advance(MS_16);
        }
        let moving_value = cell.value();
        assert!(moving_value > 0.0);

        cell.spring_to(200.0, SpringParams::default());
        cell.advance(MS_16);
        // Still moving forward, no reset to the start value.
        assert!(cell.value() > moving_value);
        settle(&mut cell, 2000);
        assert!((cell.value() - 200.0).abs() < 0.1);
    }

    #[test]
    fn spring_to_current_value_settles_immediately() {
        let mut cell = AnimatedScalar::new(42.0);
        cell.spring_to(42.0, SpringParams::default());
        assert!(cell.is_settled());
        assert!((cell.value() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn target_reports_driver_target() {
        let mut cell = AnimatedScalar::new(0.0);
        assert!((cell.target() - 0.0).abs() < f64::EPSILON);
        cell.spring_to(10.0, SpringParams::default());
        assert!((cell.target() - 10.0).abs() < f64::EPSILON);
        cell.timing_to(20.0, Duration::from_millis(100));
        assert!((cell.target() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn presets_grade_from_smooth_to_bouncy() {
        let overshoot = |params: SpringParams| {
            let mut cell = AnimatedScalar::new(0.0);
            cell.spring_to(100.0, params);
            let mut max = 0.0_f64;
            for _ in 0..2000 {
                cell.advance(MS_16);
                max = max.max(cell.value());
            }
            max - 100.0
        };
        assert!(
            overshoot(presets::GENTLE) < 0.5,
            "gentle must not visibly overshoot"
        );
        assert!(
            overshoot(presets::WIGGLY) > 1.0,
            "wiggly must visibly overshoot"
        );
    }

    #[test]
    fn advance_is_deterministic() {
        let run = || {
            let mut cell = AnimatedScalar::new(0.0);
            cell.spring_to(1.0, SpringParams::new(20.0, 90.0));
            let mut values = Vec::new();
            for _ in 0..50 {
                cell.advance(MS_16);
                values.push(cell.value());
            }
            values
        };
        assert_eq!(run(), run(), "identical inputs must produce identical traces");
    }
}
