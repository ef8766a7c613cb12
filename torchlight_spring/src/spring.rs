// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

/// Maximum dt per integration step (4ms). Larger deltas are subdivided so
/// stiff springs stay numerically stable.
const MAX_STEP_SECS: f64 = 0.004;

/// Displacement below which a slow spring counts as settled, in value units.
const REST_DISPLACEMENT: f64 = 0.01;

/// Velocity magnitude below which a slow spring counts as settled.
const REST_SPEED: f64 = 2.0;

/// Minimum stiffness; a zero-stiffness spring would never converge.
const MIN_STIFFNESS: f64 = 0.1;

/// Spring parameters: damping coefficient and stiffness (unit mass).
///
/// The default (damping 20, stiffness 90) is the tour's step-transition
/// spring: soft enough to read as movement, settled well under a second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    /// Velocity drag. Higher damping means less oscillation.
    pub damping: f64,
    /// Restoring force strength. Higher stiffness means faster response.
    pub stiffness: f64,
}

impl SpringParams {
    /// Creates a parameter set from a damping and stiffness pair.
    #[must_use]
    pub const fn new(damping: f64, stiffness: f64) -> Self {
        Self { damping, stiffness }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::new(20.0, 90.0)
    }
}

/// A damped harmonic oscillator over a raw `f64` position.
///
/// Integration is semi-implicit Euler with step subdivision. The spring is
/// considered at rest once both displacement and velocity drop under small
/// fixed thresholds, at which point the position snaps to the target exactly.
#[derive(Clone, Debug)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    damping: f64,
    stiffness: f64,
    at_rest: bool,
}

impl Spring {
    /// Creates a spring at `position` heading toward `target`.
    #[must_use]
    pub fn new(position: f64, target: f64, params: SpringParams) -> Self {
        let at_rest = (position - target).abs() < REST_DISPLACEMENT;
        Self {
            position: if at_rest { target } else { position },
            velocity: 0.0,
            target,
            damping: params.damping.max(0.0),
            stiffness: params.stiffness.max(MIN_STIFFNESS),
            at_rest,
        }
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled at its target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Changes the target and parameters, keeping position and velocity.
    ///
    /// Wakes the spring if the new target differs meaningfully from the
    /// current position.
    pub fn retarget(&mut self, target: f64, params: SpringParams) {
        self.target = target;
        self.damping = params.damping.max(0.0);
        self.stiffness = params.stiffness.max(MIN_STIFFNESS);
        if (self.position - target).abs() >= REST_DISPLACEMENT || self.velocity.abs() >= REST_SPEED
        {
            self.at_rest = false;
        }
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler: acceleration from the current position, then
        // position from the updated velocity.
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advances the spring by `dt`, subdividing large deltas.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < REST_DISPLACEMENT
            && self.velocity.abs() < REST_SPEED
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.advance(MS_16);
        }
    }

    #[test]
    fn reaches_target() {
        let mut spring = Spring::new(0.0, 100.0, SpringParams::default());
        simulate(&mut spring, 500);
        assert!(spring.is_at_rest(), "spring did not settle");
        assert!((spring.position() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reverse_direction_converges() {
        let mut spring = Spring::new(250.0, 40.0, SpringParams::new(100.0, 100.0));
        simulate(&mut spring, 1000);
        assert!((spring.position() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn starts_at_rest_when_already_at_target() {
        let spring = Spring::new(5.0, 5.0, SpringParams::default());
        assert!(spring.is_at_rest());
    }

    #[test]
    fn at_rest_advance_is_noop() {
        let mut spring = Spring::new(0.0, 1.0, SpringParams::default());
        simulate(&mut spring, 1000);
        assert!(spring.is_at_rest());
        let pos = spring.position();
        spring.advance(Duration::from_secs(5));
        assert!((spring.position() - pos).abs() < f64::EPSILON);
    }

    #[test]
    fn large_dt_is_subdivided() {
        let mut spring = Spring::new(0.0, 100.0, SpringParams::new(26.0, 170.0));
        spring.advance(Duration::from_secs(5));
        assert!(
            (spring.position() - 100.0).abs() < 0.1,
            "position: {}",
            spring.position()
        );
    }

    #[test]
    fn retarget_wakes_settled_spring() {
        let mut spring = Spring::new(0.0, 1.0, SpringParams::default());
        simulate(&mut spring, 1000);
        assert!(spring.is_at_rest());
        spring.retarget(50.0, SpringParams::default());
        assert!(!spring.is_at_rest());
        simulate(&mut spring, 1000);
        assert!((spring.position() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn retarget_to_current_position_stays_at_rest() {
        let mut spring = Spring::new(0.0, 1.0, SpringParams::default());
        simulate(&mut spring, 1000);
        spring.retarget(1.0, SpringParams::default());
        assert!(spring.is_at_rest());
    }

    #[test]
    fn high_damping_does_not_overshoot() {
        let mut spring = Spring::new(0.0, 100.0, SpringParams::new(100.0, 100.0));
        let mut max = 0.0_f64;
        for _ in 0..1000 {
            spring.advance(MS_16);
            max = max.max(spring.position());
        }
        assert!(max <= 100.0 + 0.5, "overdamped spring overshot: {max}");
    }

    #[test]
    fn degenerate_stiffness_is_clamped() {
        let mut spring = Spring::new(0.0, 10.0, SpringParams::new(1.0, 0.0));
        // Must not divide by zero or stall forever in a single advance call.
        spring.advance(Duration::from_secs(1));
        assert!(spring.position().is_finite());
    }
}
