// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

/// A fixed-duration linear interpolation from one value to another.
///
/// Used for the overlay opacity fades, where a spring's overshoot would read
/// as flicker.
#[derive(Clone, Debug)]
pub struct Timing {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl Timing {
    /// Creates an animation from `from` to `to` over `duration`.
    ///
    /// `duration` must be non-zero; callers handle the jump case themselves.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// The end value.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.elapsed >= self.duration {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }

    /// Whether the animation has run its full duration.
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances the animation clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_linearly() {
        let mut t = Timing::new(10.0, 20.0, Duration::from_millis(100));
        assert!((t.value() - 10.0).abs() < 1e-12);
        t.advance(Duration::from_millis(25));
        assert!((t.value() - 12.5).abs() < 1e-9);
        t.advance(Duration::from_millis(75));
        assert!((t.value() - 20.0).abs() < 1e-12);
        assert!(t.is_done());
    }

    #[test]
    fn overrun_clamps_to_target() {
        let mut t = Timing::new(0.0, 1.0, Duration::from_millis(50));
        t.advance(Duration::from_secs(10));
        assert!((t.value() - 1.0).abs() < 1e-12);
        assert!(t.is_done());
    }

    #[test]
    fn descending_range() {
        let mut t = Timing::new(0.5, 0.0, Duration::from_millis(300));
        t.advance(Duration::from_millis(150));
        assert!((t.value() - 0.25).abs() < 1e-9);
    }
}
