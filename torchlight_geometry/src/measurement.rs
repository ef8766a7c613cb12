// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// An element rectangle in the coordinate space of the tour's root container.
///
/// This is the unit of exchange between zone bindings and the orchestrator:
/// not screen space and not scroll-content space, but the overlay's own space,
/// so the cutout can be drawn from it directly.
///
/// A measurement is only meaningful when [`Measurement::is_valid`] holds;
/// consumers drop invalid samples and keep whatever they had before.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// Left edge, relative to the root container.
    pub x: f64,
    /// Top edge, relative to the root container.
    pub y: f64,
    /// Element width.
    pub width: f64,
    /// Element height.
    pub height: f64,
}

impl Measurement {
    /// Creates a measurement from origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether this sample is usable: all fields finite, size positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Center point of the measured rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The measurement as a [`Rect`].
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}
