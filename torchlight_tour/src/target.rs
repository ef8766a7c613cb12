// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::Rect;
use torchlight_geometry::{Measurement, SpotlightFrame, SpotlightGeometry};
use torchlight_spring::{AnimatedScalar, SpringParams};

/// The live animated state of the spotlight.
///
/// Six scalar cells, one per visual degree of freedom. Position, size, corner
/// radius, and border width are spring-driven so retargets mid-flight chain
/// smoothly; the backdrop opacity is timing-driven so fades take a fixed
/// duration regardless of distance. All cells advance together from
/// [`TargetGeometry::advance`] and [`TargetGeometry::frame`] snapshots them
/// for the renderer.
#[derive(Clone, Debug)]
pub struct TargetGeometry {
    x: AnimatedScalar,
    y: AnimatedScalar,
    width: AnimatedScalar,
    height: AnimatedScalar,
    corner_radius: AnimatedScalar,
    border_width: AnimatedScalar,
    opacity: AnimatedScalar,
}

impl Default for TargetGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetGeometry {
    /// Creates a target at the origin with everything at zero, overlay fully
    /// transparent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: AnimatedScalar::new(0.0),
            y: AnimatedScalar::new(0.0),
            width: AnimatedScalar::new(0.0),
            height: AnimatedScalar::new(0.0),
            corner_radius: AnimatedScalar::new(0.0),
            border_width: AnimatedScalar::new(0.0),
            opacity: AnimatedScalar::new(0.0),
        }
    }

    /// Springs the spotlight toward a resolved geometry.
    pub fn spring_toward(
        &mut self,
        geometry: SpotlightGeometry,
        border_width: f64,
        params: SpringParams,
    ) {
        self.x.spring_to(geometry.rect.x0, params);
        self.y.spring_to(geometry.rect.y0, params);
        self.width.spring_to(geometry.rect.width(), params);
        self.height.spring_to(geometry.rect.height(), params);
        self.corner_radius.spring_to(geometry.corner_radius, params);
        self.border_width.spring_to(border_width, params);
    }

    /// Springs the spotlight toward a raw element rectangle.
    ///
    /// Continuous tracking follows the element itself, not the padded
    /// geometry; the one-shot layout path re-applies the full style whenever
    /// it fires.
    pub fn track(&mut self, measurement: &Measurement, corner_radius: f64, params: SpringParams) {
        self.x.spring_to(measurement.x, params);
        self.y.spring_to(measurement.y, params);
        self.width.spring_to(measurement.width, params);
        self.height.spring_to(measurement.height, params);
        self.corner_radius.spring_to(corner_radius, params);
    }

    /// Fades the backdrop to `opacity` over `duration`.
    pub fn fade_to(&mut self, opacity: f64, duration: Duration) {
        self.opacity.timing_to(opacity, duration);
    }

    /// Advances every cell by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.x.advance(dt);
        self.y.advance(dt);
        self.width.advance(dt);
        self.height.advance(dt);
        self.corner_radius.advance(dt);
        self.border_width.advance(dt);
        self.opacity.advance(dt);
    }

    /// Whether every cell has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.x.is_settled()
            && self.y.is_settled()
            && self.width.is_settled()
            && self.height.is_settled()
            && self.corner_radius.is_settled()
            && self.border_width.is_settled()
            && self.opacity.is_settled()
    }

    /// Snapshot of the current values for the renderer.
    #[must_use]
    pub fn frame(&self) -> SpotlightFrame {
        let x = self.x.value();
        let y = self.y.value();
        SpotlightFrame {
            rect: Rect::new(x, y, x + self.width.value(), y + self.height.value()),
            corner_radius: self.corner_radius.value(),
            opacity: self.opacity.value(),
            border_width: self.border_width.value(),
        }
    }
}
