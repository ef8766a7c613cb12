// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Torchlight Measure: the bridge between the host's layout system and the
//! tour engine's coordinate space.
//!
//! The host measures elements in screen space ([`WindowRect`], the usual
//! `x/y/width/height/pageX/pageY` primitive). The tour engine works in the
//! root container's space. This crate owns the reconciliation between the
//! two: subtract the container's screen origin from the element's, validate
//! the result, and hand back a [`Measurement`](torchlight_geometry::Measurement).
//!
//! Failure is non-fatal throughout. A probe that cannot produce a sample yet
//! (element unmounted, layout not done) just skips the cycle; an invalid
//! sample is dropped and the caller keeps its previous measurement. Both
//! outcomes are described by [`SampleError`] for logging and tests, and
//! nothing here panics or propagates.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use torchlight_measure::{ElementProbe, MeasurementBridge, WindowRect};
//!
//! struct Fixed(WindowRect);
//! impl ElementProbe for Fixed {
//!     fn window_rect(&self) -> Option<WindowRect> {
//!         Some(self.0)
//!     }
//! }
//!
//! let element = Fixed(WindowRect::new(120.0, 40.0, 30.0, 210.0));
//! let container = Fixed(WindowRect::new(390.0, 800.0, 0.0, 44.0));
//! let bridge = MeasurementBridge::new(&element, &container);
//!
//! let m = bridge.sample().unwrap();
//! assert_eq!((m.x, m.y), (30.0, 166.0));
//! ```

use kurbo::Point;
use thiserror::Error;
use torchlight_geometry::{Measurement, Viewport};

/// A screen-space sample of one element, as the host primitive reports it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowRect {
    /// Element width.
    pub width: f64,
    /// Element height.
    pub height: f64,
    /// Left edge relative to the screen.
    pub page_x: f64,
    /// Top edge relative to the screen.
    pub page_y: f64,
}

impl WindowRect {
    /// Creates a screen-space sample.
    #[must_use]
    pub const fn new(width: f64, height: f64, page_x: f64, page_y: f64) -> Self {
        Self {
            width,
            height,
            page_x,
            page_y,
        }
    }

    /// Checks the sample for the rejection conditions of [`SampleError`].
    ///
    /// Returns the first failed condition, or `Ok` for a usable sample.
    pub fn validate(&self) -> Result<(), SampleError> {
        if !(self.page_x.is_finite()
            && self.page_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
        {
            return Err(SampleError::NonFinite);
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SampleError::NonPositiveSize);
        }
        Ok(())
    }
}

/// Why a sampling cycle produced no measurement.
///
/// All variants are recoverable; they exist so skipped cycles can be logged
/// and asserted on, not to be propagated to the host.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    /// The element reported a zero or negative width/height.
    #[error("element size is not positive")]
    NonPositiveSize,
    /// A coordinate was NaN or infinite.
    #[error("sample contains a non-finite coordinate")]
    NonFinite,
    /// The element handle cannot be measured yet.
    #[error("element is not measurable yet")]
    MissingElement,
    /// The root container handle cannot be measured yet.
    #[error("root container is not measurable yet")]
    MissingContainer,
}

/// A handle onto one host element that can be measured.
///
/// Implemented by the host for every tour zone and for the tour's root
/// container. Both methods are snapshots of the host's current layout; they
/// may return `None` whenever the element is not mounted or not laid out.
pub trait ElementProbe {
    /// Screen-space rectangle of the element, if currently measurable.
    fn window_rect(&self) -> Option<WindowRect>;

    /// Origin of the element within its scroll container's *content*, for
    /// scroll targeting. Hosts without a scroll container can leave the
    /// default.
    fn content_origin(&self) -> Option<Point> {
        None
    }
}

/// Source of the current viewport dimensions.
pub trait ViewportSource {
    /// Current viewport size of the tour's root container.
    fn viewport(&self) -> Viewport;
}

/// Converts an element sample into the container's coordinate space.
///
/// Both rectangles are screen-space; the result is the element rectangle with
/// the container's screen origin subtracted, validated per [`SampleError`].
pub fn relative_to(element: WindowRect, container: WindowRect) -> Result<Measurement, SampleError> {
    element.validate()?;
    if !(container.page_x.is_finite() && container.page_y.is_finite()) {
        return Err(SampleError::NonFinite);
    }
    let m = Measurement::new(
        element.page_x - container.page_x,
        element.page_y - container.page_y,
        element.width,
        element.height,
    );
    debug_assert!(m.is_valid());
    Ok(m)
}

/// One element/container probe pair, offering the two query modes of the
/// measurement bridge.
///
/// The bridge is stateless; zone bindings construct one per call site from
/// the probes they own.
#[derive(Debug)]
pub struct MeasurementBridge<'a, E: ?Sized, C: ?Sized> {
    element: &'a E,
    container: &'a C,
}

impl<'a, E, C> MeasurementBridge<'a, E, C>
where
    E: ElementProbe + ?Sized,
    C: ElementProbe + ?Sized,
{
    /// Creates a bridge over an element probe and the root-container probe.
    #[must_use]
    pub fn new(element: &'a E, container: &'a C) -> Self {
        Self { element, container }
    }

    /// One-shot sample, used on mount, on layout, and around scrolling.
    ///
    /// Returns the rejection reason instead of logging so the caller can
    /// decide whether a retry is worth scheduling.
    pub fn sample(&self) -> Result<Measurement, SampleError> {
        let element = self
            .element
            .window_rect()
            .ok_or(SampleError::MissingElement)?;
        let container = self
            .container
            .window_rect()
            .ok_or(SampleError::MissingContainer)?;
        relative_to(element, container)
    }

    /// Per-frame sample for continuous tracking.
    ///
    /// Invalid or unavailable samples are dropped silently (trace-logged);
    /// the caller keeps its previous measurement until a valid one arrives.
    pub fn sample_frame(&self) -> Option<Measurement> {
        match self.sample() {
            Ok(m) => Some(m),
            Err(err) => {
                tracing::trace!(%err, "skipping frame sample");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(Option<WindowRect>);

    impl ElementProbe for Probe {
        fn window_rect(&self) -> Option<WindowRect> {
            self.0
        }
    }

    const CONTAINER: WindowRect = WindowRect::new(390.0, 800.0, 0.0, 44.0);

    #[test]
    fn sample_subtracts_container_origin() {
        let element = Probe(Some(WindowRect::new(120.0, 40.0, 30.0, 210.0)));
        let container = Probe(Some(CONTAINER));
        let m = MeasurementBridge::new(&element, &container)
            .sample()
            .unwrap();
        assert_eq!(m, Measurement::new(30.0, 166.0, 120.0, 40.0));
    }

    #[test]
    fn missing_element_is_reported() {
        let element = Probe(None);
        let container = Probe(Some(CONTAINER));
        let err = MeasurementBridge::new(&element, &container)
            .sample()
            .unwrap_err();
        assert_eq!(err, SampleError::MissingElement);
    }

    #[test]
    fn missing_container_is_reported() {
        let element = Probe(Some(WindowRect::new(10.0, 10.0, 0.0, 0.0)));
        let container = Probe(None);
        let err = MeasurementBridge::new(&element, &container)
            .sample()
            .unwrap_err();
        assert_eq!(err, SampleError::MissingContainer);
    }

    #[test]
    fn rejects_non_positive_size() {
        let element = Probe(Some(WindowRect::new(-5.0, 10.0, 0.0, 0.0)));
        let container = Probe(Some(CONTAINER));
        let err = MeasurementBridge::new(&element, &container)
            .sample()
            .unwrap_err();
        assert_eq!(err, SampleError::NonPositiveSize);
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let element = Probe(Some(WindowRect::new(10.0, 10.0, f64::NAN, 0.0)));
        let container = Probe(Some(CONTAINER));
        let err = MeasurementBridge::new(&element, &container)
            .sample()
            .unwrap_err();
        assert_eq!(err, SampleError::NonFinite);

        let element = Probe(Some(WindowRect::new(10.0, 10.0, 0.0, 0.0)));
        let container = Probe(Some(WindowRect::new(390.0, 800.0, f64::INFINITY, 0.0)));
        let err = MeasurementBridge::new(&element, &container)
            .sample()
            .unwrap_err();
        assert_eq!(err, SampleError::NonFinite);
    }

    #[test]
    fn frame_sample_swallows_failures() {
        let element = Probe(None);
        let container = Probe(Some(CONTAINER));
        assert!(
            MeasurementBridge::new(&element, &container)
                .sample_frame()
                .is_none()
        );

        let element = Probe(Some(WindowRect::new(50.0, 20.0, 5.0, 100.0)));
        let m = MeasurementBridge::new(&element, &container)
            .sample_frame()
            .unwrap();
        assert_eq!(m, Measurement::new(5.0, 56.0, 50.0, 20.0));
    }
}
