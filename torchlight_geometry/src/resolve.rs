// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use crate::Viewport;
use crate::measurement::Measurement;
use crate::style::{SpotlightShape, SpotlightStyle};

/// Minimum side length of a resolved spotlight, to avoid degenerate
/// highlights on tiny elements.
pub const MIN_SPOTLIGHT_SIDE: f64 = 40.0;

/// The geometry half of a spotlight: where the cutout sits and how round it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotlightGeometry {
    /// Cutout rectangle in root-container space.
    pub rect: Rect,
    /// Cutout corner radius.
    pub corner_radius: f64,
}

/// A renderer-facing snapshot of the live spotlight state.
///
/// This is [`SpotlightGeometry`] plus the independently animated overlay
/// scalars. The orchestrator produces one per frame; the overlay and tooltip
/// consume it without touching any tour state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotlightFrame {
    /// Cutout rectangle in root-container space.
    pub rect: Rect,
    /// Cutout corner radius.
    pub corner_radius: f64,
    /// Backdrop opacity; trends to 0 while no step is active.
    pub opacity: f64,
    /// Width of the ring around the cutout.
    pub border_width: f64,
}

/// Resolves the spotlight geometry for one measurement under a style policy.
///
/// Shape formulas:
/// - rounded-rect: the measurement expanded by per-edge padding, with the
///   style's corner radius;
/// - circle: centered on the measurement, radius = half the measurement's
///   diagonal plus the uniform padding, corner radius = that radius;
/// - pill: expanded like rounded-rect, corner radius = half the expanded
///   height.
///
/// The result is then clamped into the viewport and each side is raised to
/// [`MIN_SPOTLIGHT_SIDE`]. Pure function: identical inputs give identical
/// output.
#[must_use]
pub fn resolve_spotlight(
    measurement: &Measurement,
    style: &SpotlightStyle,
    viewport: Viewport,
) -> SpotlightGeometry {
    let insets = style.insets;
    let (mut x, mut y, mut w, mut h, radius) = match style.shape {
        SpotlightShape::Circle => {
            let center = measurement.center();
            let diagonal = (measurement.width * measurement.width
                + measurement.height * measurement.height)
                .sqrt();
            let radius = diagonal / 2.0 + style.padding;
            (
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
                radius,
            )
        }
        SpotlightShape::Pill => {
            let h = measurement.height + insets.y0 + insets.y1;
            (
                measurement.x - insets.x0,
                measurement.y - insets.y0,
                measurement.width + insets.x0 + insets.x1,
                h,
                h / 2.0,
            )
        }
        SpotlightShape::RoundedRect => (
            measurement.x - insets.x0,
            measurement.y - insets.y0,
            measurement.width + insets.x0 + insets.x1,
            measurement.height + insets.y0 + insets.y1,
            style.corner_radius,
        ),
    };

    // Clamp the origin into the viewport, then the size to the space that
    // remains from the clamped origin.
    x = x.min(viewport.width - w).max(0.0);
    y = y.min(viewport.height - h).max(0.0);
    w = w.min(viewport.width - x);
    h = h.min(viewport.height - y);

    w = w.max(MIN_SPOTLIGHT_SIDE);
    h = h.max(MIN_SPOTLIGHT_SIDE);

    SpotlightGeometry {
        rect: Rect::new(x, y, x + w, y + h),
        corner_radius: radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SpotlightStyleOverrides;

    const VIEWPORT: Viewport = Viewport::new(390.0, 844.0);

    fn style_with(overrides: SpotlightStyleOverrides) -> SpotlightStyle {
        SpotlightStyle::resolve(&overrides, &SpotlightStyleOverrides::default())
    }

    #[test]
    fn rounded_rect_expands_by_edge_padding() {
        let style = style_with(SpotlightStyleOverrides {
            padding: Some(10.0),
            padding_left: Some(4.0),
            corner_radius: Some(14.0),
            ..Default::default()
        });
        let m = Measurement::new(100.0, 200.0, 80.0, 50.0);
        let geo = resolve_spotlight(&m, &style, VIEWPORT);

        // x = 100-4, y = 200-10, w = 80+4+10, h = 50+10+10.
        assert_eq!(geo.rect, Rect::new(96.0, 190.0, 190.0, 260.0));
        assert!((geo.corner_radius - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn circle_bounding_box_is_square() {
        let style = style_with(SpotlightStyleOverrides {
            shape: Some(SpotlightShape::Circle),
            ..Default::default()
        });
        let m = Measurement::new(150.0, 300.0, 60.0, 30.0);
        let geo = resolve_spotlight(&m, &style, VIEWPORT);

        assert!(
            (geo.rect.width() - geo.rect.height()).abs() < 1e-9,
            "circle bounding box must be square"
        );
        // Radius = half diagonal + uniform padding.
        let expected_radius = (60.0_f64 * 60.0 + 30.0 * 30.0).sqrt() / 2.0 + 8.0;
        assert!((geo.corner_radius - expected_radius).abs() < 1e-9);
        assert!((geo.rect.width() - expected_radius * 2.0).abs() < 1e-9);
        // Centered on the element.
        assert!((geo.rect.center().x - 180.0).abs() < 1e-9);
        assert!((geo.rect.center().y - 315.0).abs() < 1e-9);
    }

    #[test]
    fn pill_radius_is_half_height() {
        let style = style_with(SpotlightStyleOverrides {
            shape: Some(SpotlightShape::Pill),
            padding: Some(6.0),
            ..Default::default()
        });
        let m = Measurement::new(50.0, 400.0, 200.0, 44.0);
        let geo = resolve_spotlight(&m, &style, VIEWPORT);

        assert!((geo.corner_radius - geo.rect.height() / 2.0).abs() < 1e-9);
        assert!((geo.rect.height() - 56.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_into_viewport() {
        let style = style_with(SpotlightStyleOverrides::default());

        // Element hanging off the top-left corner.
        let m = Measurement::new(-30.0, -20.0, 50.0, 50.0);
        let geo = resolve_spotlight(&m, &style, VIEWPORT);
        assert!(geo.rect.x0 >= 0.0);
        assert!(geo.rect.y0 >= 0.0);

        // Element hanging off the bottom-right corner.
        let m = Measurement::new(370.0, 830.0, 50.0, 50.0);
        let geo = resolve_spotlight(&m, &style, VIEWPORT);
        assert!(geo.rect.x1 <= VIEWPORT.width + 1e-9);
        assert!(geo.rect.y1 <= VIEWPORT.height + 1e-9);
    }

    #[test]
    fn enforces_minimum_side() {
        let style = style_with(SpotlightStyleOverrides {
            padding: Some(0.0),
            ..Default::default()
        });
        let m = Measurement::new(100.0, 100.0, 4.0, 6.0);
        let geo = resolve_spotlight(&m, &style, VIEWPORT);
        assert!(geo.rect.width() >= MIN_SPOTLIGHT_SIDE);
        assert!(geo.rect.height() >= MIN_SPOTLIGHT_SIDE);
    }

    #[test]
    fn deterministic() {
        let style = style_with(SpotlightStyleOverrides {
            shape: Some(SpotlightShape::Circle),
            padding: Some(12.0),
            ..Default::default()
        });
        let m = Measurement::new(33.0, 77.0, 120.0, 48.0);
        let a = resolve_spotlight(&m, &style, VIEWPORT);
        let b = resolve_spotlight(&m, &style, VIEWPORT);
        assert_eq!(a, b);
    }
}
