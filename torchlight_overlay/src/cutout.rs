// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Point, Rect, RoundedRect, Shape};
use peniko::Fill;
use torchlight_geometry::{SpotlightFrame, Viewport};

/// Fill rule for the backdrop path: even-odd makes the inner subpath a hole.
pub const CUTOUT_FILL: Fill = Fill::EvenOdd;

/// Curve flattening tolerance for the cutout path.
const PATH_TOLERANCE: f64 = 0.1;

/// Builds the backdrop path: a full-viewport rectangle plus a rounded-rect
/// subpath at the spotlight. Filled with [`CUTOUT_FILL`], the spotlight
/// becomes a transparent hole.
///
/// The corner radius is clamped to half the smaller side here, at build
/// time, so mid-animation frames where the radius momentarily exceeds the
/// shrinking rectangle still produce a well-formed shape.
#[must_use]
pub fn cutout_path(viewport: Viewport, frame: &SpotlightFrame) -> BezPath {
    let mut path = Rect::new(0.0, 0.0, viewport.width, viewport.height).to_path(PATH_TOLERANCE);

    let radius = frame
        .corner_radius
        .min(frame.rect.width() / 2.0)
        .min(frame.rect.height() / 2.0)
        .max(0.0);
    let hole = RoundedRect::from_rect(frame.rect, radius);
    path.extend(hole.path_elements(PATH_TOLERANCE));
    path
}

/// What the overlay does with a touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayHit {
    /// The touch reaches the application underneath.
    PassThrough,
    /// The overlay consumes the touch.
    Blocked,
}

/// Resolves the prevent-interaction policy: the per-step override wins over
/// the global config, and an unset policy blocks.
#[must_use]
pub fn interaction_policy(step: Option<bool>, global: Option<bool>) -> bool {
    step.or(global).unwrap_or(true)
}

/// Decides whether a touch at `point` passes through the overlay.
///
/// With `prevent_interaction` off the overlay is purely visual and every
/// touch passes. With it on, the dimmed area always blocks; the cutout
/// passes only when the active step is `clickable`. The cutout's touch area
/// is its bounding rectangle, ignoring the rounded corners.
#[must_use]
pub fn overlay_hit(
    point: Point,
    frame: &SpotlightFrame,
    clickable: bool,
    prevent_interaction: bool,
) -> OverlayHit {
    if !prevent_interaction {
        return OverlayHit::PassThrough;
    }
    if frame.rect.contains(point) && clickable {
        OverlayHit::PassThrough
    } else {
        OverlayHit::Blocked
    }
}
