// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use torchlight_geometry::Viewport;

/// Minimum distance between the card and the viewport's left/right edges.
pub const TOOLTIP_MARGIN: f64 = 12.0;

/// Vertical gap between the card and the spotlight rectangle.
pub const TOOLTIP_GAP: f64 = 20.0;

/// Where the tooltip card goes for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPlacement {
    /// Top-left corner of the card.
    pub origin: Point,
    /// Whether the card sits above the target (below otherwise).
    pub above: bool,
}

/// Chooses the card position relative to the spotlight rectangle.
///
/// The card goes above the target when there is more room above than below
/// and the card fits there with headroom, or when the target sits in the
/// lower half of the viewport and the card still fits above. Horizontally it
/// is centered on the target and clamped to [`TOOLTIP_MARGIN`] from either
/// edge.
#[must_use]
pub fn place_tooltip(target: Rect, tooltip: Size, viewport: Viewport) -> TooltipPlacement {
    let space_above = target.y0;
    let space_below = viewport.height - target.y1;

    let above = (space_above > space_below && space_above > tooltip.height + 30.0)
        || (target.y0 > viewport.height / 2.0 && space_above > tooltip.height + 20.0);

    let left = (target.center().x - tooltip.width / 2.0)
        .min(viewport.width - tooltip.width - TOOLTIP_MARGIN)
        .max(TOOLTIP_MARGIN);

    let top = if above {
        (target.y0 - tooltip.height - TOOLTIP_GAP).max(10.0)
    } else {
        target.y1 + TOOLTIP_GAP
    };

    TooltipPlacement {
        origin: Point::new(left, top),
        above,
    }
}

/// Card opacity derived from the backdrop opacity.
///
/// Remaps `[0, 0.6]` to `[0, 1]`, clamped: the card reaches full opacity
/// before the backdrop finishes fading in, so it never looks translucent
/// during the transition.
#[must_use]
pub fn tooltip_opacity(backdrop_opacity: f64) -> f64 {
    (backdrop_opacity / 0.6).clamp(0.0, 1.0)
}

/// Entrance slide offset (translate-y) for a given card opacity: 10 units at
/// fully transparent, 0 at fully opaque.
#[must_use]
pub fn tooltip_slide(opacity: f64) -> f64 {
    10.0 * (1.0 - opacity.clamp(0.0, 1.0))
}
