// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Torchlight Overlay: the renderer-facing half of the tour.
//!
//! These are headless models of the two visual pieces of a tour: the dimmed
//! backdrop with its spotlight cutout, and the tooltip card. They consume a
//! [`SpotlightFrame`](torchlight_geometry::SpotlightFrame) snapshot each
//! frame and hold no tour state of their own; a renderer turns the resulting
//! path, colors, and placements into actual drawing with whatever backend it
//! has.
//!
//! - [`cutout_path`] builds the even-odd backdrop path with the spotlight
//!   hole.
//! - [`overlay_hit`] answers whether a touch at a point should reach the
//!   application underneath.
//! - [`place_tooltip`] chooses where the card goes relative to the target,
//!   and [`tooltip_opacity`]/[`tooltip_slide`] derive its entrance animation
//!   from the backdrop opacity.

mod cutout;
mod tooltip;

pub use cutout::{CUTOUT_FILL, OverlayHit, cutout_path, interaction_policy, overlay_hit};
pub use tooltip::{
    TOOLTIP_GAP, TOOLTIP_MARGIN, TooltipPlacement, place_tooltip, tooltip_opacity, tooltip_slide,
};
