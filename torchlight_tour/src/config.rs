// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use torchlight_geometry::SpotlightStyleOverrides;
use torchlight_spring::SpringParams;

use crate::step::{Step, StepKey};

/// Backdrop opacity while a step is active, unless configured otherwise.
pub const DEFAULT_BACKDROP_OPACITY: f64 = 0.5;

/// Duration of the overlay's fade-in and fade-out.
pub const OVERLAY_FADE: Duration = Duration::from_millis(300);

/// Spring used by continuous per-frame tracking when the config sets none.
/// Stiffer than the step-transition default so the highlight stays glued to
/// a moving element instead of trailing it.
pub const TRACKING_SPRING: SpringParams = SpringParams::new(100.0, 100.0);

/// Corner radius used by continuous tracking when the zone gives no hint.
pub const DEFAULT_TRACKING_RADIUS: f64 = 10.0;

/// Button labels for the tooltip card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TourLabels {
    /// Advance button on every step but the last.
    pub next: String,
    /// Back button.
    pub previous: String,
    /// Advance button on the last step.
    pub finish: String,
    /// Dismiss button.
    pub skip: String,
}

impl Default for TourLabels {
    fn default() -> Self {
        Self {
            next: "Next".into(),
            previous: "Previous".into(),
            finish: "Finish".into(),
            skip: "Skip".into(),
        }
    }
}

/// Tour-wide configuration.
#[derive(Clone, Debug, Default)]
pub struct TourConfig {
    /// Spring parameters for step transitions; unset uses the
    /// [`SpringParams`] default. Also replaces [`TRACKING_SPRING`] for
    /// continuous tracking when set.
    pub spring: Option<SpringParams>,
    /// Whether the overlay blocks touches; unset blocks. Steps can override
    /// per step.
    pub prevent_interaction: Option<bool>,
    /// Backdrop opacity while a step is active.
    pub backdrop_opacity: Option<f64>,
    /// Card button labels.
    pub labels: TourLabels,
    /// Tour-wide spotlight style overrides; per-step overrides win.
    pub spotlight: SpotlightStyleOverrides,
}

impl TourConfig {
    /// The effective backdrop opacity.
    #[must_use]
    pub fn backdrop_opacity(&self) -> f64 {
        self.backdrop_opacity.unwrap_or(DEFAULT_BACKDROP_OPACITY)
    }
}

/// Everything a tooltip card needs to render the active step.
#[derive(Clone, Copy, Debug)]
pub struct CardContext<'a> {
    /// The active step.
    pub step: &'a Step,
    /// Zero-based position of the step in the resolved order.
    pub index: usize,
    /// Number of steps in the resolved order.
    pub total: usize,
    /// Button labels from the tour config.
    pub labels: &'a TourLabels,
}

impl CardContext<'_> {
    /// Whether the active step is the first in order.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Whether the active step is the last in order.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }

    /// Label for the advance button: "finish" on the last step, "next"
    /// elsewhere.
    #[must_use]
    pub fn advance_label(&self) -> &str {
        if self.is_last() {
            &self.labels.finish
        } else {
            &self.labels.next
        }
    }

    /// The active step's key.
    #[must_use]
    pub fn key(&self) -> &StepKey {
        &self.step.key
    }
}
