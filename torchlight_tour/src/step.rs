// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use torchlight_geometry::{SpotlightShape, SpotlightStyleOverrides};

/// Identity of a tour step.
///
/// Keys are cheap to clone and compare; zones, the engine's registry, and the
/// timer queue all pass them around by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepKey(Arc<str>);

impl StepKey {
    /// Creates a key from any string-ish value.
    #[must_use]
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StepKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for StepKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape and radius hints a zone supplies for its element.
///
/// These sit below the style override layers: a step or global style that
/// sets the same field wins over the hint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoneHints {
    /// Preferred cutout shape for this element.
    pub shape: Option<SpotlightShape>,
    /// Corner radius matching the element's own rounding; also used by
    /// continuous tracking.
    pub corner_radius: Option<f64>,
}

/// One registered tour step.
///
/// A step is pure data: what to highlight (via the zone that registered it),
/// what the card says, where the step sorts, and how its spotlight deviates
/// from the tour-wide style.
#[derive(Clone, Debug)]
pub struct Step {
    /// Unique key; re-registering a key replaces the step's definition.
    pub key: StepKey,
    /// Optional short title shown on the card.
    pub name: Option<String>,
    /// Card body text.
    pub description: String,
    /// Explicit sort position. When any registered step carries one, steps
    /// are ordered by this value ascending, with unset treated as 0.
    pub order: Option<f64>,
    /// Whether the highlighted element stays tappable through the overlay.
    pub clickable: bool,
    /// Per-step override of the overlay's touch blocking; unset defers to
    /// the tour config.
    pub prevent_interaction: Option<bool>,
    /// Per-step spotlight style overrides.
    pub spotlight: SpotlightStyleOverrides,
    /// Shape hints from the zone markup.
    pub hints: ZoneHints,
}

impl Step {
    /// Creates a step with the given key and no card text, ordering, or
    /// style overrides.
    #[must_use]
    pub fn new(key: impl Into<StepKey>) -> Self {
        Self {
            key: key.into(),
            name: None,
            description: String::new(),
            order: None,
            clickable: false,
            prevent_interaction: None,
            spotlight: SpotlightStyleOverrides::default(),
            hints: ZoneHints::default(),
        }
    }

    /// Sets the card body text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the card title.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the explicit sort position.
    #[must_use]
    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }

    /// Marks the highlighted element as tappable through the overlay.
    #[must_use]
    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    /// Sets the per-step spotlight style overrides.
    #[must_use]
    pub fn with_spotlight(mut self, spotlight: SpotlightStyleOverrides) -> Self {
        self.spotlight = spotlight;
        self
    }

    /// Sets the zone shape hints.
    #[must_use]
    pub fn with_hints(mut self, hints: ZoneHints) -> Self {
        self.hints = hints;
        self
    }

    /// The step's style override layer with zone hints folded in.
    ///
    /// Hints only fill fields the step's own overrides leave unset, so
    /// explicit style always wins over markup hints.
    #[must_use]
    pub fn style_overrides(&self) -> SpotlightStyleOverrides {
        let mut overrides = self.spotlight;
        if overrides.shape.is_none() {
            overrides.shape = self.hints.shape;
        }
        if overrides.corner_radius.is_none() {
            overrides.corner_radius = self.hints.corner_radius;
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_through_string_types() {
        let a = StepKey::from("welcome");
        let b = StepKey::from(String::from("welcome"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "welcome");
        assert_eq!(a.to_string(), "welcome");
    }

    #[test]
    fn hints_fill_unset_style_fields_only() {
        let step = Step::new("profile")
            .with_spotlight(SpotlightStyleOverrides {
                corner_radius: Some(24.0),
                ..Default::default()
            })
            .with_hints(ZoneHints {
                shape: Some(SpotlightShape::Circle),
                corner_radius: Some(6.0),
            });

        let overrides = step.style_overrides();
        assert_eq!(overrides.shape, Some(SpotlightShape::Circle));
        // Explicit style beats the hint.
        assert_eq!(overrides.corner_radius, Some(24.0));
    }

    #[test]
    fn builder_defaults() {
        let step = Step::new("settings");
        assert!(!step.clickable);
        assert!(step.order.is_none());
        assert!(step.prevent_interaction.is_none());
        assert!(step.description.is_empty());
    }
}
