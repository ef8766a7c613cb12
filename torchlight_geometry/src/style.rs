// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Insets;
use peniko::Color;

/// Shape policy of a spotlight cutout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpotlightShape {
    /// Rectangle with the style's corner radius.
    #[default]
    RoundedRect,
    /// Circle around the element, sized to its diagonal.
    Circle,
    /// Rectangle with fully rounded ends (radius = half height).
    Pill,
}

/// Fully resolved visual/geometry policy for one spotlight.
///
/// Instances come out of [`SpotlightStyle::resolve`]; every field holds a
/// concrete value. Per-edge padding is kept alongside the uniform padding
/// because the circle shape grows by the uniform value while the rectangular
/// shapes expand edge by edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotlightStyle {
    /// Uniform padding, used by the circle shape.
    pub padding: f64,
    /// Per-edge padding (x0 = left, y0 = top, x1 = right, y1 = bottom).
    pub insets: Insets,
    /// Corner radius for the rounded-rect shape.
    pub corner_radius: f64,
    /// Shape policy.
    pub shape: SpotlightShape,
    /// Width of the ring drawn around the cutout; 0 disables it.
    pub border_width: f64,
    /// Color of the ring.
    pub border_color: Color,
    /// Glow color around the cutout.
    pub glow_color: Color,
    /// Glow opacity; 0 disables the glow.
    pub glow_opacity: f64,
    /// Glow blur radius.
    pub glow_radius: f64,
    /// Backdrop color of the dimmed overlay.
    pub overlay_color: Color,
    /// Per-step spring damping override for the step-transition animation.
    pub spring_damping: Option<f64>,
    /// Per-step spring stiffness override for the step-transition animation.
    pub spring_stiffness: Option<f64>,
}

impl Default for SpotlightStyle {
    fn default() -> Self {
        Self {
            padding: 8.0,
            insets: Insets::uniform(8.0),
            corner_radius: 10.0,
            shape: SpotlightShape::RoundedRect,
            border_width: 0.0,
            border_color: Color::WHITE,
            glow_color: Color::WHITE,
            glow_opacity: 0.0,
            glow_radius: 0.0,
            overlay_color: Color::BLACK,
            spring_damping: None,
            spring_stiffness: None,
        }
    }
}

impl SpotlightStyle {
    /// Resolves a style from the precedence chain: built-in defaults, then
    /// the global config style, then the per-step style.
    ///
    /// Fields merge independently; a per-step style that only sets the border
    /// color inherits everything else from the global style or the defaults.
    #[must_use]
    pub fn resolve(global: &SpotlightStyleOverrides, step: &SpotlightStyleOverrides) -> Self {
        let mut style = Self::default();
        style.apply(global);
        style.apply(step);
        style
    }

    /// Applies one override layer onto this style, field by field.
    ///
    /// Within a layer, a uniform `padding` resets all four edges first, so
    /// edge-specific values in the same layer still win over it.
    pub fn apply(&mut self, overrides: &SpotlightStyleOverrides) {
        if let Some(padding) = overrides.padding {
            self.padding = padding;
            self.insets = Insets::uniform(padding);
        }
        if let Some(top) = overrides.padding_top {
            self.insets.y0 = top;
        }
        if let Some(right) = overrides.padding_right {
            self.insets.x1 = right;
        }
        if let Some(bottom) = overrides.padding_bottom {
            self.insets.y1 = bottom;
        }
        if let Some(left) = overrides.padding_left {
            self.insets.x0 = left;
        }
        if let Some(radius) = overrides.corner_radius {
            self.corner_radius = radius;
        }
        if let Some(shape) = overrides.shape {
            self.shape = shape;
        }
        if let Some(width) = overrides.border_width {
            self.border_width = width;
        }
        if let Some(color) = overrides.border_color {
            self.border_color = color;
        }
        if let Some(color) = overrides.glow_color {
            self.glow_color = color;
        }
        if let Some(opacity) = overrides.glow_opacity {
            self.glow_opacity = opacity;
        }
        if let Some(radius) = overrides.glow_radius {
            self.glow_radius = radius;
        }
        if let Some(color) = overrides.overlay_color {
            self.overlay_color = color;
        }
        if overrides.spring_damping.is_some() {
            self.spring_damping = overrides.spring_damping;
        }
        if overrides.spring_stiffness.is_some() {
            self.spring_stiffness = overrides.spring_stiffness;
        }
    }
}

/// Partial spotlight style; unset fields defer to the layer below.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpotlightStyleOverrides {
    /// Uniform padding on all edges.
    pub padding: Option<f64>,
    /// Top edge padding.
    pub padding_top: Option<f64>,
    /// Right edge padding.
    pub padding_right: Option<f64>,
    /// Bottom edge padding.
    pub padding_bottom: Option<f64>,
    /// Left edge padding.
    pub padding_left: Option<f64>,
    /// Corner radius for the rounded-rect shape.
    pub corner_radius: Option<f64>,
    /// Shape policy.
    pub shape: Option<SpotlightShape>,
    /// Ring width.
    pub border_width: Option<f64>,
    /// Ring color.
    pub border_color: Option<Color>,
    /// Glow color.
    pub glow_color: Option<Color>,
    /// Glow opacity.
    pub glow_opacity: Option<f64>,
    /// Glow blur radius.
    pub glow_radius: Option<f64>,
    /// Backdrop color.
    pub overlay_color: Option<Color>,
    /// Spring damping override for this step.
    pub spring_damping: Option<f64>,
    /// Spring stiffness override for this step.
    pub spring_stiffness: Option<f64>,
}

impl SpotlightStyleOverrides {
    /// Whether either spring parameter is overridden.
    #[must_use]
    pub fn has_spring_override(&self) -> bool {
        self.spring_damping.is_some() || self.spring_stiffness.is_some()
    }
}
