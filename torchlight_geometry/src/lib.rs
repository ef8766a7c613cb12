// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Torchlight Geometry: spotlight geometry resolution and style policy.
//!
//! This crate holds the pure, stateless half of the tour engine:
//! - [`Measurement`]: a validated element rectangle in root-container space.
//! - [`SpotlightStyle`] and [`SpotlightStyleOverrides`]: the resolved visual
//!   policy for one spotlight and its field-wise merge chain
//!   (built-in defaults, then the global style, then the per-step style).
//! - [`resolve_spotlight`]: the shape-policy geometry formulas that turn a
//!   measurement plus a style into the rectangle the overlay cuts out.
//!
//! Everything here is a pure function of its inputs. The orchestration,
//! animation, and host plumbing live in the other Torchlight crates.
//!
//! ## Example
//!
//! ```rust
//! use torchlight_geometry::{
//!     Measurement, SpotlightStyle, SpotlightStyleOverrides, Viewport, resolve_spotlight,
//! };
//!
//! let measurement = Measurement::new(100.0, 200.0, 120.0, 48.0);
//! let style = SpotlightStyle::resolve(
//!     &SpotlightStyleOverrides::default(),
//!     &SpotlightStyleOverrides::default(),
//! );
//! let viewport = Viewport::new(390.0, 844.0);
//!
//! let geo = resolve_spotlight(&measurement, &style, viewport);
//! assert!(geo.rect.width() >= 120.0);
//! ```

mod measurement;
mod resolve;
mod style;

pub use measurement::Measurement;
pub use resolve::{MIN_SPOTLIGHT_SIDE, SpotlightFrame, SpotlightGeometry, resolve_spotlight};
pub use style::{SpotlightShape, SpotlightStyle, SpotlightStyleOverrides};

/// Viewport dimensions of the tour's root container, in device units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport from a width and height.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
