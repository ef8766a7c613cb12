// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Torchlight Tour: the guided-tour orchestrator.
//!
//! This crate ties the rest of Torchlight together. A [`TourEngine`] owns
//! the step registry, the navigation state machine, and the animated
//! spotlight target; [`Zone`] bindings connect host elements to steps and
//! feed measurements in. Everything is headless and caller-driven: the host
//! pumps [`TourEngine::advance`] once per frame with the elapsed time,
//! dispatches the returned [`ZoneTask`]s to the matching zones, and renders
//! [`TourEngine::frame`] with whatever backend it has.
//!
//! ## Example
//!
//! ```rust
//! use core::time::Duration;
//! use torchlight_geometry::{Measurement, Viewport};
//! use torchlight_tour::{Step, StepKey, TourConfig, TourEngine};
//!
//! let mut engine = TourEngine::new(TourConfig::default(), Viewport::new(390.0, 800.0));
//! engine.register_step(Step::new("welcome").with_description("Hi!"));
//! engine.register_step(Step::new("profile").with_order(2.0));
//!
//! engine.start(None);
//! engine.update_step_layout(&StepKey::from("welcome"), Measurement::new(30.0, 300.0, 120.0, 40.0));
//!
//! // Pump until the spotlight settles on the padded element.
//! for _ in 0..600 {
//!     let _ = engine.advance(Duration::from_millis(16));
//! }
//! let frame = engine.frame();
//! assert!((frame.rect.x0 - 22.0).abs() < 0.1);
//! assert!((frame.opacity - 0.5).abs() < 1e-9);
//!
//! engine.next();
//! engine.next();
//! assert!(!engine.is_active());
//! ```
//!
//! Measurement, auto-scroll, and rendering live in the sibling crates:
//! [`torchlight_measure`] for probes, [`torchlight_scroll`] for bringing
//! off-screen elements into view, and `torchlight_overlay` for turning a
//! frame snapshot into a backdrop path and tooltip placement.

mod config;
mod engine;
mod step;
mod target;
mod timers;
mod zone;

pub use config::{
    CardContext, DEFAULT_BACKDROP_OPACITY, DEFAULT_TRACKING_RADIUS, OVERLAY_FADE, TRACKING_SPRING,
    TourConfig, TourLabels,
};
pub use engine::TourEngine;
pub use step::{Step, StepKey, ZoneHints};
pub use target::TargetGeometry;
pub use timers::ZoneTask;
pub use zone::{ZONE_SETTLE, Zone};
