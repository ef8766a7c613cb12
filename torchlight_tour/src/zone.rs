// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use torchlight_geometry::Measurement;
use torchlight_measure::{ElementProbe, MeasurementBridge};
use torchlight_scroll::{AutoScrollCoordinator, RETRY_BASE_DELAY, ScrollControl, ScrollOutcome};

use crate::engine::TourEngine;
use crate::step::{Step, StepKey};
use crate::timers::ZoneTask;

/// Delay between activation and the one-shot settle measurement, giving the
/// host's layout a beat to finish.
pub const ZONE_SETTLE: Duration = Duration::from_millis(50);

/// Movement threshold below which a tracking sample is not worth
/// re-springing, in device units.
const TRACK_EPSILON: f64 = 0.5;

/// Binds one host element to one tour step.
///
/// The zone owns the step definition, the element probe, and the auto-scroll
/// coordinator for that element. It pushes everything into the engine
/// through explicit calls; the expected wiring from the host is:
///
/// - [`Zone::mount`] / [`Zone::unmount`] with the element's lifecycle;
/// - [`Zone::activate`] when [`TourEngine::current_key`] becomes this zone's
///   key;
/// - [`Zone::layout`] whenever the host reports a layout change;
/// - [`Zone::frame`] once per frame while active;
/// - [`Zone::handle_task`] for every task [`TourEngine::advance`] returns
///   whose key matches.
#[derive(Debug)]
pub struct Zone<E> {
    step: Step,
    element: E,
    coordinator: AutoScrollCoordinator,
    last_tracked: Option<Measurement>,
}

impl<E: ElementProbe> Zone<E> {
    /// Creates a zone binding a step to an element probe.
    #[must_use]
    pub fn new(step: Step, element: E) -> Self {
        Self {
            step,
            element,
            coordinator: AutoScrollCoordinator::default(),
            last_tracked: None,
        }
    }

    /// The bound step's key.
    #[must_use]
    pub fn key(&self) -> &StepKey {
        &self.step.key
    }

    /// The bound step definition.
    #[must_use]
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// The element probe.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Whether this zone's auto-scroll is in flight (tracking suspended).
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.coordinator.is_scrolling()
    }

    /// Registers the step when the element mounts.
    pub fn mount(&self, engine: &mut TourEngine) {
        engine.register_step(self.step.clone());
    }

    /// Unregisters the step when the element unmounts.
    pub fn unmount(&self, engine: &mut TourEngine) {
        engine.unregister_step(&self.step.key);
    }

    /// Kicks off the activation flow once this zone's step becomes current:
    /// a settle measurement after [`ZONE_SETTLE`] and the first auto-scroll
    /// evaluation after its base delay.
    pub fn activate(&mut self, engine: &mut TourEngine) {
        self.coordinator.begin();
        self.last_tracked = None;
        engine.schedule_zone_task(ZoneTask::Settle(self.step.key.clone()), ZONE_SETTLE);
        engine.schedule_zone_task(
            ZoneTask::ScrollAttempt(self.step.key.clone()),
            RETRY_BASE_DELAY,
        );
    }

    /// One-shot re-measure on a host layout change, while active.
    ///
    /// Suspended while this zone's auto-scroll is in flight: a layout event
    /// fired mid-scroll reports the pre-scroll rectangle, which would clobber
    /// the projected measurement until the scroll settles.
    pub fn layout<C>(&self, engine: &mut TourEngine, container: &C)
    where
        C: ElementProbe + ?Sized,
    {
        if engine.current_key() != Some(&self.step.key) || self.coordinator.is_scrolling() {
            return;
        }
        let bridge = MeasurementBridge::new(&self.element, container);
        match bridge.sample() {
            Ok(m) => engine.update_step_layout(&self.step.key, m),
            Err(err) => tracing::debug!(step = %self.step.key, %err, "layout sample skipped"),
        }
    }

    /// Per-frame continuous tracking.
    ///
    /// Suspended while this zone's auto-scroll is in flight, and skipped when
    /// the element has not moved beyond a small threshold since the last
    /// sample, so a static layout does not keep re-springing the target.
    pub fn frame<C>(&mut self, engine: &mut TourEngine, container: &C)
    where
        C: ElementProbe + ?Sized,
    {
        if engine.current_key() != Some(&self.step.key) || self.coordinator.is_scrolling() {
            return;
        }
        let bridge = MeasurementBridge::new(&self.element, container);
        let Some(m) = bridge.sample_frame() else {
            return;
        };
        if let Some(prev) = &self.last_tracked {
            if (m.x - prev.x).abs() < TRACK_EPSILON
                && (m.y - prev.y).abs() < TRACK_EPSILON
                && (m.width - prev.width).abs() < TRACK_EPSILON
                && (m.height - prev.height).abs() < TRACK_EPSILON
            {
                return;
            }
        }
        self.last_tracked = Some(m);
        engine.track_step_layout(&self.step.key, m);
    }

    /// Runs one due task for this zone.
    ///
    /// Tasks carrying another step's key, or a key that is no longer the
    /// active step, are dropped; that is the cancellation path for timers
    /// scheduled by a superseded activation. `ScrollSettle` is the one task
    /// that always runs, so tracking can never stay suspended behind a stale
    /// timer.
    pub fn handle_task<C, S>(
        &mut self,
        task: &ZoneTask,
        engine: &mut TourEngine,
        container: &C,
        scroll: &mut S,
    ) where
        C: ElementProbe + ?Sized,
        S: ScrollControl + ?Sized,
    {
        if task.key() != &self.step.key {
            return;
        }
        match task {
            ZoneTask::Settle(_) => {
                if engine.current_key() != Some(&self.step.key) || self.coordinator.is_scrolling()
                {
                    return;
                }
                let bridge = MeasurementBridge::new(&self.element, container);
                match bridge.sample() {
                    Ok(m) => engine.update_step_layout(&self.step.key, m),
                    Err(err) => {
                        tracing::debug!(step = %self.step.key, %err, "settle sample skipped");
                    }
                }
            }
            ZoneTask::ScrollAttempt(_) => {
                if engine.current_key() != Some(&self.step.key) {
                    return;
                }
                let viewport = engine.viewport();
                let outcome = self
                    .coordinator
                    .evaluate(&self.element, container, scroll, viewport);
                match outcome {
                    ScrollOutcome::Report(m) => engine.update_step_layout(&self.step.key, m),
                    ScrollOutcome::Scrolled {
                        projected, settle, ..
                    } => {
                        // Animate toward where the element will land, not
                        // where it is mid-scroll.
                        engine.update_step_layout(&self.step.key, projected);
                        engine
                            .schedule_zone_task(ZoneTask::ScrollSettle(self.step.key.clone()), settle);
                    }
                    ScrollOutcome::Retry { delay } => {
                        engine.schedule_zone_task(
                            ZoneTask::ScrollAttempt(self.step.key.clone()),
                            delay,
                        );
                    }
                    ScrollOutcome::Exhausted => {}
                }
            }
            ZoneTask::ScrollSettle(_) => self.coordinator.settle(),
        }
    }
}
