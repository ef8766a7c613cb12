// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;
use std::collections::HashMap;

use smallvec::SmallVec;
use torchlight_geometry::{
    Measurement, SpotlightFrame, SpotlightStyle, Viewport, resolve_spotlight,
};
use torchlight_measure::ViewportSource;
use torchlight_spring::SpringParams;

use crate::config::{
    CardContext, DEFAULT_TRACKING_RADIUS, OVERLAY_FADE, TRACKING_SPRING, TourConfig,
};
use crate::step::{Step, StepKey};
use crate::target::TargetGeometry;
use crate::timers::{Pending, TimerQueue, ZoneTask};

/// The tour orchestrator.
///
/// Owns the step registry, the navigation state machine, the measurement
/// table, and the animated spotlight target. The engine is headless and
/// single-threaded: the host pumps it once per frame via
/// [`TourEngine::advance`] and reads [`TourEngine::frame`] for rendering.
///
/// The engine never measures anything itself. Zone bindings push
/// measurements in through [`TourEngine::update_step_layout`] (one-shot) and
/// [`TourEngine::track_step_layout`] (continuous), and the engine turns them
/// into spotlight animation whenever they belong to the active step.
#[derive(Debug)]
pub struct TourEngine {
    config: TourConfig,
    viewport: Viewport,
    steps: HashMap<StepKey, Step>,
    registration_order: Vec<StepKey>,
    measurements: HashMap<StepKey, Measurement>,
    steps_order: Option<Vec<StepKey>>,
    current: Option<StepKey>,
    target: TargetGeometry,
    timers: TimerQueue,
    clock: Duration,
}

impl TourEngine {
    /// Creates an idle engine.
    #[must_use]
    pub fn new(config: TourConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            steps: HashMap::new(),
            registration_order: Vec::new(),
            measurements: HashMap::new(),
            steps_order: None,
            current: None,
            target: TargetGeometry::default(),
            timers: TimerQueue::default(),
            clock: Duration::ZERO,
        }
    }

    /// Pins the step order to an explicit key list, overriding both numeric
    /// `order` values and registration order.
    #[must_use]
    pub fn with_steps_order(mut self, order: Vec<StepKey>) -> Self {
        self.steps_order = Some(order);
        self
    }

    /// The tour configuration.
    #[must_use]
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Current viewport of the root container.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Updates the viewport, e.g. on rotation. Takes effect on the next
    /// geometry pass.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Refreshes the viewport from a host source.
    pub fn sync_viewport<V>(&mut self, source: &V)
    where
        V: ViewportSource + ?Sized,
    {
        self.viewport = source.viewport();
    }

    /// Whether a step is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Key of the active step.
    #[must_use]
    pub fn current_key(&self) -> Option<&StepKey> {
        self.current.as_ref()
    }

    /// The active step.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.current.as_ref()?)
    }

    /// Registered steps, in resolved order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.resolved_order()
            .into_iter()
            .filter_map(|key| self.steps.get(&key))
    }

    /// Last accepted measurement for a step.
    #[must_use]
    pub fn measurement(&self, key: &StepKey) -> Option<&Measurement> {
        self.measurements.get(key)
    }

    /// Adds a step to the registry, or replaces its definition if the key is
    /// already registered. A replaced step keeps its original registration
    /// position.
    pub fn register_step(&mut self, step: Step) {
        let key = step.key.clone();
        if self.steps.insert(key.clone(), step).is_none() {
            self.registration_order.push(key);
        } else {
            tracing::debug!(step = %key, "step re-registered; definition replaced");
        }
    }

    /// Removes a step and its cached measurement.
    ///
    /// Unregistering the active step advances the tour to the step's
    /// successor in the order it was part of, or stops the tour if it was
    /// last.
    pub fn unregister_step(&mut self, key: &StepKey) {
        if self.current.as_ref() == Some(key) {
            // Successor is computed before removal so the departing step's
            // position still anchors the ordering.
            let order = self.resolved_order();
            let successor = order
                .iter()
                .position(|k| k == key)
                .and_then(|i| order.get(i + 1))
                .cloned();
            self.remove_step(key);
            match successor {
                Some(next) if self.steps.contains_key(&next) => self.transition_to(next),
                _ => self.stop(),
            }
            return;
        }
        self.remove_step(key);
    }

    fn remove_step(&mut self, key: &StepKey) {
        if self.steps.remove(key).is_some() {
            self.registration_order.retain(|k| k != key);
        }
        self.measurements.remove(key);
    }

    /// Resolves the effective step order.
    ///
    /// Precedence: an explicit key list from [`TourEngine::with_steps_order`];
    /// otherwise, if any step carries a numeric `order`, keys sorted by it
    /// ascending (missing values sort as 0, ties keep registration order);
    /// otherwise registration order.
    #[must_use]
    pub fn resolved_order(&self) -> SmallVec<[StepKey; 8]> {
        if let Some(order) = &self.steps_order {
            return order.iter().cloned().collect();
        }
        let mut keys: SmallVec<[StepKey; 8]> = self.registration_order.iter().cloned().collect();
        if self.steps.values().any(|s| s.order.is_some()) {
            keys.sort_by(|a, b| {
                let oa = self.steps.get(a).and_then(|s| s.order).unwrap_or(0.0);
                let ob = self.steps.get(b).and_then(|s| s.order).unwrap_or(0.0);
                oa.total_cmp(&ob)
            });
        }
        keys
    }

    /// Zero-based position of a step in the resolved order, with the total.
    #[must_use]
    pub fn step_position(&self, key: &StepKey) -> Option<(usize, usize)> {
        let order = self.resolved_order();
        let index = order.iter().position(|k| k == key)?;
        Some((index, order.len()))
    }

    /// Card rendering context for the active step.
    #[must_use]
    pub fn card_context(&self) -> Option<CardContext<'_>> {
        let key = self.current.as_ref()?;
        let step = self.steps.get(key)?;
        let (index, total) = self.step_position(key)?;
        Some(CardContext {
            step,
            index,
            total,
            labels: &self.config.labels,
        })
    }

    /// Fully resolved spotlight style of the active step.
    #[must_use]
    pub fn current_style(&self) -> Option<SpotlightStyle> {
        let step = self.current_step()?;
        Some(SpotlightStyle::resolve(
            &self.config.spotlight,
            &step.style_overrides(),
        ))
    }

    /// Starts the tour at `key`, or at the first step in resolved order.
    ///
    /// Valid from any state: while a tour is already running this jumps
    /// straight to the requested step. An unknown explicit key is ignored.
    /// The first geometry pass is deferred to the next
    /// [`TourEngine::advance`] so a zone mounting in the same frame can land
    /// its registration first.
    pub fn start(&mut self, key: Option<&StepKey>) {
        let first = match key {
            Some(k) => {
                if !self.steps.contains_key(k) {
                    tracing::warn!(step = %k, "start requested for unknown step; ignoring");
                    return;
                }
                k.clone()
            }
            None => {
                let Some(k) = self.resolved_order().first().cloned() else {
                    tracing::warn!("start requested with no registered steps; ignoring");
                    return;
                };
                k
            }
        };
        tracing::debug!(step = %first, "starting tour");
        self.current = Some(first.clone());
        self.timers.schedule(self.clock, Pending::StartStep(first));
    }

    /// Ends the tour and fades the overlay out. No-op while idle.
    pub fn stop(&mut self) {
        if self.current.take().is_none() {
            return;
        }
        tracing::debug!("stopping tour");
        self.timers.clear();
        self.target.fade_to(0.0, OVERLAY_FADE);
    }

    /// Advances to the next step in resolved order; past the last step the
    /// tour stops. No-op while idle.
    ///
    /// Transitions do not recompute geometry from cached measurements; the
    /// newly active zone re-measures on activation and continuous tracking
    /// takes over from there.
    pub fn next(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };
        let order = self.resolved_order();
        match order.iter().position(|k| *k == current) {
            Some(i) if i + 1 < order.len() => self.transition_to(order[i + 1].clone()),
            _ => self.stop(),
        }
    }

    /// Moves to the previous step in resolved order; no-op at the first step
    /// or while idle.
    pub fn prev(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };
        let order = self.resolved_order();
        if let Some(i) = order.iter().position(|k| *k == current) {
            if i > 0 {
                self.transition_to(order[i - 1].clone());
            }
        }
    }

    fn transition_to(&mut self, key: StepKey) {
        tracing::debug!(step = %key, "transitioning to step");
        self.current = Some(key);
        self.target
            .fade_to(self.config.backdrop_opacity(), OVERLAY_FADE);
    }

    /// Accepts a one-shot measurement for a step.
    ///
    /// Invalid measurements are rejected and the previous one is retained.
    /// If the step is active, the spotlight springs toward the freshly
    /// resolved geometry and the overlay fades in; this is also what repairs
    /// the spotlight when the measurement lands after activation.
    pub fn update_step_layout(&mut self, key: &StepKey, measurement: Measurement) {
        if !measurement.is_valid() {
            tracing::warn!(step = %key, ?measurement, "rejecting invalid measurement");
            return;
        }
        if !self.steps.contains_key(key) {
            tracing::debug!(step = %key, "dropping measurement for unregistered step");
            return;
        }
        self.measurements.insert(key.clone(), measurement);
        if self.current.as_ref() == Some(key) {
            self.animate_to_current();
        }
    }

    /// Accepts a continuous-tracking sample for a step.
    ///
    /// Tracking follows the raw element rectangle with the stiffer tracking
    /// spring, and only while the step is active. Invalid samples are
    /// dropped; the measurement table is not touched.
    pub fn track_step_layout(&mut self, key: &StepKey, measurement: Measurement) {
        if self.current.as_ref() != Some(key) || !measurement.is_valid() {
            return;
        }
        let Some(step) = self.steps.get(key) else {
            return;
        };
        let radius = step
            .hints
            .corner_radius
            .unwrap_or(DEFAULT_TRACKING_RADIUS);
        let params = self.config.spring.unwrap_or(TRACKING_SPRING);
        self.target.track(&measurement, radius, params);
    }

    fn animate_to_current(&mut self) {
        let Some(key) = self.current.clone() else {
            return;
        };
        let Some(step) = self.steps.get(&key) else {
            return;
        };
        let Some(measurement) = self.measurements.get(&key) else {
            tracing::debug!(step = %key, "no measurement yet; waiting for layout");
            return;
        };
        let style = SpotlightStyle::resolve(&self.config.spotlight, &step.style_overrides());
        let geometry = resolve_spotlight(measurement, &style, self.viewport);
        let params = self.spring_params_for(&style);
        let border_width = style.border_width;
        self.target.spring_toward(geometry, border_width, params);
        self.target
            .fade_to(self.config.backdrop_opacity(), OVERLAY_FADE);
    }

    /// Step-transition spring for a resolved style: per-step overrides win,
    /// then the config spring, then the default.
    fn spring_params_for(&self, style: &SpotlightStyle) -> SpringParams {
        let default = SpringParams::default();
        if style.spring_damping.is_some() || style.spring_stiffness.is_some() {
            return SpringParams::new(
                style.spring_damping.unwrap_or(default.damping),
                style.spring_stiffness.unwrap_or(default.stiffness),
            );
        }
        self.config.spring.unwrap_or(default)
    }

    /// Pumps the engine by `dt`: fires due timers, advances the spotlight
    /// cells, and returns the zone tasks that came due for the host to
    /// dispatch.
    pub fn advance(&mut self, dt: Duration) -> SmallVec<[ZoneTask; 4]> {
        self.clock += dt;
        let mut zone_tasks = SmallVec::new();
        for pending in self.timers.drain_due(self.clock) {
            match pending {
                Pending::StartStep(key) => {
                    // Stale if the tour moved on before the tick fired.
                    if self.current.as_ref() == Some(&key) {
                        self.animate_to_current();
                    }
                }
                Pending::Zone(task) => zone_tasks.push(task),
            }
        }
        self.target.advance(dt);
        zone_tasks
    }

    /// Renderer snapshot of the spotlight.
    #[must_use]
    pub fn frame(&self) -> SpotlightFrame {
        self.target.frame()
    }

    pub(crate) fn schedule_zone_task(&mut self, task: ZoneTask, delay: Duration) {
        self.timers.schedule(self.clock + delay, Pending::Zone(task));
    }
}
