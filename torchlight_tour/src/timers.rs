// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use smallvec::SmallVec;

use crate::step::StepKey;

/// Deferred work the engine hands back to a zone binding.
///
/// [`TourEngine::advance`](crate::TourEngine::advance) returns due tasks; the
/// host routes each one to the zone whose key matches and calls
/// [`Zone::handle_task`](crate::Zone::handle_task). Tasks for a step that is
/// no longer active are dropped by the zone, which is how stale timers from a
/// superseded activation get cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneTask {
    /// Take the one-shot settle measurement after activation.
    Settle(StepKey),
    /// Run one auto-scroll evaluation.
    ScrollAttempt(StepKey),
    /// The host's scroll animation is done; resume continuous tracking.
    ScrollSettle(StepKey),
}

impl ZoneTask {
    /// The step this task belongs to.
    #[must_use]
    pub fn key(&self) -> &StepKey {
        match self {
            Self::Settle(key) | Self::ScrollAttempt(key) | Self::ScrollSettle(key) => key,
        }
    }
}

/// Everything the timer queue can hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Pending {
    /// Deferred first geometry pass after `start`; handled by the engine.
    StartStep(StepKey),
    /// Returned to the host for zone dispatch.
    Zone(ZoneTask),
}

/// A monotonic-deadline queue driven by the engine clock.
///
/// Unordered storage; [`TimerQueue::drain_due`] extracts and sorts what is
/// due. The queue is tiny (a handful of entries at most) so a `Vec` beats a
/// heap here.
#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    entries: Vec<(Duration, Pending)>,
}

impl TimerQueue {
    /// Schedules `task` to fire once the clock reaches `due`.
    pub(crate) fn schedule(&mut self, due: Duration, task: Pending) {
        self.entries.push((due, task));
    }

    /// Removes and returns every task due at `now`, earliest first.
    /// Same-deadline tasks keep their scheduling order.
    pub(crate) fn drain_due(&mut self, now: Duration) -> SmallVec<[Pending; 4]> {
        let mut due: SmallVec<[(Duration, Pending); 4]> = SmallVec::new();
        self.entries.retain(|entry| {
            if entry.0 <= now {
                due.push(entry.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| entry.0);
        due.into_iter().map(|(_, task)| task).collect()
    }

    /// Drops every pending task.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
