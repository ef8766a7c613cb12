// Copyright 2025 the Torchlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Torchlight Scroll: brings the active tour element into view.
//!
//! When a step activates, its element may sit outside the "safe band" of the
//! viewport (the region between a top and bottom buffer). The
//! [`AutoScrollCoordinator`] decides whether that is the case, computes a
//! scroll offset that centers the element, asks the host to scroll, and
//! reports the element's *projected* post-scroll rectangle so the spotlight
//! can start animating toward it immediately instead of waiting for the
//! scroll animation to finish.
//!
//! While a programmatic scroll is in flight the coordinator holds a
//! `scrolling` flag. Continuous per-frame tracking must be suspended while
//! the flag is up: tracking mid-scroll would fight the scroll animation and
//! jitter the highlight. The flag is cleared after a fixed settle delay that
//! matches the host's scroll animation, and is cleared on every failure path
//! too, so tracking can never be left suspended.
//!
//! Layout measurement is asynchronous on real hosts, so the first evaluation
//! of a freshly activated element can fail. The coordinator retries a fixed
//! number of times with an increasing backoff before giving up silently.

use core::time::Duration;

use kurbo::Point;
use thiserror::Error;
use torchlight_geometry::{Measurement, Viewport};
use torchlight_measure::{ElementProbe, MeasurementBridge, WindowRect};

/// Upper viewport region treated as "not visible enough", in device units.
pub const DEFAULT_TOP_BUFFER: f64 = 100.0;

/// Lower viewport region treated as "not visible enough", in device units.
pub const DEFAULT_BOTTOM_BUFFER: f64 = 150.0;

/// Extra offset added below center when scroll-targeting an element.
pub const SCROLL_CENTER_OFFSET: f64 = 50.0;

/// How long to suppress continuous tracking after issuing a scroll; matches
/// the host's scroll animation duration.
pub const SCROLL_SETTLE: Duration = Duration::from_millis(800);

/// Base backoff between measurement attempts; attempt `n` waits `n` times
/// this.
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(150);

/// Measurement attempt budget per activation.
pub const MAX_ATTEMPTS: u32 = 3;

/// The vertical viewport region considered visible enough to skip scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SafeBand {
    /// Elements starting above this offset trigger a scroll.
    pub top_buffer: f64,
    /// Elements ending within this distance of the bottom trigger a scroll.
    pub bottom_buffer: f64,
}

impl Default for SafeBand {
    fn default() -> Self {
        Self {
            top_buffer: DEFAULT_TOP_BUFFER,
            bottom_buffer: DEFAULT_BOTTOM_BUFFER,
        }
    }
}

/// Whether an element at `page_y` with `height` sits outside the safe band
/// of a viewport `viewport_height` tall.
#[must_use]
pub fn needs_scroll(page_y: f64, height: f64, viewport_height: f64, band: SafeBand) -> bool {
    page_y < band.top_buffer || page_y + height > viewport_height - band.bottom_buffer
}

/// Scroll offset that vertically centers an element, clamped to ≥ 0.
///
/// `content_y` is the element's Y within the scroll *content* (unaffected by
/// the current scroll position).
#[must_use]
pub fn scroll_target(content_y: f64, viewport_height: f64, element_height: f64) -> f64 {
    (content_y - viewport_height / 2.0 + element_height / 2.0 + SCROLL_CENTER_OFFSET).max(0.0)
}

/// Projects where an element will land, in root-container space, once the
/// scroll container reaches `scroll_offset`.
///
/// Pre-scroll math: the element's visual Y is the scroll container's screen
/// origin plus the element's content Y minus the scroll amount.
#[must_use]
pub fn projected_measurement(
    element: WindowRect,
    content_origin: Point,
    scroll_rect: WindowRect,
    scroll_offset: f64,
    container: WindowRect,
) -> Measurement {
    Measurement::new(
        scroll_rect.page_x + content_origin.x - container.page_x,
        scroll_rect.page_y + content_origin.y - scroll_offset - container.page_y,
        element.width,
        element.height,
    )
}

/// The host side of programmatic scrolling.
pub trait ScrollControl {
    /// Screen-space rectangle of the scroll container itself.
    fn window_rect(&self) -> Option<WindowRect>;

    /// Requests a scroll of the container's content to `offset`.
    fn scroll_to(&mut self, offset: f64, animated: bool) -> Result<(), ScrollError>;
}

/// A scroll request the host could not carry out.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("scroll request failed: {0}")]
pub struct ScrollError(pub String);

/// Result of one coordinator evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollOutcome {
    /// The element is already inside the safe band; here is where it sits.
    Report(Measurement),
    /// A scroll was issued. `projected` is the element's post-scroll
    /// rectangle; resume continuous tracking after `settle`.
    Scrolled {
        /// Projected post-scroll measurement, in root-container space.
        projected: Measurement,
        /// The content offset that was requested.
        offset: f64,
        /// Delay before [`AutoScrollCoordinator::settle`] should be called.
        settle: Duration,
    },
    /// The element was not measurable; evaluate again after `delay`.
    Retry {
        /// Backoff before the next attempt.
        delay: Duration,
    },
    /// The attempt budget is spent; give up silently.
    Exhausted,
}

/// Per-zone coordinator for the activate → measure → maybe-scroll flow.
///
/// One instance lives in each zone binding. [`AutoScrollCoordinator::begin`]
/// resets it when its step activates; the zone then calls
/// [`AutoScrollCoordinator::evaluate`] on the schedule the outcomes dictate.
#[derive(Clone, Debug)]
pub struct AutoScrollCoordinator {
    band: SafeBand,
    attempts: u32,
    scrolling: bool,
    has_scrolled: bool,
}

impl Default for AutoScrollCoordinator {
    fn default() -> Self {
        Self::new(SafeBand::default())
    }
}

impl AutoScrollCoordinator {
    /// Creates a coordinator with the given safe band.
    #[must_use]
    pub fn new(band: SafeBand) -> Self {
        Self {
            band,
            attempts: 0,
            scrolling: false,
            has_scrolled: false,
        }
    }

    /// Whether a programmatic scroll is in flight.
    ///
    /// Continuous tracking must not write geometry while this holds; the
    /// two paths are mutually exclusive writers of the shared target.
    #[inline]
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Resets attempt and scroll state for a fresh activation.
    pub fn begin(&mut self) {
        self.attempts = 0;
        self.scrolling = false;
        self.has_scrolled = false;
    }

    /// Clears the scrolling flag once the host's scroll animation settles.
    pub fn settle(&mut self) {
        self.scrolling = false;
    }

    /// Runs one evaluation of the auto-scroll algorithm.
    ///
    /// Measures the element; retries on failure within the attempt budget;
    /// reports the current rectangle when the element is already inside the
    /// safe band; otherwise issues a centering scroll and reports the
    /// projected rectangle.
    pub fn evaluate<E, C, S>(
        &mut self,
        element: &E,
        container: &C,
        scroll: &mut S,
        viewport: Viewport,
    ) -> ScrollOutcome
    where
        E: ElementProbe + ?Sized,
        C: ElementProbe + ?Sized,
        S: ScrollControl + ?Sized,
    {
        if self.has_scrolled {
            // A scroll was already issued for this activation.
            return ScrollOutcome::Exhausted;
        }
        self.attempts += 1;

        let Some(rect) = element.window_rect().filter(|r| r.validate().is_ok()) else {
            return self.retry_or_exhaust();
        };

        if !needs_scroll(rect.page_y, rect.height, viewport.height, self.band) {
            // Already visible enough; just sync the position.
            let bridge = MeasurementBridge::new(element, container);
            return match bridge.sample() {
                Ok(m) => ScrollOutcome::Report(m),
                Err(err) => {
                    tracing::debug!(%err, "element in band but container not measurable");
                    self.retry_or_exhaust()
                }
            };
        }

        let (Some(scroll_rect), Some(content_origin), Some(container_rect)) = (
            scroll.window_rect(),
            element.content_origin(),
            container.window_rect(),
        ) else {
            return self.retry_or_exhaust();
        };

        let offset = scroll_target(content_origin.y, viewport.height, rect.height);
        let projected =
            projected_measurement(rect, content_origin, scroll_rect, offset, container_rect);

        self.has_scrolled = true;
        self.scrolling = true;

        let settle = match scroll.scroll_to(offset, true) {
            Ok(()) => SCROLL_SETTLE,
            Err(err) => {
                // Never leave tracking suspended behind a failed scroll.
                tracing::warn!(%err, "scroll request failed");
                self.scrolling = false;
                Duration::ZERO
            }
        };

        ScrollOutcome::Scrolled {
            projected,
            offset,
            settle,
        }
    }

    fn retry_or_exhaust(&mut self) -> ScrollOutcome {
        if self.attempts < MAX_ATTEMPTS {
            ScrollOutcome::Retry {
                delay: RETRY_BASE_DELAY * self.attempts,
            }
        } else {
            tracing::debug!("element never became measurable; giving up");
            ScrollOutcome::Exhausted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(390.0, 800.0);

    struct Probe {
        rect: Option<WindowRect>,
        content: Option<Point>,
    }

    impl Probe {
        fn at(rect: WindowRect) -> Self {
            Self {
                rect: Some(rect),
                content: None,
            }
        }

        fn with_content(mut self, origin: Point) -> Self {
            self.content = Some(origin);
            self
        }

        fn missing() -> Self {
            Self {
                rect: None,
                content: None,
            }
        }
    }

    impl ElementProbe for Probe {
        fn window_rect(&self) -> Option<WindowRect> {
            self.rect
        }

        fn content_origin(&self) -> Option<Point> {
            self.content
        }
    }

    struct Scroller {
        rect: Option<WindowRect>,
        requests: Vec<f64>,
        fail: bool,
    }

    impl Scroller {
        fn new() -> Self {
            Self {
                rect: Some(WindowRect::new(390.0, 800.0, 0.0, 0.0)),
                requests: Vec::new(),
                fail: false,
            }
        }
    }

    impl ScrollControl for Scroller {
        fn window_rect(&self) -> Option<WindowRect> {
            self.rect
        }

        fn scroll_to(&mut self, offset: f64, _animated: bool) -> Result<(), ScrollError> {
            if self.fail {
                return Err(ScrollError("host refused".into()));
            }
            self.requests.push(offset);
            Ok(())
        }
    }

    fn container() -> Probe {
        Probe::at(WindowRect::new(390.0, 800.0, 0.0, 0.0))
    }

    #[test]
    fn safe_band_decision() {
        let band = SafeBand::default();
        // Above the top buffer.
        assert!(needs_scroll(50.0, 50.0, 800.0, band));
        // Comfortably inside: 200 + 50 = 250 < 800 - 150.
        assert!(!needs_scroll(200.0, 50.0, 800.0, band));
        // Poking into the bottom buffer.
        assert!(needs_scroll(620.0, 50.0, 800.0, band));
    }

    #[test]
    fn scroll_target_centers_and_clamps() {
        // 1200 - 400 + 25 + 50.
        assert!((scroll_target(1200.0, 800.0, 50.0) - 875.0).abs() < 1e-9);
        // Near the top of the content the raw target is negative.
        assert!((scroll_target(10.0, 800.0, 50.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn in_band_element_is_reported_without_scrolling() {
        let element = Probe::at(WindowRect::new(120.0, 50.0, 30.0, 300.0));
        let mut scroller = Scroller::new();
        let mut coordinator = AutoScrollCoordinator::default();
        coordinator.begin();

        let outcome = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        assert_eq!(
            outcome,
            ScrollOutcome::Report(Measurement::new(30.0, 300.0, 120.0, 50.0))
        );
        assert!(scroller.requests.is_empty());
        assert!(!coordinator.is_scrolling());
    }

    #[test]
    fn out_of_band_element_triggers_centering_scroll() {
        // Element low on screen, content Y 1200.
        let element = Probe::at(WindowRect::new(120.0, 50.0, 30.0, 700.0))
            .with_content(Point::new(30.0, 1200.0));
        let mut scroller = Scroller::new();
        let mut coordinator = AutoScrollCoordinator::default();
        coordinator.begin();

        let outcome = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        let ScrollOutcome::Scrolled {
            projected,
            offset,
            settle,
        } = outcome
        else {
            panic!("expected a scroll, got {outcome:?}");
        };

        assert!((offset - 875.0).abs() < 1e-9);
        assert_eq!(scroller.requests, vec![875.0]);
        assert_eq!(settle, SCROLL_SETTLE);
        assert!(coordinator.is_scrolling());

        // Projected Y = scroll_py(0) + content_y(1200) - offset(875) - container_py(0).
        assert!((projected.y - 325.0).abs() < 1e-9);
        assert!((projected.x - 30.0).abs() < 1e-9);
        assert!((projected.width - 120.0).abs() < 1e-9);

        coordinator.settle();
        assert!(!coordinator.is_scrolling());
    }

    #[test]
    fn unmeasurable_element_retries_with_backoff_then_exhausts() {
        let element = Probe::missing();
        let mut scroller = Scroller::new();
        let mut coordinator = AutoScrollCoordinator::default();
        coordinator.begin();

        let first = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        assert_eq!(
            first,
            ScrollOutcome::Retry {
                delay: RETRY_BASE_DELAY
            }
        );
        let second = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        assert_eq!(
            second,
            ScrollOutcome::Retry {
                delay: RETRY_BASE_DELAY * 2
            }
        );
        let third = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        assert_eq!(third, ScrollOutcome::Exhausted);
        assert!(!coordinator.is_scrolling());
    }

    #[test]
    fn invalid_sample_counts_as_unmeasurable() {
        let element = Probe::at(WindowRect::new(0.0, 50.0, 30.0, 300.0));
        let mut scroller = Scroller::new();
        let mut coordinator = AutoScrollCoordinator::default();
        coordinator.begin();

        let outcome = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        assert!(matches!(outcome, ScrollOutcome::Retry { .. }));
    }

    #[test]
    fn failed_scroll_clears_the_suspend_flag() {
        let element = Probe::at(WindowRect::new(120.0, 50.0, 30.0, 700.0))
            .with_content(Point::new(30.0, 1200.0));
        let mut scroller = Scroller::new();
        scroller.fail = true;
        let mut coordinator = AutoScrollCoordinator::default();
        coordinator.begin();

        let outcome = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        let ScrollOutcome::Scrolled { settle, .. } = outcome else {
            panic!("expected a scroll attempt, got {outcome:?}");
        };
        assert_eq!(settle, Duration::ZERO);
        assert!(
            !coordinator.is_scrolling(),
            "tracking must not stay suspended after a failed scroll"
        );
    }

    #[test]
    fn begin_resets_attempts() {
        let element = Probe::missing();
        let mut scroller = Scroller::new();
        let mut coordinator = AutoScrollCoordinator::default();
        coordinator.begin();
        for _ in 0..3 {
            let _ = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        }
        coordinator.begin();
        let outcome = coordinator.evaluate(&element, &container(), &mut scroller, VIEWPORT);
        assert_eq!(
            outcome,
            ScrollOutcome::Retry {
                delay: RETRY_BASE_DELAY
            }
        );
    }
}
