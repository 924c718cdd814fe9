//! Simulated viewport-intersection observers.
//!
//! In the browser every section owns an intersection watcher that calls
//! [`StatusBarCoordinator::set_visibility`] whenever the section crosses its
//! threshold. This module reproduces that behavior from plain geometry so
//! pages can be exercised without a browser: give each section a `top` and a
//! `height` in page pixels, scroll the [`Viewport`], and the observers report
//! crossings to the coordinator.
//!
//! ```text
//! page y
//!   0 ┌──────────────┐
//!     │ hero         │  ┌─ viewport (scroll_top = 600, height = 800)
//! 900 ├──────────────┤  │  hero:    300 / 900 px visible → 0.33
//!     │ gallery      │  │  gallery: 500 / 700 px visible → 0.71
//!1600 ├──────────────┤  ┘
//! ```
//!
//! An observer only reports when its visibility flips, like the platform
//! API. The first observation always reports.

use crate::coordinator::StatusBarCoordinator;
use crate::sink::StatusBarSink;

/// Vertical placement of a section on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Fraction of the section's height inside the viewport, `0.0..=1.0`.
///
/// Zero-height sections never intersect, and neither does anything under a
/// non-finite scroll offset or viewport height.
pub fn intersection_ratio(bounds: &SectionBounds, scroll_top: f64, viewport_height: f64) -> f64 {
    if bounds.height <= 0.0 || !scroll_top.is_finite() || !viewport_height.is_finite() {
        return 0.0;
    }
    let visible_top = bounds.top.max(scroll_top);
    let visible_bottom = bounds.bottom().min(scroll_top + viewport_height);
    ((visible_bottom - visible_top).max(0.0) / bounds.height).min(1.0)
}

/// Watches one section and reports threshold crossings.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    pub bounds: SectionBounds,
    pub threshold: f64,
    last: Option<bool>,
}

impl VisibilityObserver {
    pub fn new(bounds: SectionBounds, threshold: f64) -> Self {
        Self {
            bounds,
            threshold,
            last: None,
        }
    }

    /// Returns the new visibility when it differs from the last report.
    pub fn observe(&mut self, scroll_top: f64, viewport_height: f64) -> Option<bool> {
        let ratio = intersection_ratio(&self.bounds, scroll_top, viewport_height);
        let visible = ratio > 0.0 && ratio >= self.threshold;
        if self.last == Some(visible) {
            return None;
        }
        self.last = Some(visible);
        Some(visible)
    }

    /// Last reported visibility, `None` before the first observation.
    pub fn last_report(&self) -> Option<bool> {
        self.last
    }

    /// Forget the last report so the next observation reports again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// A scrollable viewport with one observer per laid-out section.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub height: f64,
    observers: Vec<VisibilityObserver>,
    scroll_top: f64,
}

impl Viewport {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            observers: Vec::new(),
            scroll_top: 0.0,
        }
    }

    pub fn observe(&mut self, observer: VisibilityObserver) {
        self.observers.push(observer);
    }

    pub fn observers(&self) -> &[VisibilityObserver] {
        &self.observers
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Reset the observers watching `id`.
    ///
    /// Call this when the section is registered or unregistered: the
    /// coordinator starts it hidden, so the observer must report afresh.
    pub fn reset(&mut self, id: &str) {
        for observer in self.observers.iter_mut().filter(|o| o.bounds.id == id) {
            observer.reset();
        }
    }

    /// Scroll to `offset` and forward every crossing to the coordinator.
    ///
    /// Returns the `(id, visible)` reports in observer order.
    pub fn scroll_to<S: StatusBarSink>(
        &mut self,
        offset: f64,
        coordinator: &mut StatusBarCoordinator<S>,
    ) -> Vec<(String, bool)> {
        self.scroll_top = offset;
        let mut reports = Vec::new();
        for observer in &mut self.observers {
            if let Some(visible) = observer.observe(offset, self.height) {
                coordinator.set_visibility(&observer.bounds.id, visible);
                reports.push((observer.bounds.id.clone(), visible));
            }
        }
        reports
    }
}
