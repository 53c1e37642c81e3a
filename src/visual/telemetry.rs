//! Scroll telemetry subscription and the tracker that turns it into state.

use crate::notify::{Notifier, Subscription};
use crate::visual::{HeroSpan, Parallax, ScrollSignal, VisualDerivedState};
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Anything that reports scroll position and viewport size changes.
pub trait ScrollSource {
    fn subscribe(&self, listener: Box<dyn FnMut(&ScrollSignal)>) -> Subscription;
}

/// In-process scroll source: the host pushes signals with `emit`.
///
/// A new subscriber immediately receives the most recent signal, so a view
/// mounted mid-page starts from the real position instead of the top.
pub struct ScrollTelemetry {
    notifier: Notifier<ScrollSignal>,
    latest: Cell<Option<ScrollSignal>>,
}

impl ScrollTelemetry {
    pub fn new() -> Self {
        Self {
            notifier: Notifier::new(),
            latest: Cell::new(None),
        }
    }

    /// Deliver a scroll or resize notification to every subscriber.
    pub fn emit(&self, signal: ScrollSignal) {
        self.latest.set(Some(signal));
        self.notifier.notify(&signal);
    }

    pub fn latest(&self) -> Option<ScrollSignal> {
        self.latest.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.listener_count()
    }
}

impl Default for ScrollTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSource for ScrollTelemetry {
    fn subscribe(&self, mut listener: Box<dyn FnMut(&ScrollSignal)>) -> Subscription {
        if let Some(signal) = self.latest.get() {
            listener(&signal);
        }
        self.notifier.subscribe(move |signal| listener(signal))
    }
}

/// A host with no scroll APIs. Nothing is ever delivered.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTelemetry;

impl ScrollSource for NoTelemetry {
    fn subscribe(&self, _listener: Box<dyn FnMut(&ScrollSignal)>) -> Subscription {
        debug!("Scroll telemetry unavailable, visual state stays at rest");
        Subscription::inert()
    }
}

/// Page chrome state plus hero parallax for one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualSnapshot {
    pub visual: VisualDerivedState,
    pub parallax: Parallax,
}

impl VisualSnapshot {
    pub fn from_signal(signal: &ScrollSignal, hero: &HeroSpan) -> Self {
        Self {
            visual: VisualDerivedState::from_signal(signal),
            parallax: Parallax::for_offset(hero, signal.offset_y),
        }
    }

    pub fn rest() -> Self {
        Self {
            visual: VisualDerivedState::rest(),
            parallax: Parallax::rest(),
        }
    }
}

/// Keeps the latest `VisualSnapshot` for a mounted page.
///
/// Dropping the tracker deregisters it from the scroll source.
pub struct VisualStateTracker {
    state: Rc<Cell<VisualSnapshot>>,
    changes: Rc<Notifier<VisualSnapshot>>,
    _subscription: Subscription,
}

impl VisualStateTracker {
    pub fn attach(source: &dyn ScrollSource, hero: HeroSpan) -> Self {
        let state = Rc::new(Cell::new(VisualSnapshot::rest()));
        let changes = Rc::new(Notifier::new());

        let (sink, notifier) = (Rc::clone(&state), Rc::clone(&changes));
        let subscription = source.subscribe(Box::new(move |signal: &ScrollSignal| {
            let snapshot = VisualSnapshot::from_signal(signal, &hero);
            sink.set(snapshot);
            notifier.notify(&snapshot);
        }));

        Self {
            state,
            changes,
            _subscription: subscription,
        }
    }

    pub fn snapshot(&self) -> VisualSnapshot {
        self.state.get()
    }

    pub fn visual(&self) -> VisualDerivedState {
        self.state.get().visual
    }

    /// Re-render hook: called with every new snapshot.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&VisualSnapshot) + 'static,
    {
        self.changes.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn hero() -> HeroSpan {
        HeroSpan::for_element(0.0, 900.0)
    }

    // ==================== Telemetry Tests ====================

    #[test]
    fn test_emit_reaches_subscribers_in_order() {
        let telemetry = ScrollTelemetry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _subscription = telemetry.subscribe(Box::new(move |signal: &ScrollSignal| {
            sink.borrow_mut().push(signal.offset_y)
        }));

        for offset in [0.0, 120.0, 80.0] {
            telemetry.emit(ScrollSignal::new(offset, 1000.0, 3000.0));
        }

        assert_eq!(*seen.borrow(), vec![0.0, 120.0, 80.0]);
    }

    #[test]
    fn test_late_subscriber_gets_latest_signal() {
        let telemetry = ScrollTelemetry::new();
        telemetry.emit(ScrollSignal::new(700.0, 1000.0, 3000.0));

        let tracker = VisualStateTracker::attach(&telemetry, hero());
        assert!(tracker.visual().fab_visible);
    }

    #[test]
    fn test_unsubscribe_on_drop() {
        let telemetry = ScrollTelemetry::new();
        let tracker = VisualStateTracker::attach(&telemetry, hero());
        assert_eq!(telemetry.subscriber_count(), 1);
        drop(tracker);
        assert_eq!(telemetry.subscriber_count(), 0);
    }

    // ==================== Tracker Tests ====================

    #[test]
    fn test_tracker_starts_at_rest() {
        let telemetry = ScrollTelemetry::new();
        let tracker = VisualStateTracker::attach(&telemetry, hero());
        assert_eq!(tracker.snapshot(), VisualSnapshot::rest());
    }

    #[test]
    fn test_tracker_follows_scroll() {
        let telemetry = ScrollTelemetry::new();
        let tracker = VisualStateTracker::attach(&telemetry, hero());

        telemetry.emit(ScrollSignal::new(450.0, 1000.0, 3000.0));
        let snapshot = tracker.snapshot();

        assert!(snapshot.visual.nav_scrolled);
        assert!(snapshot.visual.fab_visible);
        assert_eq!(snapshot.parallax.opacity, 0.5);
        assert_eq!(snapshot.parallax.translate_y_percent, 25.0);
    }

    #[test]
    fn test_tracker_resize_changes_progress() {
        let telemetry = ScrollTelemetry::new();
        let tracker = VisualStateTracker::attach(&telemetry, hero());

        telemetry.emit(ScrollSignal::new(1000.0, 1000.0, 3000.0));
        assert_eq!(tracker.visual().progress, 0.5);

        // Viewport grows; same offset now reaches the bottom.
        telemetry.emit(ScrollSignal::new(1000.0, 2000.0, 3000.0));
        assert_eq!(tracker.visual().progress, 1.0);
    }

    #[test]
    fn test_tracker_notifies_view() {
        let telemetry = ScrollTelemetry::new();
        let tracker = VisualStateTracker::attach(&telemetry, hero());
        let renders = Rc::new(Cell::new(0));

        let count = Rc::clone(&renders);
        let _render = tracker.subscribe(move |_| count.set(count.get() + 1));
        telemetry.emit(ScrollSignal::new(10.0, 1000.0, 3000.0));
        telemetry.emit(ScrollSignal::new(20.0, 1000.0, 3000.0));

        assert_eq!(renders.get(), 2);
    }

    #[test]
    fn test_no_telemetry_keeps_rest_values() {
        let tracker = VisualStateTracker::attach(&NoTelemetry, hero());
        let visual = tracker.visual();
        assert_eq!(visual.progress, 0.0);
        assert!(!visual.nav_scrolled);
        assert!(!visual.fab_visible);
    }
}
