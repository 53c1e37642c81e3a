//! Viewport intersection and one-shot reveals.
//!
//! Sections fade in the first time they enter the viewport and stay
//! revealed. Counters start their ramp from the same kind of trigger. The
//! trigger source is abstracted as a `VisibilityObserver` so neither depends
//! on a real browser.

use crate::notify::{Notifier, Subscription};
use std::cell::Cell;

/// Root margin used by content sections: they must be 100px inside the
/// viewport before they reveal.
pub const SECTION_REVEAL_MARGIN: f64 = -100.0;

/// Counters start as soon as any part of them is on screen.
pub const COUNTER_TRIGGER_MARGIN: f64 = 0.0;

/// An element's vertical extent relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub top: f64,
    pub bottom: f64,
}

impl ElementBounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Bounds of an element at page offset `page_top` seen from `offset_y`.
    pub fn at_scroll(page_top: f64, height: f64, offset_y: f64) -> Self {
        let top = page_top - offset_y;
        Self::new(top, top + height)
    }
}

/// Whether `bounds` overlaps the viewport grown (positive) or shrunk
/// (negative) by `margin` on both edges.
pub fn intersects(bounds: ElementBounds, viewport_height: f64, margin: f64) -> bool {
    let root_top = -margin;
    let root_bottom = viewport_height + margin;
    root_bottom > root_top && bounds.bottom > root_top && bounds.top < root_bottom
}

/// Source of intersecting/not-intersecting notifications for one element.
pub trait VisibilityObserver {
    fn observe(&self, listener: Box<dyn FnMut(&bool)>) -> Subscription;
}

/// Computes intersection changes for one element from layout updates.
///
/// Listeners hear about transitions only, not every layout pass.
pub struct ElementVisibility {
    margin: f64,
    intersecting: Cell<bool>,
    changes: Notifier<bool>,
}

impl ElementVisibility {
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            intersecting: Cell::new(false),
            changes: Notifier::new(),
        }
    }

    /// Sections use the negative reveal margin.
    pub fn section() -> Self {
        Self::new(SECTION_REVEAL_MARGIN)
    }

    pub fn counter() -> Self {
        Self::new(COUNTER_TRIGGER_MARGIN)
    }

    /// Re-evaluate after scroll, resize or layout.
    pub fn update(&self, bounds: ElementBounds, viewport_height: f64) {
        let now = intersects(bounds, viewport_height, self.margin);
        if now != self.intersecting.replace(now) {
            self.changes.notify(&now);
        }
    }

    pub fn is_intersecting(&self) -> bool {
        self.intersecting.get()
    }
}

impl VisibilityObserver for ElementVisibility {
    fn observe(&self, mut listener: Box<dyn FnMut(&bool)>) -> Subscription {
        if self.intersecting.get() {
            listener(&true);
        }
        self.changes.subscribe(move |visible| listener(visible))
    }
}

/// One-shot reveal: hidden until first seen, then revealed for good.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reveal {
    revealed: bool,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a visibility change. Returns true only on the transition that
    /// reveals the element.
    pub fn on_visibility(&mut self, intersecting: bool) -> bool {
        if intersecting && !self.revealed {
            self.revealed = true;
            return true;
        }
        false
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // ==================== Intersection Tests ====================

    #[test]
    fn test_intersects_without_margin() {
        assert!(intersects(ElementBounds::new(900.0, 1200.0), 1000.0, 0.0));
        assert!(!intersects(ElementBounds::new(1000.0, 1300.0), 1000.0, 0.0));
        assert!(!intersects(ElementBounds::new(-300.0, 0.0), 1000.0, 0.0));
    }

    #[test]
    fn test_negative_margin_requires_deeper_entry() {
        let peeking = ElementBounds::new(950.0, 1400.0);
        assert!(intersects(peeking, 1000.0, 0.0));
        assert!(!intersects(peeking, 1000.0, SECTION_REVEAL_MARGIN));

        let inside = ElementBounds::new(850.0, 1300.0);
        assert!(intersects(inside, 1000.0, SECTION_REVEAL_MARGIN));
    }

    #[test]
    fn test_margin_larger_than_viewport_never_intersects() {
        assert!(!intersects(ElementBounds::new(0.0, 100.0), 150.0, -100.0));
    }

    #[test]
    fn test_bounds_at_scroll() {
        let bounds = ElementBounds::at_scroll(2500.0, 600.0, 2000.0);
        assert_eq!(bounds, ElementBounds::new(500.0, 1100.0));
    }

    // ==================== Element Visibility Tests ====================

    #[test]
    fn test_element_visibility_reports_transitions_only() {
        let element = ElementVisibility::new(0.0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _observer = element.observe(Box::new(move |v: &bool| sink.borrow_mut().push(*v)));

        element.update(ElementBounds::new(1200.0, 1500.0), 1000.0);
        element.update(ElementBounds::new(800.0, 1100.0), 1000.0);
        element.update(ElementBounds::new(700.0, 1000.0), 1000.0);
        element.update(ElementBounds::new(-400.0, -100.0), 1000.0);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_counter_triggers_before_section_reveals() {
        let counter = ElementVisibility::counter();
        let section = ElementVisibility::section();
        let peeking = ElementBounds::new(950.0, 1350.0);

        counter.update(peeking, 1000.0);
        section.update(peeking, 1000.0);
        assert!(counter.is_intersecting());
        assert!(!section.is_intersecting());
    }

    #[test]
    fn test_late_observer_hears_current_visibility() {
        let element = ElementVisibility::section();
        element.update(ElementBounds::new(200.0, 600.0), 1000.0);
        assert!(element.is_intersecting());

        let seen = Rc::new(Cell::new(false));
        let sink = Rc::clone(&seen);
        let _observer = element.observe(Box::new(move |v: &bool| sink.set(*v)));
        assert!(seen.get());
    }

    // ==================== Reveal Tests ====================

    #[test]
    fn test_reveal_fires_once() {
        let mut reveal = Reveal::new();
        assert!(!reveal.on_visibility(false));
        assert!(reveal.on_visibility(true));
        assert!(!reveal.on_visibility(false));
        assert!(!reveal.on_visibility(true));
        assert!(reveal.is_revealed());
    }
}
