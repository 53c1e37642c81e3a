//! Derived visual state for the scroll-driven page.
//!
//! Scroll and resize notifications arrive as `ScrollSignal`s from a
//! `ScrollSource`; everything derived from them (progress bar, background
//! blend, navbar and WhatsApp button visibility, hero parallax) is a pure
//! function of the latest signal. Section reveals and counters hang off the
//! one-shot visibility triggers in `visibility`. The navbar's mobile menu
//! lives in `menu`.

mod engine;
mod menu;
mod parallax;
mod signal;
mod telemetry;
mod visibility;

pub use engine::{
    compute_blend, compute_fab_visible, compute_nav_scrolled, compute_progress,
    VisualDerivedState, BLEND_END_PERCENT, BLEND_START_PERCENT, FAB_VISIBLE_THRESHOLD,
    NAV_SCROLLED_THRESHOLD,
};
pub use menu::{MobileMenu, MOBILE_MENU_BREAKPOINT};
pub use parallax::{compute_parallax, HeroSpan, Parallax, PARALLAX_MAX_TRANSLATE_PERCENT};
pub use signal::ScrollSignal;
pub use telemetry::{NoTelemetry, ScrollSource, ScrollTelemetry, VisualSnapshot, VisualStateTracker};
pub use visibility::{
    intersects, ElementBounds, ElementVisibility, Reveal, VisibilityObserver,
    COUNTER_TRIGGER_MARGIN, SECTION_REVEAL_MARGIN,
};
