//! Pure scroll → visual state derivations.
//!
//! None of these functions keep state; they are re-run on every scroll or
//! resize notification and a newer result simply replaces an older one.

use crate::visual::ScrollSignal;
use serde::Serialize;

/// The navbar switches to its solid style past this offset (strict).
pub const NAV_SCROLLED_THRESHOLD: f64 = 60.0;

/// The floating WhatsApp button appears past this offset (strict).
pub const FAB_VISIBLE_THRESHOLD: f64 = 400.0;

/// Background blend point at the top of the page (mostly green).
pub const BLEND_START_PERCENT: f64 = 15.0;

/// Background blend point at the bottom of the page (mostly wine).
pub const BLEND_END_PERCENT: f64 = 85.0;

/// Normalised scroll position in [0, 1].
///
/// Pages no taller than the viewport cannot scroll and report 0. Offsets
/// outside the scrollable range (overscroll bounce) are clamped.
pub fn compute_progress(offset_y: f64, viewport_height: f64, document_height: f64) -> f64 {
    if document_height <= viewport_height {
        return 0.0;
    }
    let progress = offset_y / (document_height - viewport_height);
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Linear blend point: 15% at the top, 85% at the bottom.
pub fn compute_blend(progress: f64) -> f64 {
    BLEND_START_PERCENT + progress * (BLEND_END_PERCENT - BLEND_START_PERCENT)
}

pub fn compute_nav_scrolled(offset_y: f64) -> bool {
    offset_y > NAV_SCROLLED_THRESHOLD
}

pub fn compute_fab_visible(offset_y: f64) -> bool {
    offset_y > FAB_VISIBLE_THRESHOLD
}

/// Everything the page chrome needs from one scroll signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualDerivedState {
    pub progress: f64,
    /// Width of the top progress bar, 0-100
    pub progress_percent: f64,
    /// Value for the `--blend-point` custom property, 15-85
    pub blend_percent: f64,
    pub nav_scrolled: bool,
    pub fab_visible: bool,
}

impl VisualDerivedState {
    pub fn from_signal(signal: &ScrollSignal) -> Self {
        let progress = signal.progress();
        Self {
            progress,
            progress_percent: progress * 100.0,
            blend_percent: compute_blend(progress),
            nav_scrolled: compute_nav_scrolled(signal.offset_y),
            fab_visible: compute_fab_visible(signal.offset_y),
        }
    }

    /// State shown before any telemetry arrives, or when there is none.
    pub fn rest() -> Self {
        Self::from_signal(&ScrollSignal::rest())
    }

    /// The body style declaration driving the two-colour background.
    pub fn blend_declaration(&self) -> String {
        format!("--blend-point: {}%", self.blend_percent)
    }
}

impl Default for VisualDerivedState {
    fn default() -> Self {
        Self::rest()
    }
}
