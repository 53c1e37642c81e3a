//! Hero parallax.
//!
//! The hero background drifts down and the hero copy fades out while the
//! hero itself scrolls out of view. Progress here is local to the hero: it
//! starts when the hero's top reaches the viewport top and ends when its
//! bottom does, independent of how long the rest of the page is.

use serde::Serialize;

/// Background translation when the hero has fully scrolled away.
pub const PARALLAX_MAX_TRANSLATE_PERCENT: f64 = 50.0;

/// Page offsets bounding the hero's own scroll-through range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeroSpan {
    /// Scroll offset at which the hero's top meets the viewport top
    pub start: f64,
    /// Scroll offset at which the hero's bottom meets the viewport top
    pub end: f64,
}

impl HeroSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Span of an element at page offset `top` with the given height.
    pub fn for_element(top: f64, height: f64) -> Self {
        Self::new(top, top + height)
    }

    /// Position within the span in [0, 1]. An empty span reports 0.
    pub fn local_progress(&self, offset_y: f64) -> f64 {
        let length = self.end - self.start;
        if length <= 0.0 {
            return 0.0;
        }
        let progress = (offset_y - self.start) / length;
        if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parallax {
    /// Downward translation of the hero background, 0-50%
    pub translate_y_percent: f64,
    /// Opacity of the hero copy, 1 → 0
    pub opacity: f64,
}

impl Parallax {
    pub fn rest() -> Self {
        compute_parallax(0.0)
    }

    pub fn for_offset(span: &HeroSpan, offset_y: f64) -> Self {
        compute_parallax(span.local_progress(offset_y))
    }
}

impl Default for Parallax {
    fn default() -> Self {
        Self::rest()
    }
}

/// Map the hero's local progress to background offset and copy opacity.
pub fn compute_parallax(progress: f64) -> Parallax {
    let progress = progress.clamp(0.0, 1.0);
    Parallax {
        translate_y_percent: progress * PARALLAX_MAX_TRANSLATE_PERCENT,
        opacity: 1.0 - progress,
    }
}
