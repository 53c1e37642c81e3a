use serde::{Deserialize, Serialize};

/// One scroll or resize notification from the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollSignal {
    /// Vertical scroll offset in pixels
    pub offset_y: f64,
    /// Height of the visible viewport
    pub viewport_height: f64,
    /// Full height of the document
    pub document_height: f64,
}

impl ScrollSignal {
    pub fn new(offset_y: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            offset_y,
            viewport_height,
            document_height,
        }
    }

    /// What the page assumes when the host reports nothing.
    pub fn rest() -> Self {
        Self::default()
    }

    /// Distance that can actually be scrolled; zero for short pages.
    pub fn scrollable_distance(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    pub fn progress(&self) -> f64 {
        super::compute_progress(self.offset_y, self.viewport_height, self.document_height)
    }
}
