//! Translation lookup metrics.
//!
//! Counts how each `translate` call was answered, so a missing English
//! string shows up as a fallback rate rather than as broken copy nobody
//! notices.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

pub struct TranslationMetrics {
    /// Answered by the requested language
    direct: AtomicUsize,

    /// Answered by the Spanish source table
    fallback: AtomicUsize,

    /// Not found anywhere; the key itself was shown
    missing: AtomicUsize,
}

static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    pub fn new() -> Self {
        Self {
            direct: AtomicUsize::new(0),
            fallback: AtomicUsize::new(0),
            missing: AtomicUsize::new(0),
        }
    }

    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    pub fn record_direct(&self) {
        self.direct.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallback.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing(&self) {
        self.missing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn direct(&self) -> usize {
        self.direct.load(Ordering::Relaxed)
    }

    pub fn fallback(&self) -> usize {
        self.fallback.load(Ordering::Relaxed)
    }

    pub fn missing(&self) -> usize {
        self.missing.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> MetricsReport {
        let direct = self.direct();
        let fallback = self.fallback();
        let missing = self.missing();
        let total = direct + fallback + missing;
        let direct_rate = if total > 0 {
            (direct as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups: total,
            direct,
            fallback,
            missing,
            direct_rate,
        }
    }

    pub fn reset(&self) {
        self.direct.store(0, Ordering::Relaxed);
        self.fallback.store(0, Ordering::Relaxed);
        self.missing.store(0, Ordering::Relaxed);
    }
}

impl Default for TranslationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of lookup statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,
    pub direct: usize,
    pub fallback: usize,
    pub missing: usize,

    /// Share of lookups answered by the requested language (0-100)
    pub direct_rate: f64,
}
