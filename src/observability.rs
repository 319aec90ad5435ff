//! Resolution counters exposed on `/metrics`

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    canonical_resolutions: AtomicU64,
    filtered_resolutions: AtomicU64,
    failed_resolutions: AtomicU64,
    renders: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canonical_resolved(&self) {
        self.canonical_resolutions.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "canonical_resolutions", "Metric incremented");
    }

    pub fn filtered_resolved(&self) {
        self.filtered_resolutions.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "filtered_resolutions", "Metric incremented");
    }

    pub fn resolution_failed(&self) {
        self.failed_resolutions.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "failed_resolutions", "Metric incremented");
    }

    pub fn rendered(&self) {
        self.renders.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "renders", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            canonical_resolutions: self.canonical_resolutions.load(Ordering::Relaxed),
            filtered_resolutions: self.filtered_resolutions.load(Ordering::Relaxed),
            failed_resolutions: self.failed_resolutions.load(Ordering::Relaxed),
            renders: self.renders.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub canonical_resolutions: u64,
    pub filtered_resolutions: u64,
    pub failed_resolutions: u64,
    pub renders: u64,
}
