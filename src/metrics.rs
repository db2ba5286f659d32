// Bridge metrics module
//
// Lightweight counters for how dialogs terminate and how often the bridge
// had to absorb misbehaving collaborators.

use crate::models::Outcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Bridge-wide counters
///
/// Uses atomic operations so the affine context and caller threads can record
/// without locking. Shared by `Arc` between a bridge and its notifier.
#[derive(Debug)]
pub struct BridgeMetrics {
    /// Requests accepted by `show`
    pub dialogs_requested: AtomicU64,

    /// Outcomes delivered as an explicit choice
    pub dialogs_chosen: AtomicU64,

    /// Outcomes delivered as a dismissal
    pub dialogs_cancelled: AtomicU64,

    /// Outcomes delivered through the error channel
    pub dialogs_failed: AtomicU64,

    /// Platform signals ignored because the dialog had already completed
    pub duplicate_signals: AtomicU64,

    /// Successful observer deliveries
    pub observer_deliveries: AtomicU64,

    /// Observer callbacks that panicked
    pub observer_panics: AtomicU64,

    /// Jobs the affine executor refused
    pub executor_rejections: AtomicU64,

    start_time: Instant,
}

impl BridgeMetrics {
    pub fn new() -> Self {
        Self {
            dialogs_requested: AtomicU64::new(0),
            dialogs_chosen: AtomicU64::new(0),
            dialogs_cancelled: AtomicU64::new(0),
            dialogs_failed: AtomicU64::new(0),
            duplicate_signals: AtomicU64::new(0),
            observer_deliveries: AtomicU64::new(0),
            observer_panics: AtomicU64::new(0),
            executor_rejections: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_requested(&self) {
        self.dialogs_requested.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delivered outcome under its variant
    pub fn record_outcome(&self, outcome: &Outcome) {
        let counter = match outcome {
            Outcome::Chosen { .. } => &self.dialogs_chosen,
            Outcome::Cancelled { .. } => &self.dialogs_cancelled,
            Outcome::Failed { .. } => &self.dialogs_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate_signal(&self) {
        self.duplicate_signals.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_observer_delivery(&self) {
        self.observer_deliveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_observer_panic(&self) {
        self.observer_panics.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_executor_rejection(&self) {
        self.executor_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Total outcomes delivered across all variants
    pub fn completed(&self) -> u64 {
        self.dialogs_chosen.load(Ordering::Relaxed)
            + self.dialogs_cancelled.load(Ordering::Relaxed)
            + self.dialogs_failed.load(Ordering::Relaxed)
    }

    /// Requests still waiting for an outcome
    pub fn in_flight(&self) -> u64 {
        self.dialogs_requested
            .load(Ordering::Relaxed)
            .saturating_sub(self.completed())
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn log_summary(&self) {
        tracing::info!("=== Dialog Bridge Metrics ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Dialogs: {} requested, {} chosen, {} cancelled, {} failed, {} in flight",
            self.dialogs_requested.load(Ordering::Relaxed),
            self.dialogs_chosen.load(Ordering::Relaxed),
            self.dialogs_cancelled.load(Ordering::Relaxed),
            self.dialogs_failed.load(Ordering::Relaxed),
            self.in_flight()
        );
        tracing::info!(
            "Duplicate signals: {}, executor rejections: {}",
            self.duplicate_signals.load(Ordering::Relaxed),
            self.executor_rejections.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Observer deliveries: {}, observer panics: {}",
            self.observer_deliveries.load(Ordering::Relaxed),
            self.observer_panics.load(Ordering::Relaxed)
        );
    }
}

impl Default for BridgeMetrics {
    fn default() -> Self {
        Self::new()
    }
}
