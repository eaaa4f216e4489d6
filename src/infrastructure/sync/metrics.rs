use crate::shared::metrics::{current_unix_ms, nonzero_ms};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PassOutcomeStatus {
    Success,
    Failure,
}

/// Process-local view of how scheduled sync passes have been going, for
/// diagnostics surfaces.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncPassMetricsSnapshot {
    pub total_success: u64,
    pub total_failure: u64,
    pub consecutive_failure: u64,
    pub last_success_ms: Option<u64>,
    pub last_failure_ms: Option<u64>,
    pub last_outcome: Option<PassOutcomeStatus>,
    pub last_trigger: Option<String>,
    pub last_duration_ms: Option<u64>,
    pub last_attempted: Option<u32>,
    pub last_synced: Option<u32>,
    pub last_failing: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcomeMetadata {
    pub trigger: Option<String>,
    pub duration_ms: Option<u64>,
    pub attempted: Option<u32>,
    pub synced: Option<u32>,
    pub failing: Option<u32>,
}

#[derive(Default, Clone)]
struct LastPassMetadata {
    last_outcome: Option<PassOutcomeStatus>,
    trigger: Option<String>,
    duration_ms: Option<u64>,
    attempted: Option<u32>,
    synced: Option<u32>,
    failing: Option<u32>,
}

struct SyncPassMetrics {
    success: AtomicU64,
    failure: AtomicU64,
    consecutive_failure: AtomicU64,
    last_success_ms: AtomicU64,
    last_failure_ms: AtomicU64,
    metadata: Mutex<LastPassMetadata>,
}

impl SyncPassMetrics {
    fn new() -> Self {
        Self {
            success: AtomicU64::new(0),
            failure: AtomicU64::new(0),
            consecutive_failure: AtomicU64::new(0),
            last_success_ms: AtomicU64::new(0),
            last_failure_ms: AtomicU64::new(0),
            metadata: Mutex::new(LastPassMetadata::default()),
        }
    }

    fn record(&self, status: PassOutcomeStatus, meta: &PassOutcomeMetadata) {
        match status {
            PassOutcomeStatus::Success => {
                self.success.fetch_add(1, Ordering::Relaxed);
                self.last_success_ms
                    .store(current_unix_ms(), Ordering::Relaxed);
                self.consecutive_failure.store(0, Ordering::Relaxed);
            }
            PassOutcomeStatus::Failure => {
                self.failure.fetch_add(1, Ordering::Relaxed);
                self.last_failure_ms
                    .store(current_unix_ms(), Ordering::Relaxed);
                self.consecutive_failure.fetch_add(1, Ordering::Relaxed);
            }
        }

        if let Ok(mut guard) = self.metadata.lock() {
            guard.last_outcome = Some(status);
            guard.trigger = meta.trigger.clone();
            guard.duration_ms = meta.duration_ms;
            guard.attempted = meta.attempted;
            guard.synced = meta.synced;
            guard.failing = meta.failing;
        }
    }

    fn snapshot(&self) -> SyncPassMetricsSnapshot {
        let metadata = self
            .metadata
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|_| LastPassMetadata::default());

        SyncPassMetricsSnapshot {
            total_success: self.success.load(Ordering::Relaxed),
            total_failure: self.failure.load(Ordering::Relaxed),
            consecutive_failure: self.consecutive_failure.load(Ordering::Relaxed),
            last_success_ms: nonzero_ms(self.last_success_ms.load(Ordering::Relaxed)),
            last_failure_ms: nonzero_ms(self.last_failure_ms.load(Ordering::Relaxed)),
            last_outcome: metadata.last_outcome,
            last_trigger: metadata.trigger,
            last_duration_ms: metadata.duration_ms,
            last_attempted: metadata.attempted,
            last_synced: metadata.synced,
            last_failing: metadata.failing,
        }
    }
}

static SYNC_PASS_METRICS: LazyLock<SyncPassMetrics> = LazyLock::new(SyncPassMetrics::new);

pub fn record_outcome(
    status: PassOutcomeStatus,
    metadata: &PassOutcomeMetadata,
) -> SyncPassMetricsSnapshot {
    SYNC_PASS_METRICS.record(status, metadata);
    SYNC_PASS_METRICS.snapshot()
}

pub fn snapshot() -> SyncPassMetricsSnapshot {
    SYNC_PASS_METRICS.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Metrics are process-global, so this asserts deltas rather than
    // absolute totals.
    #[test]
    fn record_outcome_updates_counters_and_metadata() {
        let before = snapshot();

        let meta = PassOutcomeMetadata {
            trigger: Some("interval".into()),
            duration_ms: Some(800),
            attempted: Some(3),
            synced: Some(2),
            failing: Some(1),
        };
        let after = record_outcome(PassOutcomeStatus::Success, &meta);

        assert_eq!(after.total_success, before.total_success + 1);
        assert_eq!(after.consecutive_failure, 0);
        assert_eq!(after.last_outcome, Some(PassOutcomeStatus::Success));
        assert_eq!(after.last_trigger.as_deref(), Some("interval"));
        assert_eq!(after.last_attempted, Some(3));

        let failure_meta = PassOutcomeMetadata {
            trigger: Some("connectivity-restored".into()),
            ..PassOutcomeMetadata::default()
        };
        let after_failure = record_outcome(PassOutcomeStatus::Failure, &failure_meta);
        assert_eq!(after_failure.total_failure, after.total_failure + 1);
        assert!(after_failure.consecutive_failure >= 1);
        assert_eq!(after_failure.last_outcome, Some(PassOutcomeStatus::Failure));
    }
}
