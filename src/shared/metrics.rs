use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const UNSET_MS: u64 = 0;

/// Lock-free success/failure tally with last-event timestamps. The queue
/// carries one per instance for record submissions.
#[derive(Debug)]
pub struct OutcomeMetric {
    success: AtomicU64,
    failure: AtomicU64,
    last_success_ms: AtomicU64,
    last_failure_ms: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
pub struct OutcomeSnapshot {
    pub successes: u64,
    pub failures: u64,
    pub last_success_ms: Option<u64>,
    pub last_failure_ms: Option<u64>,
}

impl OutcomeMetric {
    pub const fn new() -> Self {
        Self {
            success: AtomicU64::new(0),
            failure: AtomicU64::new(0),
            last_success_ms: AtomicU64::new(UNSET_MS),
            last_failure_ms: AtomicU64::new(UNSET_MS),
        }
    }

    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
        self.last_success_ms
            .store(current_unix_ms(), Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failure.fetch_add(1, Ordering::Relaxed);
        self.last_failure_ms
            .store(current_unix_ms(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> OutcomeSnapshot {
        OutcomeSnapshot {
            successes: self.success.load(Ordering::Relaxed),
            failures: self.failure.load(Ordering::Relaxed),
            last_success_ms: nonzero_ms(self.last_success_ms.load(Ordering::Relaxed)),
            last_failure_ms: nonzero_ms(self.last_failure_ms.load(Ordering::Relaxed)),
        }
    }

    pub fn reset(&self) {
        self.success.store(0, Ordering::Relaxed);
        self.failure.store(0, Ordering::Relaxed);
        self.last_success_ms.store(UNSET_MS, Ordering::Relaxed);
        self.last_failure_ms.store(UNSET_MS, Ordering::Relaxed);
    }
}

impl Default for OutcomeMetric {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds since the Unix epoch, zero if the clock is unreadable.
#[inline]
pub fn current_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(UNSET_MS)
}

/// Zero marks "never happened" in the stored timestamps.
#[inline]
pub fn nonzero_ms(value: u64) -> Option<u64> {
    if value == UNSET_MS {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_counts_and_resets() {
        let metric = OutcomeMetric::new();
        metric.record_success();
        metric.record_success();
        metric.record_failure();

        let snapshot = metric.snapshot();
        assert_eq!(snapshot.successes, 2);
        assert_eq!(snapshot.failures, 1);
        assert!(snapshot.last_success_ms.is_some());

        metric.reset();
        let snapshot = metric.snapshot();
        assert_eq!(snapshot.successes, 0);
        assert!(snapshot.last_failure_ms.is_none());
    }
}
