use crate::application::ports::ConnectivityObserver;
use crate::application::services::OfflineAttendanceQueue;
use crate::infrastructure::sync::metrics::{self, PassOutcomeMetadata, PassOutcomeStatus};
use crate::shared::config::SyncConfig;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Drives `sync_all` from the outside: once on every offline→online
/// transition, and periodically while connectivity holds. The queue itself
/// owns no timers, so tests can call `sync_all` directly.
pub struct SyncScheduler {
    queue: Arc<OfflineAttendanceQueue>,
    connectivity: Arc<dyn ConnectivityObserver>,
    settings: SyncConfig,
    transitions: tokio::sync::watch::Receiver<bool>,
}

impl SyncScheduler {
    pub fn new(
        queue: Arc<OfflineAttendanceQueue>,
        connectivity: Arc<dyn ConnectivityObserver>,
        settings: SyncConfig,
    ) -> Self {
        // Subscribe at construction so transitions fired between `new` and
        // the task's first poll are not lost.
        let transitions = connectivity.subscribe();
        Self {
            queue,
            connectivity,
            settings,
            transitions,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        let mut transitions = self.transitions.clone();
        let mut ticker =
            tokio::time::interval(Duration::from_secs(self.settings.sync_interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first interval tick fires immediately; skip it so startup does
        // not race the host's initial connectivity signal.
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = transitions.changed() => {
                    if changed.is_err() {
                        tracing::debug!("connectivity monitor dropped, scheduler stopping");
                        break;
                    }
                    let online = *transitions.borrow_and_update();
                    if online {
                        self.run_pass("connectivity-restored").await;
                    }
                }
                _ = ticker.tick() => {
                    if self.settings.auto_sync && self.connectivity.is_online() {
                        self.run_pass("interval").await;
                    }
                }
            }
        }
    }

    async fn run_pass(&self, trigger: &str) {
        let started = Instant::now();
        let duration_ms = |started: Instant| started.elapsed().as_millis() as u64;
        match self.queue.sync_all().await {
            Ok(summary) => {
                metrics::record_outcome(
                    PassOutcomeStatus::Success,
                    &PassOutcomeMetadata {
                        trigger: Some(trigger.to_string()),
                        duration_ms: Some(duration_ms(started)),
                        attempted: Some(summary.total_attempted),
                        synced: Some(summary.newly_synced),
                        failing: Some(summary.still_failing),
                        ..PassOutcomeMetadata::default()
                    },
                );
                tracing::info!(
                    trigger,
                    total_attempted = summary.total_attempted,
                    newly_synced = summary.newly_synced,
                    still_failing = summary.still_failing,
                    "scheduled sync pass finished"
                );
            }
            Err(err) => {
                metrics::record_outcome(
                    PassOutcomeStatus::Failure,
                    &PassOutcomeMetadata {
                        trigger: Some(trigger.to_string()),
                        duration_ms: Some(duration_ms(started)),
                        ..PassOutcomeMetadata::default()
                    },
                );
                tracing::error!(trigger, error = %err, "scheduled sync pass failed");
            }
        }
    }
}
