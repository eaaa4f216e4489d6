use crate::application::ports::{ConnectivityObserver, RecordStore, SyncClient};
use crate::domain::entities::{
    AttendanceDraft, OfflineAttendanceRecord, SyncFailure, SyncStatusSnapshot, SyncSummary,
};
use crate::domain::value_objects::{RecordId, StudentId, TripId};
use crate::shared::config::SyncConfig;
use crate::shared::error::{AppError, Result};
use crate::shared::metrics::{OutcomeMetric, OutcomeSnapshot};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Well-known key the serialized record collection lives under in the
/// durable store.
pub const RECORDS_KEY: &str = "offline_attendance_records";

#[derive(Default)]
struct SyncState {
    in_progress: bool,
    last_summary: SyncSummary,
}

/// Durable buffer of attendance observations captured while the device has
/// no connectivity, replayed against the backend once connectivity returns.
///
/// Mutations follow a build-candidate / persist / commit sequence: the
/// in-memory collection is only replaced after the store write succeeded, so
/// a storage failure never leaves memory ahead of disk.
pub struct OfflineAttendanceQueue {
    store: Arc<dyn RecordStore>,
    sync_client: Arc<dyn SyncClient>,
    connectivity: Arc<dyn ConnectivityObserver>,
    settings: SyncConfig,
    records: Mutex<Vec<OfflineAttendanceRecord>>,
    sync_state: Mutex<SyncState>,
    submission_metrics: OutcomeMetric,
}

impl OfflineAttendanceQueue {
    /// Hydrate the queue from whatever the durable store currently holds.
    /// A missing key is an empty queue, not an error.
    pub async fn load(
        store: Arc<dyn RecordStore>,
        sync_client: Arc<dyn SyncClient>,
        connectivity: Arc<dyn ConnectivityObserver>,
        settings: SyncConfig,
    ) -> Result<Self> {
        let records = match store.get(RECORDS_KEY).await? {
            Some(bytes) => serde_json::from_slice::<Vec<OfflineAttendanceRecord>>(&bytes)?,
            None => Vec::new(),
        };

        tracing::debug!(count = records.len(), "offline attendance queue loaded");

        Ok(Self {
            store,
            sync_client,
            connectivity,
            settings,
            records: Mutex::new(records),
            sync_state: Mutex::new(SyncState::default()),
            submission_metrics: OutcomeMetric::new(),
        })
    }

    /// Validate and persist one captured observation. No network traffic;
    /// the record is written to the durable store before this returns.
    pub async fn enqueue(&self, draft: AttendanceDraft) -> Result<OfflineAttendanceRecord> {
        let student_id = StudentId::new(draft.student_id).map_err(AppError::ValidationError)?;
        let trip_id = TripId::new(draft.trip_id).map_err(AppError::ValidationError)?;

        let record = OfflineAttendanceRecord::new(
            RecordId::generate(),
            student_id,
            trip_id,
            &draft,
            Utc::now(),
        );

        let mut records = self.records.lock().await;
        let mut candidate = records.clone();
        candidate.push(record.clone());
        self.persist(&candidate).await?;
        *records = candidate;

        tracing::debug!(
            record_id = %record.id,
            student_id = %record.student_id,
            trip_id = %record.trip_id,
            "attendance record queued"
        );

        Ok(record)
    }

    /// Replay every pending record against the backend. At most one pass
    /// runs at a time; a call while a pass is in flight is a no-op that
    /// returns the last known summary. Offline, nothing is attempted.
    pub async fn sync_all(&self) -> Result<SyncSummary> {
        {
            let mut state = self.sync_state.lock().await;
            if state.in_progress {
                tracing::debug!("sync already in progress, returning last summary");
                return Ok(state.last_summary.clone());
            }
            if !self.connectivity.is_online() {
                tracing::debug!("sync requested while offline, nothing attempted");
                return Ok(SyncSummary::default());
            }
            state.in_progress = true;
        }

        let result = self.run_sync_pass().await;

        let mut state = self.sync_state.lock().await;
        state.in_progress = false;
        if let Ok(summary) = &result {
            state.last_summary = summary.clone();
        }
        result
    }

    async fn run_sync_pass(&self) -> Result<SyncSummary> {
        let started = Instant::now();
        let pending: Vec<OfflineAttendanceRecord> = {
            let records = self.records.lock().await;
            records.iter().filter(|r| r.is_pending()).cloned().collect()
        };

        if pending.is_empty() {
            return Ok(SyncSummary::default());
        }

        let timeout = Duration::from_secs(self.settings.request_timeout_secs);
        let submissions = pending.into_iter().map(|record| {
            let client = Arc::clone(&self.sync_client);
            async move {
                let outcome = match tokio::time::timeout(timeout, client.submit(&record)).await {
                    Ok(Ok(ack)) if ack.success => Ok(()),
                    Ok(Ok(ack)) => Err(ack
                        .message
                        .unwrap_or_else(|| "Record rejected by backend".to_string())),
                    Ok(Err(err)) => Err(err.to_string()),
                    Err(_) => Err(format!(
                        "Sync request timed out after {}s",
                        timeout.as_secs()
                    )),
                };
                (record, outcome)
            }
        });
        let outcomes = futures::future::join_all(submissions).await;

        let mut summary = SyncSummary {
            total_attempted: outcomes.len() as u32,
            ..SyncSummary::default()
        };

        let mut records = self.records.lock().await;
        let mut candidate = records.clone();
        for (submitted, outcome) in outcomes {
            // The record may have been deleted or corrected while its
            // submission was in flight. A stale outcome is dropped; an
            // edited record stays pending and goes out again next pass.
            let Some(record) = candidate.iter_mut().find(|r| r.id == submitted.id) else {
                continue;
            };
            if *record != submitted {
                continue;
            }
            match outcome {
                Ok(()) => {
                    record.mark_synced();
                    self.submission_metrics.record_success();
                    summary.newly_synced += 1;
                }
                Err(message) => {
                    record.record_failure(message.clone());
                    self.submission_metrics.record_failure();
                    summary.still_failing += 1;
                    if summary.recent_failures.len() < self.settings.max_reported_failures {
                        summary.recent_failures.push(SyncFailure {
                            record_id: submitted.id.clone(),
                            student_id: submitted.student_id,
                            message,
                        });
                    }
                }
            }
        }
        self.persist(&candidate).await?;
        *records = candidate;
        drop(records);

        tracing::info!(
            total_attempted = summary.total_attempted,
            newly_synced = summary.newly_synced,
            still_failing = summary.still_failing,
            duration_ms = started.elapsed().as_millis() as u64,
            "sync pass completed"
        );

        Ok(summary)
    }

    /// Remove one record regardless of its synced state. Deleting an unknown
    /// id is a no-op.
    pub async fn delete_record(&self, id: &RecordId) -> Result<()> {
        let mut records = self.records.lock().await;
        if !records.iter().any(|r| &r.id == id) {
            return Ok(());
        }
        let candidate: Vec<_> = records.iter().filter(|r| &r.id != id).cloned().collect();
        self.persist(&candidate).await?;
        *records = candidate;
        Ok(())
    }

    /// Remove every synced record; pending records survive regardless of
    /// their retry count. Returns the number removed.
    pub async fn clear_synced(&self) -> Result<u32> {
        let mut records = self.records.lock().await;
        let candidate: Vec<_> = records.iter().filter(|r| !r.synced).cloned().collect();
        let removed = (records.len() - candidate.len()) as u32;
        if removed > 0 {
            self.persist(&candidate).await?;
            *records = candidate;
        }
        Ok(removed)
    }

    /// Full current local state, for backup and diagnostics.
    pub async fn export_all(&self) -> Result<Vec<OfflineAttendanceRecord>> {
        Ok(self.records.lock().await.clone())
    }

    /// Merge previously exported records by id. Existing ids are skipped,
    /// never overwritten, so applying the same export twice adds nothing the
    /// second time. Returns the number newly added.
    pub async fn import_many(&self, incoming: Vec<OfflineAttendanceRecord>) -> Result<u32> {
        let mut records = self.records.lock().await;
        let mut candidate = records.clone();
        let mut added = 0u32;
        for record in incoming {
            if candidate.iter().any(|r| r.id == record.id) {
                continue;
            }
            candidate.push(record);
            added += 1;
        }
        if added > 0 {
            self.persist(&candidate).await?;
            *records = candidate;
        }
        Ok(added)
    }

    /// Manual corrective edit: replace the observation fields of a pending
    /// record and reset its retry bookkeeping. Synced records are immutable.
    pub async fn update_record(
        &self,
        id: &RecordId,
        draft: AttendanceDraft,
    ) -> Result<OfflineAttendanceRecord> {
        let student_id = StudentId::new(draft.student_id).map_err(AppError::ValidationError)?;
        let trip_id = TripId::new(draft.trip_id).map_err(AppError::ValidationError)?;

        let mut records = self.records.lock().await;
        let mut candidate = records.clone();
        let record = candidate
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Attendance record {id} not found")))?;
        if record.synced {
            return Err(AppError::InvalidInput(
                "Synced records cannot be edited".to_string(),
            ));
        }
        record.apply_edit(student_id, trip_id, &draft);
        let updated = record.clone();
        self.persist(&candidate).await?;
        *records = candidate;
        Ok(updated)
    }

    /// Snapshot of all records, never a live reference.
    pub async fn snapshot(&self) -> Vec<OfflineAttendanceRecord> {
        self.records.lock().await.clone()
    }

    /// Derived aggregate over the current records, for display.
    pub async fn sync_status(&self) -> SyncStatusSnapshot {
        let records = self.records.lock().await;
        let total_records = records.len() as u32;
        let synced_records = records.iter().filter(|r| r.synced).count() as u32;
        let failed_records = records.iter().filter(|r| r.has_failed()).count() as u32;
        SyncStatusSnapshot {
            total_records,
            synced_records,
            failed_records,
            pending_records: total_records - synced_records,
        }
    }

    pub fn submission_metrics(&self) -> OutcomeSnapshot {
        self.submission_metrics.snapshot()
    }

    async fn persist(&self, records: &[OfflineAttendanceRecord]) -> Result<()> {
        let bytes = serde_json::to_vec(records)?;
        self.store.set(RECORDS_KEY, &bytes).await
    }
}
