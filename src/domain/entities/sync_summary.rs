use crate::domain::value_objects::{RecordId, StudentId};
use serde::{Deserialize, Serialize};

/// Outcome of one sync pass over the pending records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub total_attempted: u32,
    pub newly_synced: u32,
    pub still_failing: u32,
    /// Most recent failure diagnostics, capped so the UI list stays bounded.
    pub recent_failures: Vec<SyncFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncFailure {
    pub record_id: RecordId,
    pub student_id: StudentId,
    pub message: String,
}

/// Derived aggregate over the current local records, for display.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusSnapshot {
    pub total_records: u32,
    pub synced_records: u32,
    /// Records with at least one failed attempt that are still pending.
    pub failed_records: u32,
    pub pending_records: u32,
}
