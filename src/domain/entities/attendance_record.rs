use crate::domain::value_objects::{
    AttendanceStatus, CaptureMethod, RecordId, StudentId, TripId,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One attendance observation captured on the device, possibly without
/// connectivity. Field names and enum spellings are the export/import wire
/// format and must stay stable across versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfflineAttendanceRecord {
    pub id: RecordId,
    pub student_id: StudentId,
    pub trip_id: TripId,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boarding_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alighting_time: Option<DateTime<Utc>>,
    pub method: CaptureMethod,
    pub notes: String,
    pub attendance_date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub synced: bool,
    pub retry_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Observation fields supplied by the capture UI. Identifier, timestamp and
/// sync bookkeeping are derived when the record is created.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceDraft {
    pub student_id: i64,
    pub trip_id: i64,
    pub status: AttendanceStatus,
    pub method: CaptureMethod,
    pub notes: String,
    pub attendance_date: NaiveDate,
    pub boarding_time: Option<DateTime<Utc>>,
    pub alighting_time: Option<DateTime<Utc>>,
}

impl OfflineAttendanceRecord {
    pub fn new(
        id: RecordId,
        student_id: StudentId,
        trip_id: TripId,
        draft: &AttendanceDraft,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student_id,
            trip_id,
            status: draft.status,
            boarding_time: draft.boarding_time,
            alighting_time: draft.alighting_time,
            method: draft.method,
            notes: draft.notes.clone(),
            attendance_date: draft.attendance_date,
            timestamp,
            synced: false,
            retry_count: 0,
            last_error: None,
        }
    }

    /// The backend durably accepted this record. Terminal: the record is
    /// never mutated again afterwards.
    pub fn mark_synced(&mut self) {
        self.synced = true;
        self.retry_count = 0;
        self.last_error = None;
    }

    /// One sync attempt failed; the record stays pending.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.retry_count += 1;
        self.last_error = Some(message.into());
    }

    /// Manual corrective edit by an operator. Observation fields are replaced
    /// and retry bookkeeping starts over. Identifier and capture timestamp
    /// are preserved.
    pub fn apply_edit(&mut self, student_id: StudentId, trip_id: TripId, draft: &AttendanceDraft) {
        self.student_id = student_id;
        self.trip_id = trip_id;
        self.status = draft.status;
        self.boarding_time = draft.boarding_time;
        self.alighting_time = draft.alighting_time;
        self.method = draft.method;
        self.notes = draft.notes.clone();
        self.attendance_date = draft.attendance_date;
        self.retry_count = 0;
        self.last_error = None;
    }

    pub fn is_pending(&self) -> bool {
        !self.synced
    }

    pub fn has_failed(&self) -> bool {
        !self.synced && self.retry_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> AttendanceDraft {
        AttendanceDraft {
            student_id: 42,
            trip_id: 7,
            status: AttendanceStatus::Present,
            method: CaptureMethod::Manual,
            notes: String::new(),
            attendance_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            boarding_time: None,
            alighting_time: None,
        }
    }

    fn sample_record() -> OfflineAttendanceRecord {
        let draft = sample_draft();
        OfflineAttendanceRecord::new(
            RecordId::generate(),
            StudentId::new(draft.student_id).unwrap(),
            TripId::new(draft.trip_id).unwrap(),
            &draft,
            Utc::now(),
        )
    }

    #[test]
    fn new_record_starts_pending() {
        let record = sample_record();
        assert!(!record.synced);
        assert_eq!(record.retry_count, 0);
        assert!(record.last_error.is_none());
        assert!(record.is_pending());
    }

    #[test]
    fn failure_then_success_resets_retry_count() {
        let mut record = sample_record();
        record.record_failure("timeout");
        record.record_failure("timeout");
        assert_eq!(record.retry_count, 2);
        assert!(record.has_failed());

        record.mark_synced();
        assert!(record.synced);
        assert_eq!(record.retry_count, 0);
        assert!(record.last_error.is_none());
    }

    #[test]
    fn edit_resets_bookkeeping_but_keeps_identity() {
        let mut record = sample_record();
        let original_id = record.id.clone();
        let original_timestamp = record.timestamp;
        record.record_failure("rejected");

        let mut draft = sample_draft();
        draft.status = AttendanceStatus::Late;
        record.apply_edit(
            StudentId::new(42).unwrap(),
            TripId::new(7).unwrap(),
            &draft,
        );

        assert_eq!(record.id, original_id);
        assert_eq!(record.timestamp, original_timestamp);
        assert_eq!(record.status, AttendanceStatus::Late);
        assert_eq!(record.retry_count, 0);
        assert!(record.last_error.is_none());
    }

    #[test]
    fn wire_format_uses_camel_case_fields() {
        let record = sample_record();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("studentId").is_some());
        assert!(json.get("tripId").is_some());
        assert!(json.get("attendanceDate").is_some());
        assert!(json.get("retryCount").is_some());
        assert!(json.get("lastError").is_none());
    }
}
