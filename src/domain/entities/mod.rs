mod attendance_record;
mod sync_summary;

pub use attendance_record::{AttendanceDraft, OfflineAttendanceRecord};
pub use sync_summary::{SyncFailure, SyncStatusSnapshot, SyncSummary};
