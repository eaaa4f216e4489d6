mod attendance_queue;
mod sync_scheduler;

pub use attendance_queue::{OfflineAttendanceQueue, RECORDS_KEY};
pub use sync_scheduler::SyncScheduler;
