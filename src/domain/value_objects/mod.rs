mod attendance_status;
mod capture_method;
mod record_id;
mod student_id;
mod trip_id;

pub use attendance_status::AttendanceStatus;
pub use capture_method::CaptureMethod;
pub use record_id::RecordId;
pub use student_id::StudentId;
pub use trip_id::TripId;
