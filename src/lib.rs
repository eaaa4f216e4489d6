pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use application::ports::{ConnectivityObserver, RecordStore, SyncAck, SyncClient};
pub use application::services::{OfflineAttendanceQueue, SyncScheduler};
pub use domain::entities::{
    AttendanceDraft, OfflineAttendanceRecord, SyncFailure, SyncStatusSnapshot, SyncSummary,
};
pub use domain::value_objects::{AttendanceStatus, CaptureMethod, RecordId, StudentId, TripId};
pub use shared::config::AppConfig;
pub use shared::error::{AppError, Result};
pub use state::AppState;

/// Install the tracing subscriber for host binaries. Honors `RUST_LOG`,
/// defaulting to debug output for this crate.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ridelink_offline=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
