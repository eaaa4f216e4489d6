use crate::application::ports::{ConnectivityObserver, RecordStore, SyncClient};
use crate::application::services::{OfflineAttendanceQueue, SyncScheduler};
use crate::infrastructure::connectivity::ConnectivityMonitor;
use crate::infrastructure::storage::{Database, DbPool, SqliteRecordStore};
use crate::infrastructure::sync::HttpSyncClient;
use crate::shared::config::AppConfig;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Wiring for embedding hosts: config → database → store → sync client →
/// queue → scheduler. Hosts feed `connectivity` with their online/offline
/// signal and talk to `queue` for everything else.
pub struct AppState {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub queue: Arc<OfflineAttendanceQueue>,
    pub connectivity: Arc<ConnectivityMonitor>,
    scheduler: JoinHandle<()>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        let db_pool =
            Database::initialize(&config.database.url, config.database.max_connections).await?;

        let store: Arc<dyn RecordStore> = Arc::new(SqliteRecordStore::new(db_pool.clone()));
        let sync_client: Arc<dyn SyncClient> = Arc::new(HttpSyncClient::new(&config.sync)?);
        // Devices start offline until the host reports otherwise.
        let connectivity = Arc::new(ConnectivityMonitor::new(false));
        let observer: Arc<dyn ConnectivityObserver> = connectivity.clone();

        let queue = Arc::new(
            OfflineAttendanceQueue::load(store, sync_client, observer.clone(), config.sync.clone())
                .await?,
        );

        let scheduler =
            SyncScheduler::new(queue.clone(), observer, config.sync.clone()).spawn();

        Ok(Self {
            config,
            db_pool,
            queue,
            connectivity,
            scheduler,
        })
    }

    /// Stop the background scheduler. The queue stays usable; only the
    /// periodic/transition-driven passes end.
    pub fn shutdown(&self) {
        self.scheduler.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AttendanceDraft;
    use crate::domain::value_objects::{AttendanceStatus, CaptureMethod};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[tokio::test]
    async fn state_wires_queue_over_sqlite() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.database.url = format!(
            "sqlite://{}?mode=rwc",
            temp_dir.path().join("ridelink.db").display()
        );
        config.sync.auto_sync = false;

        let state = AppState::new(config).await.unwrap();

        let record = state
            .queue
            .enqueue(AttendanceDraft {
                student_id: 42,
                trip_id: 7,
                status: AttendanceStatus::Present,
                method: CaptureMethod::Rfid,
                notes: "front door pickup".to_string(),
                attendance_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                boarding_time: None,
                alighting_time: None,
            })
            .await
            .unwrap();

        let status = state.queue.sync_status().await;
        assert_eq!(status.total_records, 1);
        assert_eq!(status.pending_records, 1);
        assert_eq!(record.method, CaptureMethod::Rfid);

        state.shutdown();
        state.db_pool.close().await;
    }
}
