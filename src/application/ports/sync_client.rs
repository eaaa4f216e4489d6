use crate::domain::entities::OfflineAttendanceRecord;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the backend for one submitted record.
/// `success: false` means the backend looked at the record and declined it;
/// transport problems surface as `Err` instead. Both count as the same
/// failure category for retry bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SyncAck {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Remote authority accepting one serialized record per call. The backend is
/// expected to be idempotent by record id; the client only guarantees
/// at-least-once delivery under retry.
#[async_trait]
pub trait SyncClient: Send + Sync {
    async fn submit(&self, record: &OfflineAttendanceRecord) -> Result<SyncAck, AppError>;
}
