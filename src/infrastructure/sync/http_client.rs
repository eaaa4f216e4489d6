use crate::application::ports::{SyncAck, SyncClient};
use crate::domain::entities::OfflineAttendanceRecord;
use crate::infrastructure::sync::error::{Result as SyncResult, SyncError};
use crate::shared::config::SyncConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Remote sync endpoint adapter. Submits one record per call to
/// `POST {endpoint}/attendance/sync`; the backend answers with
/// `{ "success": bool, "message": string? }` and is idempotent by record id.
pub struct HttpSyncClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSyncClient {
    pub fn new(settings: &SyncConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn sync_url(&self) -> String {
        format!("{}/attendance/sync", self.endpoint)
    }
}

#[async_trait]
impl SyncClient for HttpSyncClient {
    async fn submit(&self, record: &OfflineAttendanceRecord) -> Result<SyncAck, AppError> {
        let response = self
            .client
            .post(self.sync_url())
            .json(record)
            .send()
            .await
            .map_err(SyncError::from)
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(SyncError::from)
            .map_err(|e| AppError::Network(e.to_string()))?;

        ack_from_parts(status, &body).map_err(|e| AppError::Network(e.to_string()))
    }
}

fn ack_from_parts(status: StatusCode, body: &str) -> SyncResult<SyncAck> {
    if !status.is_success() {
        return Err(SyncError::Status {
            status: status.as_u16(),
            message: body.trim().to_string(),
        });
    }
    serde_json::from_str::<SyncAck>(body).map_err(|err| SyncError::Body(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_ack_is_parsed() {
        let ack = ack_from_parts(StatusCode::OK, r#"{"success":true}"#).unwrap();
        assert!(ack.success);
        assert!(ack.message.is_none());
    }

    #[test]
    fn rejection_keeps_backend_message() {
        let ack = ack_from_parts(
            StatusCode::OK,
            r#"{"success":false,"message":"unknown trip"}"#,
        )
        .unwrap();
        assert!(!ack.success);
        assert_eq!(ack.message.as_deref(), Some("unknown trip"));
    }

    #[test]
    fn http_error_status_is_a_sync_error() {
        let err = ack_from_parts(StatusCode::INTERNAL_SERVER_ERROR, "boom").unwrap_err();
        match err {
            SyncError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_body_is_a_sync_error() {
        let err = ack_from_parts(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, SyncError::Body(_)));
    }

    #[test]
    fn sync_url_normalizes_trailing_slash() {
        let settings = SyncConfig {
            endpoint: "https://api.ridelink.example/".to_string(),
            ..SyncConfig::default()
        };
        let client = HttpSyncClient::new(&settings).unwrap();
        assert_eq!(
            client.sync_url(),
            "https://api.ridelink.example/attendance/sync"
        );
    }
}
