use thiserror::Error;

/// Failures of the HTTP sync adapter. The queue folds every variant into
/// per-record retry bookkeeping; none of them aborts a batch.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Sync request timed out")]
    Timeout,

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unreadable sync response: {0}")]
    Body(String),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Timeout
        } else {
            SyncError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
