pub mod error;
pub mod http_client;
pub mod metrics;

pub use error::SyncError;
pub use http_client::HttpSyncClient;
