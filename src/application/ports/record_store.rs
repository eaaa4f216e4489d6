use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable key-value persistence the queue writes through. Implementations
/// must survive process restart; an in-memory double is fine for tests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError>;
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError>;
}
