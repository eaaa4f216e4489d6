use crate::application::ports::RecordStore;
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite};

/// Key-value record store backed by the local SQLite database. One key holds
/// the whole serialized record collection, so the bytes on disk are the same
/// bytes an export produces.
pub struct SqliteRecordStore {
    pool: Pool<Sqlite>,
}

impl SqliteRecordStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        let value: Option<(Vec<u8>,)> =
            sqlx::query_as("SELECT value FROM offline_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.map(|(bytes,)| bytes))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), AppError> {
        let updated_at = Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO offline_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::Database;
    use tempfile::TempDir;

    async fn setup_store() -> (SqliteRecordStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            temp_dir.path().join("store.db").display()
        );
        let pool = Database::initialize(&db_url, 1).await.unwrap();
        (SqliteRecordStore::new(pool), temp_dir)
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let (store, _dir) = setup_store().await;
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_roundtrips_and_overwrites() {
        let (store, _dir) = setup_store().await;

        store.set("records", b"first").await.unwrap();
        assert_eq!(store.get("records").await.unwrap().unwrap(), b"first");

        store.set("records", b"second").await.unwrap();
        assert_eq!(store.get("records").await.unwrap().unwrap(), b"second");
    }

    #[tokio::test]
    async fn values_survive_a_pool_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            temp_dir.path().join("durable.db").display()
        );

        {
            let pool = Database::initialize(&db_url, 1).await.unwrap();
            let store = SqliteRecordStore::new(pool.clone());
            store.set("records", b"persisted").await.unwrap();
            pool.close().await;
        }

        let pool = Database::initialize(&db_url, 1).await.unwrap();
        let store = SqliteRecordStore::new(pool);
        assert_eq!(store.get("records").await.unwrap().unwrap(), b"persisted");
    }
}
