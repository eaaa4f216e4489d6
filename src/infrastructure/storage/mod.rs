mod database;
mod sqlite_store;

pub use database::{Database, DbPool};
pub use sqlite_store::SqliteRecordStore;
