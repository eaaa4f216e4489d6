pub mod connectivity;
pub mod record_store;
pub mod sync_client;

pub use connectivity::ConnectivityObserver;
pub use record_store::RecordStore;
pub use sync_client::{SyncAck, SyncClient};
