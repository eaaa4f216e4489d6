pub mod connectivity;
pub mod storage;
pub mod sync;
