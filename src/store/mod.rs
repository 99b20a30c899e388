//! Record store boundary: one logical table of chart records keyed by email.

mod file;
mod memory;
mod remote;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use remote::{RemoteConfig, RemoteStore};

use crate::models::ChartRecord;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("store io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store data could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup by key.
    async fn find_by_key(&self, key: &str) -> StoreResult<Option<ChartRecord>>;

    /// Insert the record, or fully replace the one sharing its key.
    async fn upsert(&self, record: ChartRecord) -> StoreResult<()>;

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.find_by_key(key).await?.is_some())
    }
}
