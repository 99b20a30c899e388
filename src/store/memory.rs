use super::{RecordStore, StoreResult};
use crate::models::ChartRecord;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, ChartRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ChartRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.key.clone(), record))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    /// Drops a record without going through the coordinators.
    pub async fn remove(&self, key: &str) -> Option<ChartRecord> {
        self.records.lock().await.remove(key)
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_key(&self, key: &str) -> StoreResult<Option<ChartRecord>> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn upsert(&self, record: ChartRecord) -> StoreResult<()> {
        self.records.lock().await.insert(record.key.clone(), record);
        Ok(())
    }
}
