use super::{RecordStore, StoreResult};
use crate::models::ChartRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredRecords {
    records: BTreeMap<String, ChartRecord>,
}

/// Chart records kept in a single local JSON document.
///
/// A file that exists but cannot be read or parsed is never treated as empty:
/// every call reports it until the file becomes readable again.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<Option<StoredRecords>>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match load_records(&path).await {
            Ok(data) => {
                debug!(path = %path.display(), records = data.records.len(), "opened record file");
                Some(data)
            }
            Err(err) => {
                error!(path = %path.display(), "record file unusable, refusing reads and writes: {err}");
                None
            }
        };
        Self {
            path,
            data: Mutex::new(data),
        }
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn find_by_key(&self, key: &str) -> StoreResult<Option<ChartRecord>> {
        let mut data = self.data.lock().await;
        let loaded = ensure_loaded(&self.path, &mut data).await?;
        Ok(loaded.records.get(key).cloned())
    }

    async fn upsert(&self, record: ChartRecord) -> StoreResult<()> {
        let mut data = self.data.lock().await;
        let loaded = ensure_loaded(&self.path, &mut data).await?;
        let key = record.key.clone();
        let previous = loaded.records.insert(key.clone(), record);

        if let Err(err) = persist_records(&self.path, loaded).await {
            match previous {
                Some(previous) => loaded.records.insert(key, previous),
                None => loaded.records.remove(&key),
            };
            return Err(err);
        }
        Ok(())
    }
}

async fn ensure_loaded<'a>(
    path: &Path,
    slot: &'a mut Option<StoredRecords>,
) -> StoreResult<&'a mut StoredRecords> {
    let data = match slot.take() {
        Some(data) => data,
        None => load_records(path).await?,
    };
    Ok(slot.insert(data))
}

/// A missing file is an empty store; anything else unreadable is an error.
async fn load_records(path: &Path) -> StoreResult<StoredRecords> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(StoredRecords::default()),
        Err(err) => Err(err.into()),
    }
}

async fn persist_records(path: &Path, data: &StoredRecords) -> StoreResult<()> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use chrono::Utc;

    fn record(key: &str, values: &[f64]) -> ChartRecord {
        ChartRecord {
            key: key.to_string(),
            values: values.to_vec(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upsert_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let store = JsonFileStore::open(&path).await;
        store.upsert(record("a@b.com", &[1.0, 2.0, 3.0])).await.unwrap();
        store.upsert(record("a@b.com", &[4.0])).await.unwrap();

        let reopened = JsonFileStore::open(&path).await;
        let found = reopened.find_by_key("a@b.com").await.unwrap().expect("record");
        assert_eq!(found.values, vec![4.0]);
        assert!(reopened.exists("a@b.com").await.unwrap());
        assert!(!reopened.exists("c@d.com").await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_file_is_refused_until_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = JsonFileStore::open(&path).await;
        assert!(matches!(
            store.find_by_key("a@b.com").await,
            Err(StoreError::Decode(_))
        ));
        assert!(store.upsert(record("a@b.com", &[1.0])).await.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"{not json");

        std::fs::write(&path, br#"{"records":{}}"#).unwrap();
        store.upsert(record("a@b.com", &[1.0])).await.unwrap();
        assert!(store.exists("a@b.com").await.unwrap());
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("records.json");

        let store = JsonFileStore::open(&path).await;
        let err = store.upsert(record("a@b.com", &[1.0])).await;
        assert!(err.is_err());
        assert!(store.find_by_key("a@b.com").await.unwrap().is_none());
    }
}
