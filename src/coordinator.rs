//! Save/load reconciliation between the working values and the record store.
//!
//! Saving is a two-step protocol: `save` refuses to touch an existing record
//! and hands back its values instead, and only `force_save` replaces it.

use crate::errors::{LoadError, SaveError};
use crate::key::EmailKey;
use crate::models::ChartRecord;
use crate::session::Session;
use crate::store::RecordStore;
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub key: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Saved),
    ConfirmationRequired { previous_values: Vec<f64> },
}

#[derive(Clone)]
pub struct Coordinator {
    store: Arc<dyn RecordStore>,
}

impl Coordinator {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn save(
        &self,
        session: &mut Session,
        key: &str,
        values: &[f64],
    ) -> Result<SaveOutcome, SaveError> {
        let key = EmailKey::parse(key)?;

        let existing = self.store.find_by_key(key.as_str()).await.map_err(|err| {
            warn!(%key, "existence check failed: {err}");
            SaveError::StoreUnavailable(err)
        })?;

        if let Some(existing) = existing {
            debug!(%key, "record exists, asking for overwrite confirmation");
            return Ok(SaveOutcome::ConfirmationRequired {
                previous_values: existing.values,
            });
        }

        let saved = self.write(session, key, values).await?;
        Ok(SaveOutcome::Saved(saved))
    }

    /// Replaces whatever is stored under `key` without checking first.
    pub async fn force_save(
        &self,
        session: &mut Session,
        key: &str,
        values: &[f64],
    ) -> Result<Saved, SaveError> {
        let key = EmailKey::parse(key)?;
        self.write(session, key, values).await
    }

    pub async fn load(&self, session: &mut Session, key: &str) -> Result<ChartRecord, LoadError> {
        let key = EmailKey::parse(key)?;

        let record = self.store.find_by_key(key.as_str()).await.map_err(|err| {
            warn!(%key, "load failed: {err}");
            LoadError::StoreUnavailable(err)
        })?;
        let record = record.ok_or_else(|| LoadError::NotFound(key.to_string()))?;

        session.point_at(key.as_str(), record.updated_at);
        info!(%key, values = record.values.len(), "loaded chart values");
        Ok(record)
    }

    /// Start-up restore for a remembered key. Every failure, including a
    /// missing record, means there is nothing to restore.
    pub async fn restore(&self, session: &mut Session, remembered: Option<&str>) -> Option<ChartRecord> {
        let key = remembered?;
        match self.load(session, key).await {
            Ok(record) => Some(record),
            Err(err) => {
                debug!("nothing restored for remembered key: {err}");
                None
            }
        }
    }

    async fn write(
        &self,
        session: &mut Session,
        key: EmailKey,
        values: &[f64],
    ) -> Result<Saved, SaveError> {
        let record = ChartRecord {
            key: key.to_string(),
            values: values.to_vec(),
            // Hosted timestamp columns keep microseconds.
            updated_at: Utc::now().trunc_subsecs(6),
        };
        let updated_at = record.updated_at;

        self.store.upsert(record).await.map_err(|err| {
            warn!(%key, "upsert failed: {err}");
            SaveError::StoreUnavailable(err)
        })?;

        session.point_at(key.as_str(), updated_at);
        info!(%key, values = values.len(), "saved chart values");
        Ok(Saved {
            key: key.to_string(),
            updated_at,
        })
    }
}
