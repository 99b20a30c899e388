//! Client-side memory of which key is active. Never authoritative: the
//! persisted record always wins over anything held here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPointer {
    pub key: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    active: Option<SessionPointer>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&SessionPointer> {
        self.active.as_ref()
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.as_ref().map(|pointer| pointer.key.as_str())
    }

    pub fn point_at(&mut self, key: impl Into<String>, updated_at: DateTime<Utc>) {
        self.active = Some(SessionPointer {
            key: key.into(),
            updated_at,
        });
    }
}

/// Local file remembering the last session pointer across restarts.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn remembered(&self) -> Option<SessionPointer> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(pointer) => Some(pointer),
                Err(err) => {
                    error!("failed to parse session cache: {err}");
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read session cache: {err}");
                None
            }
        }
    }

    /// Best effort: a cache that cannot be written only costs the next restore.
    pub async fn remember(&self, pointer: &SessionPointer) {
        let payload = match serde_json::to_vec_pretty(pointer) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("failed to encode session cache: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, payload).await {
            warn!(path = %self.path.display(), "failed to write session cache: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cache_round_trips_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"));
        assert!(cache.remembered().await.is_none());

        let mut session = Session::new();
        session.point_at("a@b.com", Utc::now());
        cache.remember(session.active().unwrap()).await;

        assert_eq!(cache.remembered().await.as_ref(), session.active());
    }

    #[tokio::test]
    async fn unwritable_cache_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("nope").join("session.json"));
        cache
            .remember(&SessionPointer {
                key: "a@b.com".into(),
                updated_at: Utc::now(),
            })
            .await;
        assert!(cache.remembered().await.is_none());
    }
}
