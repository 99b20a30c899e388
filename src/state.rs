use crate::chart::default_values;
use crate::coordinator::Coordinator;
use crate::session::{Session, SessionCache};
use std::sync::Arc;
use tokio::sync::Mutex;

/// What the page currently shows, plus the session it belongs to.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub session: Session,
    pub values: Vec<f64>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            session: Session::new(),
            values: default_values(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Coordinator,
    pub cache: SessionCache,
    /// Held for the whole of a coordinator call, so calls never overlap.
    pub dashboard: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(coordinator: Coordinator, cache: SessionCache, dashboard: Dashboard) -> Self {
        Self {
            coordinator,
            cache,
            dashboard: Arc::new(Mutex::new(dashboard)),
        }
    }

    /// Runs the start-up restore for whatever key the cache remembers.
    pub async fn restore(coordinator: Coordinator, cache: SessionCache) -> Self {
        let mut dashboard = Dashboard::default();
        let remembered = cache.remembered().await;
        let restored = coordinator
            .restore(&mut dashboard.session, remembered.as_ref().map(|pointer| pointer.key.as_str()))
            .await;
        if let Some(record) = restored {
            dashboard.values = record.values;
        }
        Self::new(coordinator, cache, dashboard)
    }
}
