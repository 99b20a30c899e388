use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use call_analytics::errors::{LoadError, SaveError};
use call_analytics::models::ChartRecord;
use call_analytics::session::{Session, SessionCache};
use call_analytics::state::Dashboard;
use call_analytics::store::{RemoteConfig, StoreError};
use call_analytics::{AppState, Coordinator, RecordStore, RemoteStore, SaveOutcome, router};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const API_KEY: &str = "test-key";

type Rows = Arc<Mutex<HashMap<String, Value>>>;

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|value| value.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    apikey == Some(API_KEY) && bearer == Some("Bearer test-key")
}

async fn select(
    State(rows): State<Rows>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let email = params
        .get("email")
        .and_then(|filter| filter.strip_prefix("eq."))
        .ok_or(StatusCode::BAD_REQUEST)?;
    let rows = rows.lock().await;
    Ok(Json(rows.get(email).cloned().into_iter().collect()))
}

async fn upsert(
    State(rows): State<Rows>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Vec<Value>>,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    let merges = headers
        .get("prefer")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|prefer| prefer.contains("resolution=merge-duplicates"));
    if !merges || params.get("on_conflict").map(String::as_str) != Some("email") {
        return StatusCode::CONFLICT;
    }

    let mut rows = rows.lock().await;
    for row in body {
        let Some(email) = row.get("email").and_then(Value::as_str).map(str::to_string) else {
            return StatusCode::BAD_REQUEST;
        };
        rows.insert(email, row);
    }
    StatusCode::CREATED
}

async fn spawn_fake() -> (String, Rows) {
    let rows: Rows = Arc::default();
    let app = Router::new()
        .route("/rest/v1/chart_records", get(select).post(upsert))
        .fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") })
        .with_state(rows.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), rows)
}

fn remote(base_url: &str, table: &str) -> RemoteStore {
    RemoteStore::new(RemoteConfig {
        base_url: format!("{base_url}/"),
        api_key: API_KEY.to_string(),
        table: table.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn remote_upsert_replaces_by_email() {
    let (base_url, rows) = spawn_fake().await;
    let store = remote(&base_url, "chart_records");

    assert!(store.find_by_key("a@b.com").await.unwrap().is_none());
    assert!(!store.exists("a@b.com").await.unwrap());

    for values in [vec![1.0, 2.0, 3.0], vec![9.0, 9.0]] {
        store
            .upsert(ChartRecord {
                key: "a@b.com".to_string(),
                values,
                updated_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    let found = store.find_by_key("a@b.com").await.unwrap().expect("row");
    assert_eq!(found.values, vec![9.0, 9.0]);
    assert!(store.exists("a@b.com").await.unwrap());
    assert_eq!(rows.lock().await.len(), 1);
    assert!(rows.lock().await["a@b.com"].get("updated_at").is_some());
}

#[tokio::test]
async fn remote_backend_errors_surface_as_status() {
    let (base_url, _rows) = spawn_fake().await;
    let store = remote(&base_url, "missing_table");

    match store.find_by_key("a@b.com").await {
        Err(StoreError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn coordinator_over_remote_store() {
    let (base_url, _rows) = spawn_fake().await;
    let coordinator = Coordinator::new(Arc::new(remote(&base_url, "chart_records")));
    let mut session = Session::new();

    let first = coordinator
        .save(&mut session, "a@b.com", &[1.0, 2.0, 3.0])
        .await
        .unwrap();
    assert!(matches!(first, SaveOutcome::Saved(_)));

    let second = coordinator
        .save(&mut session, "a@b.com", &[9.0, 9.0, 9.0])
        .await
        .unwrap();
    assert_eq!(
        second,
        SaveOutcome::ConfirmationRequired {
            previous_values: vec![1.0, 2.0, 3.0]
        }
    );

    let record = coordinator.load(&mut session, "a@b.com").await.unwrap();
    assert_eq!(record.values, vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        coordinator.load(&mut session, "c@d.com").await,
        Err(LoadError::NotFound(_))
    ));

    let broken = Coordinator::new(Arc::new(remote(&base_url, "missing_table")));
    assert!(matches!(
        broken.save(&mut session, "a@b.com", &[1.0]).await,
        Err(SaveError::StoreUnavailable(_))
    ));
}

#[tokio::test]
async fn unreachable_store_answers_service_unavailable() {
    let (base_url, _rows) = spawn_fake().await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(
        Coordinator::new(Arc::new(remote(&base_url, "missing_table"))),
        SessionCache::new(dir.path().join("session.json")),
        Dashboard::default(),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    let client = reqwest::Client::new();
    for (path, body) in [
        ("/api/save", serde_json::json!({ "email": "a@b.com", "values": [1, 2] })),
        ("/api/save/confirm", serde_json::json!({ "email": "a@b.com", "values": [1, 2] })),
        ("/api/load", serde_json::json!({ "email": "a@b.com" })),
    ] {
        let response = client
            .post(format!("http://{addr}{path}"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE, "{path}");
        assert!(response.text().await.unwrap().contains("unreachable"), "{path}");
    }
    assert!(!dir.path().join("session.json").exists());
}
