use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/save", post(handlers::save))
        .route("/api/save/confirm", post(handlers::confirm_save))
        .route("/api/load", post(handlers::load))
        .with_state(state)
}
