use crate::chart::{WorkingSet, chart_points};
use crate::coordinator::SaveOutcome;
use crate::errors::AppError;
use crate::models::{ChartResponse, LoadRequest, SaveRequest, SaveResponse};
use crate::state::{AppState, Dashboard};
use crate::ui::render_index;
use axum::{Json, extract::State, response::Html};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dashboard = state.dashboard.lock().await;
    Html(render_index(&chart_points(&dashboard.values), dashboard.session.active_key()))
}

pub async fn get_chart(State(state): State<AppState>) -> Json<ChartResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(to_response(&dashboard))
}

pub async fn save(
    State(state): State<AppState>,
    Json(payload): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let mut working = WorkingSet::seed(&dashboard.values);
    working.replace(payload.values);

    let outcome = state
        .coordinator
        .save(&mut dashboard.session, &payload.email, working.values())
        .await?;

    let response = match outcome {
        SaveOutcome::Saved(saved) => {
            dashboard.values = working.commit();
            remember(&state, &dashboard).await;
            SaveResponse::Saved {
                key: saved.key,
                updated_at: saved.updated_at,
                points: chart_points(&dashboard.values),
            }
        }
        SaveOutcome::ConfirmationRequired { previous_values } => SaveResponse::ConfirmationRequired {
            key: payload.email.trim().to_string(),
            previous_values,
        },
    };
    Ok(Json(response))
}

pub async fn confirm_save(
    State(state): State<AppState>,
    Json(payload): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let mut working = WorkingSet::seed(&dashboard.values);
    working.replace(payload.values);

    let saved = state
        .coordinator
        .force_save(&mut dashboard.session, &payload.email, working.values())
        .await?;

    dashboard.values = working.commit();
    remember(&state, &dashboard).await;
    Ok(Json(SaveResponse::Saved {
        key: saved.key,
        updated_at: saved.updated_at,
        points: chart_points(&dashboard.values),
    }))
}

pub async fn load(
    State(state): State<AppState>,
    Json(payload): Json<LoadRequest>,
) -> Result<Json<ChartResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let record = state
        .coordinator
        .load(&mut dashboard.session, &payload.email)
        .await?;

    dashboard.values = record.values;
    remember(&state, &dashboard).await;
    Ok(Json(to_response(&dashboard)))
}

async fn remember(state: &AppState, dashboard: &Dashboard) {
    if let Some(pointer) = dashboard.session.active() {
        state.cache.remember(pointer).await;
    }
}

fn to_response(dashboard: &Dashboard) -> ChartResponse {
    let active = dashboard.session.active();
    ChartResponse {
        points: chart_points(&dashboard.values),
        values: dashboard.values.clone(),
        active_key: active.map(|pointer| pointer.key.clone()),
        updated_at: active.map(|pointer| pointer.updated_at),
    }
}
