use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::shell::http::error_response;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>) -> Response {
    match state.store.list_pending().await {
        Ok(participations) => (StatusCode::OK, Json(participations)).into_response(),
        Err(error) => {
            tracing::warn!(%error, "could not list pending participations");
            error_response(StatusCode::BAD_GATEWAY, error)
        }
    }
}
