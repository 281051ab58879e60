use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::modules::attendance::use_cases::ingest_spreadsheet::ingestor::IngestError;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

pub async fn upload(State(state): State<AppState>, body: Bytes) -> Response {
    match state.ingest_handler.handle(body.to_vec()).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error @ IngestError::Format(_)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, error)
        }
        Err(error @ (IngestError::Unreadable(_) | IngestError::UnsupportedFormat(_))) => {
            error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, error)
        }
        Err(error @ IngestError::Superseded) => error_response(StatusCode::CONFLICT, error),
    }
}

pub async fn clear(State(state): State<AppState>) -> impl IntoResponse {
    state.ingest_handler.clear().await;
    StatusCode::NO_CONTENT
}
