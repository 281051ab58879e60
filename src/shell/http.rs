use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;

use crate::modules::attendance::use_cases::auto_process_pending::inbound::http as auto_process_http;
use crate::modules::attendance::use_cases::ingest_spreadsheet::inbound::http as ingest_http;
use crate::modules::attendance::use_cases::list_pending_participations::inbound::http as list_pending_http;
use crate::modules::attendance::use_cases::stream_notifications::inbound::http as events_http;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/attendance/upload", post(ingest_http::upload))
        .route("/attendance", delete(ingest_http::clear))
        .route("/attendance/auto-process", post(auto_process_http::handle))
        .route("/participations/pending", get(list_pending_http::handle))
        .route("/attendance/events", get(events_http::handle))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
