use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::modules::attendance::use_cases::auto_process_pending::handler::ApplicationError;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>) -> Response {
    match state.auto_process_handler.handle().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error @ ApplicationError::NoAttendanceFile) => {
            error_response(StatusCode::PRECONDITION_FAILED, error)
        }
        Err(error @ ApplicationError::AlreadyProcessed) => {
            error_response(StatusCode::CONFLICT, error)
        }
        Err(error @ ApplicationError::Store(_)) => error_response(StatusCode::BAD_GATEWAY, error),
        Err(error @ ApplicationError::Aborted(_)) => {
            tracing::error!(%error, "auto-processing batch aborted");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error)
        }
    }
}
