// Live notification feed for the operator's screen (server-sent events).
//
// Every connection subscribes to the broadcast sink. A listener that falls behind loses the
// oldest events and keeps receiving.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = BroadcastStream::new(state.sink.inner().subscribe()).filter_map(|received| {
        match received {
            Ok(notification) => match Event::default().json_data(&notification) {
                Ok(event) => Some(Ok(event)),
                Err(error) => {
                    tracing::warn!(%error, "notification could not be encoded");
                    None
                }
            },
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "notification listener lagged behind");
                None
            }
        }
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}
