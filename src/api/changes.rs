//! Change stream (server-sent events)
//!
//! Each event names the list that changed (`equipment` or `records`);
//! clients re-fetch it.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

/// Subscribe to change notifications
#[utoipa::path(
    get,
    path = "/changes",
    tag = "dashboard",
    responses(
        (status = 200, description = "text/event-stream of `equipment` / `records` events")
    )
)]
pub async fn stream_changes(
    State(state): State<crate::AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Lagged receivers skip what they missed; the next event still triggers a re-fetch
    let stream = BroadcastStream::new(state.services.changes.subscribe())
        .filter_map(|event| event.ok())
        .map(|event| Ok(Event::default().event(event.as_str()).data(event.as_str())));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
