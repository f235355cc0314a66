use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use log::warn;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use super::AppState;
use crate::crawl::CrawlEvent;

/// Push every crawl event to the client as it is published
pub async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|message| match message {
        Ok(event) => to_sse(&event).map(Ok),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!("Event subscriber lagged, {} events dropped", skipped);
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_sse(event: &CrawlEvent) -> Option<Event> {
    let sse = Event::default().event(event.kind());
    let encoded = match event {
        CrawlEvent::StatusUpdate(status) => sse.json_data(status),
        CrawlEvent::ProgressUpdate(snapshot) => sse.json_data(snapshot),
        CrawlEvent::SessionComplete(summary) => sse.json_data(summary),
        CrawlEvent::SessionError(error) => sse.json_data(error),
    };

    match encoded {
        Ok(sse) => Some(sse),
        Err(e) => {
            warn!("Failed to encode {} event: {}", event.kind(), e);
            None
        }
    }
}
