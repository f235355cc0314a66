use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::{ProgressSnapshot, SessionSummary, Strategy};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub session_id: String,
    pub message: String,
    pub page: u32,
    pub is_error: bool,
    /// Strategy that produced the page, set once a page has succeeded
    pub strategy: Option<Strategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionError {
    pub session_id: String,
    pub error: String,
}

/// Everything a crawl session publishes to its subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum CrawlEvent {
    StatusUpdate(StatusUpdate),
    ProgressUpdate(ProgressSnapshot),
    SessionComplete(SessionSummary),
    SessionError(SessionError),
}

impl CrawlEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            CrawlEvent::StatusUpdate(_) => "status_update",
            CrawlEvent::ProgressUpdate(_) => "progress_update",
            CrawlEvent::SessionComplete(_) => "session_complete",
            CrawlEvent::SessionError(_) => "session_error",
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            CrawlEvent::StatusUpdate(status) => Some(&status.session_id),
            CrawlEvent::ProgressUpdate(snapshot) => snapshot.session_id.as_deref(),
            CrawlEvent::SessionComplete(summary) => Some(&summary.session_id),
            CrawlEvent::SessionError(error) => Some(&error.session_id),
        }
    }

    /// True for the last event a session ever publishes
    pub fn is_terminal(&self) -> bool {
        matches!(self, CrawlEvent::SessionComplete(_) | CrawlEvent::SessionError(_))
    }
}

/// Fire-and-forget publisher of crawl events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: CrawlEvent);
}

/// Broadcasts every event to all current subscribers.
///
/// Delivery is best effort: events sent with no subscribers are dropped and
/// lagging subscribers lose the oldest events.
#[derive(Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<CrawlEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CrawlEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: CrawlEvent) {
        // Err only means nobody is listening right now
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(message: &str) -> CrawlEvent {
        CrawlEvent::StatusUpdate(StatusUpdate {
            session_id: "s1".into(),
            message: message.into(),
            page: 1,
            is_error: false,
            strategy: None,
        })
    }

    #[test]
    fn emit_without_subscribers_is_dropped() {
        let sink = BroadcastSink::new(4);
        sink.emit(status("nobody listens"));

        let mut late = sink.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn every_subscriber_receives_each_event() {
        let sink = BroadcastSink::new(4);
        let mut first = sink.subscribe();
        let mut second = sink.subscribe();

        sink.emit(status("hello"));

        assert_eq!(first.try_recv().unwrap(), status("hello"));
        assert_eq!(second.try_recv().unwrap(), status("hello"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(status("Crawling page 1...")).unwrap();

        assert_eq!(json["event"], "status_update");
        assert_eq!(json["payload"]["message"], "Crawling page 1...");
        assert_eq!(json["payload"]["isError"], false);
    }

    #[test]
    fn terminal_events() {
        let complete = CrawlEvent::SessionComplete(SessionSummary {
            session_id: "s1".into(),
            total_records: 0,
            total_pages: 1,
            completed_pages: 0,
            error_count: 1,
        });

        assert!(complete.is_terminal());
        assert_eq!(complete.kind(), "session_complete");
        assert_eq!(complete.session_id(), Some("s1"));
        assert!(!status("x").is_terminal());
    }
}
