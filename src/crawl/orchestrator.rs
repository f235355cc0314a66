use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};

use super::events::{CrawlEvent, EventSink, SessionError, StatusUpdate};
use super::page::{attempt, crawl_page_with};
use crate::domain::{CrawlSession, PageOutcome, PageResult, PlayerRecord, ProgressSnapshot, SessionSummary, Strategy};
use crate::errors::CrawlError;
use crate::fetchers::PageFetcher;
use crate::pagination::PageRange;
use crate::rate_limiter::PageDelay;

type SharedSession = Arc<Mutex<CrawlSession>>;

/// Drives multi-page crawl sessions in the background.
///
/// Only the most recently started session is tracked. Starting a new one
/// replaces it; the superseded session still runs its pages to the end and
/// keeps publishing events under its own session id, but no longer shows up
/// in [`CrawlOrchestrator::progress`].
#[derive(Clone)]
pub struct CrawlOrchestrator {
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn EventSink>,
    page_delay: Duration,
    current: Arc<Mutex<Option<SharedSession>>>,
}

/// Acknowledgement of a started session plus its completion signal
pub struct CrawlHandle {
    session_id: String,
    total_pages: u32,
    completion: JoinHandle<SessionSummary>,
}

impl CrawlHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Wait until the session is finalized, whether it completed or faulted
    pub async fn wait(self) -> Result<SessionSummary> {
        self.completion.await.context("Crawl supervisor task failed")
    }
}

impl CrawlOrchestrator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, sink: Arc<dyn EventSink>, page_delay: Duration) -> Self {
        Self {
            fetcher,
            sink,
            page_delay,
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Start a background crawl of `start_page..=end_page`.
    ///
    /// Returns as soon as the session exists; page failures are reported only
    /// through events and the final summary. Must be called inside a tokio runtime.
    pub fn run(&self, region: &str, start_page: u32, end_page: u32) -> Result<CrawlHandle, CrawlError> {
        let range = PageRange::new(start_page, end_page)?;
        let session = CrawlSession::start(range.total_pages(), Utc::now());
        let session_id = session.session_id().to_string();
        let initial = session.snapshot(Utc::now());

        let shared = Arc::new(Mutex::new(session));
        *lock(&self.current) = Some(Arc::clone(&shared));

        info!(
            "Starting crawl session {}: region={}, pages={}-{}",
            session_id, region, start_page, end_page
        );
        self.sink.emit(CrawlEvent::ProgressUpdate(initial));

        let worker = SessionWorker {
            fetcher: Arc::clone(&self.fetcher),
            sink: Arc::clone(&self.sink),
            session: shared,
            session_id: session_id.clone(),
            region: region.to_string(),
            range,
            page_delay: self.page_delay,
        };

        Ok(CrawlHandle {
            session_id,
            total_pages: range.total_pages(),
            completion: supervise(worker),
        })
    }

    /// Snapshot of the tracked session, `None` before the first session
    pub fn progress(&self) -> Option<ProgressSnapshot> {
        let session = lock(&self.current).clone()?;
        let snapshot = lock(&session).snapshot(Utc::now());
        Some(snapshot)
    }

    /// Copy of every record the tracked session has collected so far
    pub fn accumulated_records(&self) -> Vec<PlayerRecord> {
        let tracked = lock(&self.current).clone();
        match tracked {
            Some(session) => lock(&session).records().to_vec(),
            None => Vec::new(),
        }
    }

    /// One-off crawl of a single page with an explicit strategy and no fallback
    pub async fn fetch_page(&self, region: &str, page: u32, strategy: Strategy) -> Result<PageResult, CrawlError> {
        PageRange::new(page, page)?;
        attempt(self.fetcher.as_ref(), region, page, strategy).await
    }
}

/// Run the page loop in its own task and finalize the session even if it dies
fn supervise(worker: SessionWorker) -> JoinHandle<SessionSummary> {
    let supervisor = worker.clone();
    let task = tokio::spawn(worker.run());

    tokio::spawn(async move {
        match task.await {
            Ok(summary) => summary,
            Err(e) => {
                let message = describe_fault(e);
                error!("Crawl session {} died: {}", supervisor.session_id, message);
                supervisor.abort(message)
            }
        }
    })
}

fn describe_fault(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
struct SessionWorker {
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn EventSink>,
    session: SharedSession,
    session_id: String,
    region: String,
    range: PageRange,
    page_delay: Duration,
}

impl SessionWorker {
    async fn run(self) -> SessionSummary {
        let mut delay = PageDelay::new(self.page_delay);

        for page in self.range.pages() {
            delay.before_page().await;
            self.crawl_one(page).await;
        }

        self.complete()
    }

    async fn crawl_one(&self, page: u32) {
        let snapshot = self.update(|s| s.begin_page(page));
        self.emit_progress(snapshot);
        self.emit_status(page, format!("Crawling page {page}..."), false, None);
        info!("Starting crawl for page {}", page);

        let notify_fallback = |primary: &CrawlError| {
            self.emit_status(
                page,
                format!("Page {page} primary fetch failed ({primary}), trying fallback..."),
                false,
                None,
            );
        };

        let result = match crawl_page_with(self.fetcher.as_ref(), &self.region, page, notify_fallback).await {
            Ok(result) => result,
            Err(failure) => {
                error!("Page {} failed completely: {}", page, failure);
                failure.into_page_result()
            }
        };

        match result.outcome {
            PageOutcome::Success => {
                let count = result.records.len();
                let strategy = result.strategy_used;
                let snapshot = self.update(|s| s.record_success(result.records, Utc::now()));

                let via = match strategy {
                    Strategy::Primary => "",
                    Strategy::Fallback => " via fallback",
                };
                self.emit_status(
                    page,
                    format!("✅ Page {page} completed{via}: {count} records"),
                    false,
                    Some(strategy),
                );
                self.emit_progress(snapshot);
            }
            PageOutcome::Failed(reason) => {
                let snapshot = self.update(|s| s.record_failure());

                self.emit_status(page, format!("❌ Page {page} failed: {reason}"), true, None);
                self.emit_progress(snapshot);
            }
        }
    }

    fn complete(&self) -> SessionSummary {
        let summary = self.finalize();
        info!(
            "Crawl session {} complete: {} records, {}/{} pages, {} errors",
            summary.session_id,
            summary.total_records,
            summary.completed_pages,
            summary.total_pages,
            summary.error_count
        );
        self.sink.emit(CrawlEvent::SessionComplete(summary.clone()));
        summary
    }

    fn abort(&self, error: String) -> SessionSummary {
        let summary = self.finalize();
        self.sink.emit(CrawlEvent::SessionError(SessionError {
            session_id: self.session_id.clone(),
            error,
        }));
        summary
    }

    fn finalize(&self) -> SessionSummary {
        let (snapshot, summary) = {
            let mut session = lock(&self.session);
            session.finish();
            (session.snapshot(Utc::now()), session.summary())
        };
        self.emit_progress(snapshot);
        summary
    }

    fn update(&self, change: impl FnOnce(&mut CrawlSession)) -> ProgressSnapshot {
        let mut session = lock(&self.session);
        change(&mut session);
        session.snapshot(Utc::now())
    }

    fn emit_progress(&self, snapshot: ProgressSnapshot) {
        self.sink.emit(CrawlEvent::ProgressUpdate(snapshot));
    }

    fn emit_status(&self, page: u32, message: String, is_error: bool, strategy: Option<Strategy>) {
        self.sink.emit(CrawlEvent::StatusUpdate(StatusUpdate {
            session_id: self.session_id.clone(),
            message,
            page,
            is_error,
            strategy,
        }));
    }
}
