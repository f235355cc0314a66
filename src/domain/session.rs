use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::models::PlayerRecord;
use super::progress::{self, ProgressSnapshot};

/// Live state of one multi-page crawl.
///
/// Created by [`CrawlSession::start`] and closed by [`CrawlSession::finish`];
/// readers only ever see [`ProgressSnapshot`] copies of it.
#[derive(Debug, Clone)]
pub struct CrawlSession {
    session_id: String,
    total_pages: u32,
    completed_pages: u32,
    current_page: u32,
    records: Vec<PlayerRecord>,
    latest_records: Vec<PlayerRecord>,
    elapsed_samples: Vec<f64>,
    error_count: u32,
    is_running: bool,
    started_at: DateTime<Utc>,
}

/// Final tally of a session, emitted once the page loop ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub total_records: usize,
    pub total_pages: u32,
    pub completed_pages: u32,
    pub error_count: u32,
}

impl CrawlSession {
    pub fn start(total_pages: u32, now: DateTime<Utc>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            total_pages,
            completed_pages: 0,
            current_page: 0,
            records: Vec::new(),
            latest_records: Vec::new(),
            elapsed_samples: Vec::new(),
            error_count: 0,
            is_running: true,
            started_at: now,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn begin_page(&mut self, page_index: u32) {
        self.current_page = page_index;
    }

    /// Append a page's records and sample the elapsed time since start
    pub fn record_success(&mut self, records: Vec<PlayerRecord>, now: DateTime<Utc>) {
        self.records.extend(records.iter().cloned());
        self.latest_records = records;
        if self.completed_pages < self.total_pages {
            self.completed_pages += 1;
        }
        self.elapsed_samples.push(self.elapsed_seconds(now));
    }

    pub fn record_failure(&mut self) {
        self.latest_records.clear();
        self.error_count += 1;
    }

    pub fn finish(&mut self) {
        self.is_running = false;
        self.latest_records.clear();
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> ProgressSnapshot {
        let eta_seconds = progress::eta_seconds(
            &self.elapsed_samples,
            self.completed_pages,
            self.total_pages,
        );

        ProgressSnapshot {
            session_id: Some(self.session_id.clone()),
            total_pages: self.total_pages,
            completed_pages: self.completed_pages,
            current_page: self.current_page,
            remaining_pages: self.total_pages - self.completed_pages,
            percent_complete: progress::percent_complete(self.completed_pages, self.total_pages),
            eta_seconds,
            eta_clock: progress::eta_clock(eta_seconds, now),
            elapsed_seconds: self.elapsed_seconds(now),
            is_running: self.is_running,
            error_count: self.error_count,
            total_records: self.records.len(),
            latest_records: self.latest_records.clone(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            total_records: self.records.len(),
            total_pages: self.total_pages,
            completed_pages: self.completed_pages,
            error_count: self.error_count,
        }
    }

    fn elapsed_seconds(&self, now: DateTime<Utc>) -> f64 {
        (now - self.started_at).num_milliseconds().max(0) as f64 / 1000.0
    }
}
