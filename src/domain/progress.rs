use chrono::{DateTime, Duration, Local, Utc};
use serde::Serialize;

use super::models::PlayerRecord;

/// Point-in-time view of a crawl session, never mutated after creation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub session_id: Option<String>,
    pub total_pages: u32,
    pub completed_pages: u32,
    pub current_page: u32,
    pub remaining_pages: u32,
    pub percent_complete: f64,
    pub eta_seconds: Option<f64>,
    pub eta_clock: Option<String>,
    pub elapsed_seconds: f64,
    pub is_running: bool,
    pub error_count: u32,
    pub total_records: usize,
    pub latest_records: Vec<PlayerRecord>,
}

impl ProgressSnapshot {
    /// Snapshot reported when no session has been started yet
    pub fn idle() -> Self {
        Self {
            session_id: None,
            total_pages: 0,
            completed_pages: 0,
            current_page: 0,
            remaining_pages: 0,
            percent_complete: 0.0,
            eta_seconds: None,
            eta_clock: None,
            elapsed_seconds: 0.0,
            is_running: false,
            error_count: 0,
            total_records: 0,
            latest_records: Vec::new(),
        }
    }
}

pub fn percent_complete(completed_pages: u32, total_pages: u32) -> f64 {
    if total_pages == 0 {
        return 0.0;
    }
    completed_pages as f64 / total_pages as f64 * 100.0
}

/// Remaining seconds estimated from the per-page elapsed samples.
///
/// The mean of the samples is divided by `completed_pages` a second time.
/// The estimate therefore shrinks as pages complete regardless of speed;
/// existing consumers are calibrated against this shape.
pub fn eta_seconds(elapsed_samples: &[f64], completed_pages: u32, total_pages: u32) -> Option<f64> {
    if elapsed_samples.is_empty() || completed_pages == 0 {
        return None;
    }

    let mean = elapsed_samples.iter().sum::<f64>() / elapsed_samples.len() as f64;
    let avg_seconds_per_page = mean / completed_pages as f64;
    let remaining = total_pages.saturating_sub(completed_pages);
    Some(remaining as f64 * avg_seconds_per_page)
}

/// Local wall-clock time (`HH:MM:SS`) at which an ETA lands
pub fn eta_clock(eta_seconds: Option<f64>, now: DateTime<Utc>) -> Option<String> {
    let seconds = eta_seconds.filter(|s| *s > 0.0)?;
    let landing = now + Duration::milliseconds((seconds * 1000.0) as i64);
    Some(landing.with_timezone(&Local).format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_completed_pages() {
        assert_eq!(percent_complete(2, 10), 20.0);
        assert_eq!(percent_complete(10, 10), 100.0);
    }

    #[test]
    fn percent_is_zero_without_pages() {
        assert_eq!(percent_complete(0, 0), 0.0);
    }

    #[test]
    fn eta_undefined_before_first_page() {
        assert_eq!(eta_seconds(&[], 0, 10), None);
    }

    #[test]
    fn eta_divides_mean_by_completed_pages() {
        // mean 16s, divided by 2 completed pages, times 8 remaining
        let eta = eta_seconds(&[10.0, 22.0], 2, 10).unwrap();
        assert!((eta - 64.0).abs() < 1e-9);
    }

    #[test]
    fn eta_is_zero_when_done() {
        assert_eq!(eta_seconds(&[5.0, 9.0], 2, 2), Some(0.0));
    }

    #[test]
    fn eta_clock_only_for_positive_eta() {
        let now = Utc::now();
        assert_eq!(eta_clock(None, now), None);
        assert_eq!(eta_clock(Some(0.0), now), None);

        let clock = eta_clock(Some(90.0), now).unwrap();
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.matches(':').count(), 2);
    }
}
