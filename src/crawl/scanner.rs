use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::page::crawl_page;
use super::winrate::meets_threshold;
use crate::domain::PlayerRecord;
use crate::errors::CrawlError;
use crate::fetchers::PageFetcher;
use crate::pagination::PageRange;
use crate::rate_limiter::PageDelay;

/// Matches of a threshold scan plus what was actually searched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub records: Vec<PlayerRecord>,
    pub total_found: usize,
    pub search_type: String,
    pub threshold: f64,
    pub threshold_label: String,
    pub region: String,
    pub start_page: u32,
    pub end_page: u32,
    pub pages_searched: u32,
}

/// Walks a page range and keeps the records whose win rate reaches a threshold
#[derive(Clone)]
pub struct RangeFilterScanner {
    fetcher: Arc<dyn PageFetcher>,
    page_delay: Duration,
}

impl RangeFilterScanner {
    pub fn new(fetcher: Arc<dyn PageFetcher>, page_delay: Duration) -> Self {
        Self { fetcher, page_delay }
    }

    /// Scan `start_page..=end_page`; a threshold of zero or less keeps every record.
    ///
    /// Stops early at the first page the site serves without data. Pages that
    /// fail in transport are skipped.
    pub async fn scan(
        &self,
        region: &str,
        start_page: u32,
        end_page: u32,
        threshold: f64,
    ) -> Result<ScanReport, CrawlError> {
        let range = PageRange::new(start_page, end_page)?;
        let filtering = threshold > 0.0;
        let mut delay = PageDelay::new(self.page_delay);
        let mut matches = Vec::new();

        for page in range.pages() {
            delay.before_page().await;
            info!("Searching page {} for region {}...", page, region);

            match crawl_page(self.fetcher.as_ref(), region, page).await {
                Ok(result) => {
                    let found = result.records.len();
                    let kept: Vec<PlayerRecord> = result
                        .records
                        .into_iter()
                        .filter(|record| !filtering || meets_threshold(&record.win_rate_text, threshold))
                        .collect();

                    info!("Page {}: kept {} of {} players", page, kept.len(), found);
                    matches.extend(kept);
                }
                Err(failure) if failure.reached_end() => {
                    info!("No data found on page {}, stopping scan", page);
                    break;
                }
                Err(failure) => {
                    warn!("Page {} failed, continuing: {}", page, failure);
                }
            }
        }

        Ok(ScanReport {
            total_found: matches.len(),
            records: matches,
            search_type: search_type(filtering, threshold),
            threshold: if filtering { threshold } else { 0.0 },
            threshold_label: threshold_label(filtering, threshold),
            region: region.to_string(),
            start_page,
            end_page,
            pages_searched: delay.pages_started() as u32,
        })
    }
}

fn search_type(filtering: bool, threshold: f64) -> String {
    if filtering {
        format!("players with winrate >= {threshold}%")
    } else {
        "all players".to_string()
    }
}

fn threshold_label(filtering: bool, threshold: f64) -> String {
    if filtering {
        format!("{threshold}%")
    } else {
        "0% (all players)".to_string()
    }
}
