use anyhow::Result;
use colored::Colorize;
use log::info;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::config::settings::AppConfig;
use crate::crawl::{BroadcastSink, CrawlEvent, CrawlOrchestrator, EventSink, RangeFilterScanner};
use crate::domain::{PlayerRecord, Strategy};
use crate::fetchers::{FowFetcher, PageFetcher};

/// Runs crawls from the terminal and prints their progress as it happens
pub struct CrawlService {
    config: AppConfig,
    fetcher: Arc<dyn PageFetcher>,
}

impl CrawlService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let fetcher = Arc::new(FowFetcher::new(&config.crawler)?);
        Ok(Self { config, fetcher })
    }

    pub async fn crawl_range(&self, region: &str, start_page: u32, end_page: u32, json: bool) -> Result<()> {
        info!("=== Starting Crawl ===\n");

        let events = BroadcastSink::new(self.config.server.event_capacity);
        let sink: Arc<dyn EventSink> = Arc::new(events.clone());
        let orchestrator = CrawlOrchestrator::new(Arc::clone(&self.fetcher), sink, self.config.crawler.page_delay());

        let mut receiver = events.subscribe();
        let handle = orchestrator.run(region, start_page, end_page)?;
        let session_id = handle.session_id().to_string();

        loop {
            match receiver.recv().await {
                Ok(event) => {
                    print_event(&event);
                    if event.is_terminal() && event.session_id() == Some(session_id.as_str()) {
                        break;
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }

        let summary = handle.wait().await?;
        if json {
            print_json(&orchestrator.accumulated_records())?;
        }

        info!(
            "=== Crawl Complete: {} records from {}/{} pages ===",
            summary.total_records, summary.completed_pages, summary.total_pages
        );
        Ok(())
    }

    pub async fn fetch_page(&self, region: &str, page: u32, strategy: Strategy) -> Result<()> {
        let events = BroadcastSink::new(1);
        let orchestrator = CrawlOrchestrator::new(Arc::clone(&self.fetcher), Arc::new(events), self.config.crawler.page_delay());

        let result = orchestrator.fetch_page(region, page, strategy).await?;
        info!("Page {} ({}) via {}: {} records", page, result.rank_range, strategy, result.records.len());
        print_json(&result.records)
    }

    pub async fn scan(&self, region: &str, start_page: u32, end_page: u32, threshold: f64) -> Result<()> {
        let scanner = RangeFilterScanner::new(Arc::clone(&self.fetcher), self.config.crawler.scan_delay());
        let report = scanner.scan(region, start_page, end_page, threshold).await?;

        println!(
            "{} {} across {} pages",
            report.total_found.to_string().green().bold(),
            report.search_type,
            report.pages_searched
        );
        for record in &report.records {
            print_record(record);
        }
        Ok(())
    }
}

// --- Output ---

fn print_event(event: &CrawlEvent) {
    match event {
        CrawlEvent::StatusUpdate(status) if status.is_error => println!("{}", status.message.red()),
        CrawlEvent::StatusUpdate(status) => println!("{}", status.message),
        CrawlEvent::ProgressUpdate(progress) => {
            let eta = progress
                .eta_clock
                .as_deref()
                .map(|clock| format!(", ETA {clock}"))
                .unwrap_or_default();
            println!(
                "{}",
                format!(
                    "  {}/{} pages ({:.1}%), {} records{}",
                    progress.completed_pages,
                    progress.total_pages,
                    progress.percent_complete,
                    progress.total_records,
                    eta
                )
                .dimmed()
            );
        }
        CrawlEvent::SessionComplete(summary) => println!(
            "{}",
            format!("Session {} complete, {} errors", summary.session_id, summary.error_count).green()
        ),
        CrawlEvent::SessionError(error) => println!("{}", format!("Session {} failed: {}", error.session_id, error.error).red().bold()),
    }
}

fn print_record(record: &PlayerRecord) {
    println!(
        "{:>6}  {:<24} {:<14} {:>6}  {}",
        record.rank.bold(),
        record.display_name,
        record.tier,
        record.league_points,
        record.win_rate_text.cyan()
    );
}

fn print_json(records: &[PlayerRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}
