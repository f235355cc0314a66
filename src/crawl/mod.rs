//! Crawl orchestration: page sequencing, fallback, extraction, progress and filtering.

pub mod events;
pub mod extractor;
pub mod orchestrator;
pub mod page;
pub mod scanner;
pub mod winrate;

pub use events::{BroadcastSink, CrawlEvent, EventSink, SessionError, StatusUpdate};
pub use extractor::extract_page;
pub use orchestrator::{CrawlHandle, CrawlOrchestrator};
pub use page::{PageFailure, crawl_page, crawl_page_with};
pub use scanner::{RangeFilterScanner, ScanReport};
pub use winrate::{meets_threshold, parse_winrate};
