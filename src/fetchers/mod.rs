//! Page fetch strategies for the ranking table.
//!
//! Both strategies end in the same place: raw cell text per table row, with
//! no knowledge of how the rows are validated or filtered afterwards.

mod browser;
mod static_html;
mod table;

pub use browser::BrowserFetcher;
pub use static_html::StaticFetcher;
pub use table::TableParser;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::settings::CrawlerSettings;
use crate::domain::Strategy;
use crate::errors::CrawlError;

/// Raw cell text of each table row, in document order
pub type RawRows = Vec<Vec<String>>;

/// Source of raw ranking rows for one page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, region: &str, page: u32, strategy: Strategy) -> Result<RawRows, CrawlError>;
}

/// Fetcher for fow.lol that renders with a headless browser or falls back to plain HTTP
pub struct FowFetcher {
    browser: BrowserFetcher,
    static_html: StaticFetcher,
}

impl FowFetcher {
    pub fn new(settings: &CrawlerSettings) -> Result<Self> {
        Ok(Self {
            browser: BrowserFetcher::new(settings)?,
            static_html: StaticFetcher::new(settings)?,
        })
    }
}

#[async_trait]
impl PageFetcher for FowFetcher {
    async fn fetch(&self, region: &str, page: u32, strategy: Strategy) -> Result<RawRows, CrawlError> {
        let rows = match strategy {
            Strategy::Primary => self.browser.fetch_rows(region, page).await,
            Strategy::Fallback => self.static_html.fetch_rows(region, page).await,
        };
        rows.map_err(CrawlError::fetch)
    }
}
