use log::{info, warn};
use thiserror::Error;

use super::extractor::extract_page;
use crate::domain::{PageResult, Strategy};
use crate::errors::CrawlError;
use crate::fetchers::PageFetcher;

/// Both strategies failed for a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{primary} | {fallback}")]
pub struct PageFailure {
    pub page: u32,
    pub primary: CrawlError,
    pub fallback: CrawlError,
}

impl PageFailure {
    /// The site answered the fallback request but the page held no data
    pub fn reached_end(&self) -> bool {
        self.fallback.is_empty_page()
    }

    pub fn into_page_result(self) -> PageResult {
        PageResult::failed(self.page, self.to_string(), Strategy::Fallback)
    }
}

/// Crawl one page, retrying with the fallback strategy when the primary
/// fetch fails or yields no records
pub async fn crawl_page(fetcher: &dyn PageFetcher, region: &str, page: u32) -> Result<PageResult, PageFailure> {
    crawl_page_with(fetcher, region, page, |_| {}).await
}

/// [`crawl_page`] that calls `on_fallback` with the primary error before retrying
pub async fn crawl_page_with(
    fetcher: &dyn PageFetcher,
    region: &str,
    page: u32,
    on_fallback: impl FnOnce(&CrawlError),
) -> Result<PageResult, PageFailure> {
    let primary = match attempt(fetcher, region, page, Strategy::Primary).await {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };
    warn!("Primary fetch failed for page {}: {}, trying fallback...", page, primary);
    on_fallback(&primary);

    match attempt(fetcher, region, page, Strategy::Fallback).await {
        Ok(result) => {
            info!("Page {} recovered via fallback", page);
            Ok(result)
        }
        Err(fallback) => Err(PageFailure {
            page,
            primary,
            fallback,
        }),
    }
}

/// Fetch and extract a page with a single strategy
pub async fn attempt(
    fetcher: &dyn PageFetcher,
    region: &str,
    page: u32,
    strategy: Strategy,
) -> Result<PageResult, CrawlError> {
    let rows = fetcher.fetch(region, page, strategy).await?;
    extract_page(&rows, page, strategy)
}
