use std::fmt::Display;

use thiserror::Error;

/// Failures of a single page crawl or of a crawl request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    /// Transport or rendering failure while fetching the page
    #[error("{reason}")]
    Fetch { reason: String },

    /// The page was fetched but contained no table rows
    #[error("No table rows found on page {page}")]
    NoRowsFound { page: u32 },

    /// Rows were present but none of them was a valid ranking row
    #[error("No valid data rows found on page {page}")]
    NoValidRows { page: u32 },

    #[error("Invalid page range: {start}-{end}")]
    InvalidRange { start: u32, end: u32 },
}

impl CrawlError {
    /// Wrap any error as a fetch failure, keeping its full context chain
    pub fn fetch(err: impl Display) -> Self {
        Self::Fetch {
            reason: format!("{err:#}"),
        }
    }

    /// True when the site answered but had nothing to extract
    pub fn is_empty_page(&self) -> bool {
        matches!(self, Self::NoRowsFound { .. } | Self::NoValidRows { .. })
    }
}

/// Win-rate text that does not contain a usable percentage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unparseable win rate: {text:?}")]
pub struct ParseFailure {
    pub text: String,
}

impl ParseFailure {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}
