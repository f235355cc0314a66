use std::ops::RangeInclusive;

use super::window::MAX_PAGE;
use crate::errors::CrawlError;

/// Validated, 1-based inclusive range of ranking pages, capped at [`MAX_PAGE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Result<Self, CrawlError> {
        if start == 0 || end < start || end > MAX_PAGE {
            return Err(CrawlError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn total_pages(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_pages_inclusively() {
        let range = PageRange::new(3, 7).unwrap();
        assert_eq!(range.total_pages(), 5);
        assert_eq!(range.pages().collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn single_page_range() {
        assert_eq!(PageRange::new(4, 4).unwrap().total_pages(), 1);
    }

    #[test]
    fn rejects_reversed_range() {
        assert_eq!(
            PageRange::new(5, 2),
            Err(CrawlError::InvalidRange { start: 5, end: 2 })
        );
    }

    #[test]
    fn rejects_page_zero() {
        assert!(PageRange::new(0, 3).is_err());
    }

    #[test]
    fn rejects_pages_past_rank_limit() {
        assert!(PageRange::new(MAX_PAGE, MAX_PAGE).is_ok());
        assert_eq!(
            PageRange::new(1, 100_000_000),
            Err(CrawlError::InvalidRange { start: 1, end: 100_000_000 })
        );
    }
}
