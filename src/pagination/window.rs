use std::fmt;

use serde::Serialize;

/// Number of ranks shown on one ranking page
pub const PAGE_SIZE: u32 = 50;

/// Highest page whose rank window still fits in a `u32`
pub const MAX_PAGE: u32 = u32::MAX / PAGE_SIZE;

/// Inclusive window of ranks covered by one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankRange {
    pub start: u32,
    pub end: u32,
}

impl RankRange {
    /// Rank window for a 1-based page index, clamped at `u32::MAX` past [`MAX_PAGE`]
    pub fn for_page(page_index: u32) -> Self {
        let start = page_index
            .saturating_sub(1)
            .saturating_mul(PAGE_SIZE)
            .saturating_add(1);
        Self {
            start,
            end: start.saturating_add(PAGE_SIZE - 1),
        }
    }
}

impl fmt::Display for RankRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_covers_top_fifty() {
        assert_eq!(RankRange::for_page(1), RankRange { start: 1, end: 50 });
    }

    #[test]
    fn third_page_window() {
        let range = RankRange::for_page(3);
        assert_eq!((range.start, range.end), (101, 150));
        assert_eq!(range.to_string(), "101-150");
    }

    #[test]
    fn window_always_spans_page_size() {
        for page in 1..=200 {
            let range = RankRange::for_page(page);
            assert_eq!(range.end - range.start, PAGE_SIZE - 1);
            assert_eq!(range.start, (page - 1) * PAGE_SIZE + 1);
        }
    }

    #[test]
    fn last_representable_page() {
        let range = RankRange::for_page(MAX_PAGE);
        assert_eq!(range.end, MAX_PAGE * PAGE_SIZE);
        assert_eq!(range.end - range.start, PAGE_SIZE - 1);
    }

    #[test]
    fn huge_page_index_does_not_overflow() {
        let range = RankRange::for_page(100_000_000);
        assert_eq!(range.end, u32::MAX);
    }
}
