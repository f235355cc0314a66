use log::{debug, info, warn};
use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{PageResult, PlayerRecord, Strategy};
use crate::errors::CrawlError;

/// Rows with fewer cells are headers or spacers
const MIN_CELLS: usize = 6;

static RANK_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("rank digit pattern is valid"));

/// Turn raw table rows into the records of one page
pub fn extract_page(rows: &[Vec<String>], page_index: u32, strategy: Strategy) -> Result<PageResult, CrawlError> {
    if rows.is_empty() {
        return Err(CrawlError::NoRowsFound { page: page_index });
    }

    let records: Vec<PlayerRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, cells)| parse_row(i, cells, page_index))
        .collect();

    if records.is_empty() {
        warn!("No valid data rows found for page {} ({} raw rows)", page_index, rows.len());
        return Err(CrawlError::NoValidRows { page: page_index });
    }

    check_rank_sequence(&records, page_index);
    info!(
        "Extracted {} records from page {} via {} fetch",
        records.len(),
        page_index,
        strategy
    );

    Ok(PageResult::success(page_index, records, strategy))
}

fn parse_row(index: usize, cells: &[String], page_index: u32) -> Option<PlayerRecord> {
    if cells.len() < MIN_CELLS {
        return None;
    }

    let cell = |i: usize| cells[i].trim().to_string();
    let rank = cell(0);
    let display_name = cell(1);

    if rank.is_empty() || display_name.is_empty() {
        debug!("Skipping placeholder row {} on page {}", index, page_index);
        return None;
    }

    Some(PlayerRecord {
        rank,
        display_name,
        tier: cell(2),
        league_points: cell(3),
        win_rate_text: cell(4),
        most_played_champions: cell(5),
        page_index,
    })
}

// --- Advisory Checks ---

/// Warn when numeric ranks skip or repeat; never rejects records
fn check_rank_sequence(records: &[PlayerRecord], page_index: u32) {
    let ranks: Vec<u32> = records.iter().filter_map(|r| numeric_rank(&r.rank)).collect();

    let gaps = ranks
        .windows(2)
        .filter(|pair| pair[1] != pair[0] + 1)
        .count();

    if gaps > 0 {
        warn!(
            "Page {} ranks are not sequential ({} gaps, first {:?}, last {:?})",
            page_index,
            gaps,
            ranks.first(),
            ranks.last()
        );
    }
}

fn numeric_rank(rank: &str) -> Option<u32> {
    RANK_DIGITS.find(rank)?.as_str().parse().ok()
}
