//! Scripted page fetcher shared by the integration tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use fow_ranking_crawler::domain::Strategy;
use fow_ranking_crawler::errors::CrawlError;
use fow_ranking_crawler::fetchers::{PageFetcher, RawRows};

/// What the fetcher does for one (page, strategy) pair
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Script {
    /// `n` valid ranking rows, alternating 60% and 40% win rates
    Rows(usize),
    /// `n` valid ranking rows whose win-rate cell is not a percentage
    Unrated(usize),
    /// Only header-like rows, so nothing valid to extract
    HeaderOnly,
    /// The page loaded but held no table at all
    Empty,
    Fail(&'static str),
    Panic,
}

/// Fetcher that replays a fixed script and records every call.
///
/// Unscripted pairs fail with a fetch error.
#[derive(Default)]
pub struct ScriptedFetcher {
    scripts: HashMap<(u32, Strategy), Script>,
    calls: Mutex<Vec<(u32, Strategy)>>,
}

#[allow(dead_code)]
impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, page: u32, strategy: Strategy, script: Script) -> Self {
        self.scripts.insert((page, strategy), script);
        self
    }

    pub fn calls(&self) -> Vec<(u32, Strategy)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn pages_called(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.calls().into_iter().map(|(page, _)| page).collect();
        pages.dedup();
        pages
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, _region: &str, page: u32, strategy: Strategy) -> Result<RawRows, CrawlError> {
        self.calls.lock().unwrap().push((page, strategy));

        match self.scripts.get(&(page, strategy)) {
            Some(Script::Rows(count)) => Ok(ranking_rows(page, *count)),
            Some(Script::Unrated(count)) => Ok(unrated_rows(page, *count)),
            Some(Script::HeaderOnly) => Ok(vec![vec!["Rank".to_string(), "Summoner".to_string()]]),
            Some(Script::Empty) => Ok(Vec::new()),
            Some(Script::Fail(reason)) => Err(CrawlError::Fetch {
                reason: reason.to_string(),
            }),
            Some(Script::Panic) => panic!("scripted panic on page {page}"),
            None => Err(CrawlError::Fetch {
                reason: format!("no script for page {page}"),
            }),
        }
    }
}

/// Rows shaped like the live ranking table, ranks continuing across pages
pub fn ranking_rows(page: u32, count: usize) -> RawRows {
    rows_with(page, count, |i| if i % 2 == 0 { "30승 20패 (60.00%)" } else { "20승 30패 (40.00%)" })
}

pub fn unrated_rows(page: u32, count: usize) -> RawRows {
    rows_with(page, count, |i| if i % 2 == 0 { "-" } else { "n/a" })
}

fn rows_with(page: u32, count: usize, win_rate: impl Fn(usize) -> &'static str) -> RawRows {
    let first_rank = (page as usize - 1) * 50 + 1;

    (0..count)
        .map(|i| {
            let rank = first_rank + i;
            vec![
                rank.to_string(),
                format!("Player{rank}"),
                "Challenger".to_string(),
                "1,024 LP".to_string(),
                win_rate(i).to_string(),
                "Ahri Lux Zed".to_string(),
            ]
        })
        .collect()
}
