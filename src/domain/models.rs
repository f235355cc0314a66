use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pagination::RankRange;

/// One row of the ranking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub rank: String,
    pub display_name: String,
    pub tier: String,
    pub league_points: String,
    pub win_rate_text: String,
    pub most_played_champions: String,
    pub page_index: u32,
}

/// How the raw rows of a page were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Headless browser rendering, handles scripted content
    Primary,
    /// Plain HTTP fetch of the static HTML
    Fallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Primary => write!(f, "primary"),
            Strategy::Fallback => write!(f, "fallback"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" | "browser" | "selenium" => Ok(Strategy::Primary),
            "fallback" | "static" | "requests" => Ok(Strategy::Fallback),
            other => Err(format!("Unknown fetch method: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum PageOutcome {
    Success,
    Failed(String),
}

/// Result of crawling one page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub page_index: u32,
    pub records: Vec<PlayerRecord>,
    pub outcome: PageOutcome,
    pub strategy_used: Strategy,
    pub rank_range: RankRange,
}

impl PageResult {
    pub fn success(page_index: u32, records: Vec<PlayerRecord>, strategy: Strategy) -> Self {
        Self {
            page_index,
            records,
            outcome: PageOutcome::Success,
            strategy_used: strategy,
            rank_range: RankRange::for_page(page_index),
        }
    }

    pub fn failed(page_index: u32, reason: String, strategy: Strategy) -> Self {
        Self {
            page_index,
            records: Vec::new(),
            outcome: PageOutcome::Failed(reason),
            strategy_used: strategy,
            rank_range: RankRange::for_page(page_index),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == PageOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_accepts_legacy_method_names() {
        assert_eq!("selenium".parse::<Strategy>(), Ok(Strategy::Primary));
        assert_eq!("Requests".parse::<Strategy>(), Ok(Strategy::Fallback));
        assert_eq!("static".parse::<Strategy>(), Ok(Strategy::Fallback));
        assert!("carrier-pigeon".parse::<Strategy>().is_err());
    }

    #[test]
    fn page_result_carries_rank_window() {
        let result = PageResult::failed(2, "timeout".into(), Strategy::Fallback);
        assert_eq!(result.rank_range, RankRange { start: 51, end: 100 });
        assert!(!result.is_success());
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = PlayerRecord {
            rank: "1".into(),
            display_name: "Faker".into(),
            tier: "Challenger".into(),
            league_points: "1500 LP".into(),
            win_rate_text: "230W 146L (61.17%)".into(),
            most_played_champions: "Ahri".into(),
            page_index: 1,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["displayName"], "Faker");
        assert_eq!(json["winRateText"], "230W 146L (61.17%)");
        assert_eq!(json["pageIndex"], 1);
    }
}
