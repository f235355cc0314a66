use serde::Serialize;

use crate::domain::{PageResult, PlayerRecord, ProgressSnapshot, Strategy};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub success: bool,
    pub data: Vec<PlayerRecord>,
    pub total_records: usize,
    pub region: String,
    pub page: u32,
    pub rank_range: String,
    pub method: Strategy,
}

impl PageResponse {
    pub fn new(region: &str, result: PageResult) -> Self {
        Self {
            success: result.is_success(),
            total_records: result.records.len(),
            region: region.to_string(),
            page: result.page_index,
            rank_range: result.rank_range.to_string(),
            method: result.strategy_used,
            data: result.records,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStarted {
    pub message: String,
    pub session_id: String,
    pub total_pages: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub snapshot: ProgressSnapshot,
    pub all_records: Vec<PlayerRecord>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: f64,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub description: &'static str,
}
