use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::models::{EndpointInfo, ErrorResponse, HealthResponse, ServiceInfo};
use crate::config::settings::AppConfig;
use crate::crawl::{BroadcastSink, CrawlOrchestrator, EventSink, RangeFilterScanner};
use crate::fetchers::PageFetcher;

pub mod events;
pub mod progress;
pub mod ranking;
pub mod search;

pub const DEFAULT_REGION: &str = "kr";

pub struct AppState {
    pub orchestrator: CrawlOrchestrator,
    pub scanner: RangeFilterScanner,
    pub events: BroadcastSink,
}

impl AppState {
    pub fn new(config: &AppConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let events = BroadcastSink::new(config.server.event_capacity);
        let sink: Arc<dyn EventSink> = Arc::new(events.clone());

        Self {
            orchestrator: CrawlOrchestrator::new(
                Arc::clone(&fetcher),
                sink,
                config.crawler.page_delay(),
            ),
            scanner: RangeFilterScanner::new(fetcher, config.crawler.scan_delay()),
            events,
        }
    }
}

pub fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub async fn service_info() -> Json<ServiceInfo> {
    let endpoint = |path, description| EndpointInfo { path, description };

    Json(ServiceInfo {
        message: "FOW Crawler API with Progress Tracking",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            endpoint("GET /api/ranking", "Crawl a single ranking page"),
            endpoint("POST /api/ranking/multi", "Start a multi-page crawl in the background"),
            endpoint("GET /api/progress", "Current crawl progress and collected records"),
            endpoint("GET /api/search/winrate", "Scan a page range for players at or above a win rate"),
            endpoint("GET /api/events", "Server-sent crawl events"),
            endpoint("GET /api/health", "Health check"),
        ],
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
    })
}
