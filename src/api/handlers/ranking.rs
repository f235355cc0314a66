use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;

use super::{error_response, AppState, DEFAULT_REGION};
use crate::api::models::{CrawlStarted, PageResponse};
use crate::domain::Strategy;
use crate::errors::CrawlError;

#[derive(Deserialize)]
pub struct PageParams {
    pub region: Option<String>,
    pub page: Option<u32>,
    pub method: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct MultiCrawlRequest {
    pub region: Option<String>,
    pub start_page: Option<u32>,
    pub end_page: Option<u32>,
}

pub async fn get_ranking(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Response {
    let region = params.region.unwrap_or_else(|| DEFAULT_REGION.to_string());
    let page = params.page.unwrap_or(1);

    let strategy = match params.method.as_deref().map(str::parse::<Strategy>).transpose() {
        Ok(strategy) => strategy.unwrap_or(Strategy::Primary),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    info!("Fetching ranking data - Region: {}, Page: {}, Method: {}", region, page, strategy);

    match state.orchestrator.fetch_page(&region, page, strategy).await {
        Ok(result) => Json(PageResponse::new(&region, result)).into_response(),
        Err(e @ CrawlError::InvalidRange { .. }) => error_response(StatusCode::BAD_REQUEST, e),
        Err(e) => {
            error!("Page {} crawl failed: {}", page, e);
            error_response(StatusCode::BAD_GATEWAY, e)
        }
    }
}

pub async fn start_multi_crawl(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MultiCrawlRequest>,
) -> Response {
    let region = request.region.unwrap_or_else(|| DEFAULT_REGION.to_string());
    let start_page = request.start_page.unwrap_or(1);
    let end_page = request.end_page.unwrap_or(5);

    match state.orchestrator.run(&region, start_page, end_page) {
        Ok(handle) => Json(CrawlStarted {
            message: "Crawling started".to_string(),
            session_id: handle.session_id().to_string(),
            total_pages: handle.total_pages(),
        })
        .into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}
