use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{error_response, AppState, DEFAULT_REGION};

#[derive(Deserialize)]
pub struct SearchParams {
    pub region: Option<String>,
    pub winrate: Option<String>,
    pub start_page: Option<u32>,
    pub end_page: Option<u32>,
    /// Older clients send only a page count, meaning pages `1..=max_pages`
    pub max_pages: Option<u32>,
}

pub async fn search_by_winrate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let region = params.region.unwrap_or_else(|| DEFAULT_REGION.to_string());

    let threshold = match parse_threshold(params.winrate.as_deref().unwrap_or("0")) {
        Some(threshold) => threshold,
        None => return error_response(StatusCode::BAD_REQUEST, "Invalid winning percentage format"),
    };

    let (start_page, end_page) = match params.max_pages {
        Some(max_pages) => (1, max_pages),
        None => (params.start_page.unwrap_or(1), params.end_page.unwrap_or(5)),
    };

    match state.scanner.scan(&region, start_page, end_page, threshold).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

/// Threshold from user text: a trailing `%` is allowed and blank means 0
fn parse_threshold(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('%', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_percent_sign() {
        assert_eq!(parse_threshold("55%"), Some(55.0));
        assert_eq!(parse_threshold(" 60.5 % "), Some(60.5));
    }

    #[test]
    fn blank_means_no_filter() {
        assert_eq!(parse_threshold(""), Some(0.0));
        assert_eq!(parse_threshold("  %"), Some(0.0));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(parse_threshold("high"), None);
        assert_eq!(parse_threshold("inf"), None);
    }
}
