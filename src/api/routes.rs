use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    events::stream_events,
    health_check,
    progress::get_progress,
    ranking::{get_ranking, start_multi_crawl},
    search::search_by_winrate,
    service_info,
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/api/health", get(health_check))
        .route("/api/ranking", get(get_ranking))
        .route("/api/ranking/multi", post(start_multi_crawl))
        .route("/api/progress", get(get_progress))
        .route("/api/search/winrate", get(search_by_winrate))
        .route("/api/events", get(stream_events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
