use axum::{extract::State, response::Json};
use std::sync::Arc;

use super::AppState;
use crate::api::models::ProgressResponse;
use crate::domain::ProgressSnapshot;

pub async fn get_progress(State(state): State<Arc<AppState>>) -> Json<ProgressResponse> {
    let snapshot = state
        .orchestrator
        .progress()
        .unwrap_or_else(ProgressSnapshot::idle);

    Json(ProgressResponse {
        snapshot,
        all_records: state.orchestrator.accumulated_records(),
    })
}
