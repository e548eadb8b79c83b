//! Target directory API.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Local;
use serde::Serialize;
use std::sync::Arc;

use super::reject;
use crate::server::state::AppState;

/// One target as shown in the search UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    pub name: String,
    pub district: String,
    pub deadline: String,
    /// Whole days until the deadline; absent when the date is malformed.
    pub days_remaining: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    pub targets: Vec<TargetInfo>,
}

/// GET /api/targets - the directory, freshly fetched.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TargetsResponse>, (StatusCode, String)> {
    let directory = state.source.target_directory().await.map_err(reject)?;
    let today = Local::now().date_naive();
    let targets = directory
        .targets
        .into_iter()
        .map(|t| TargetInfo {
            days_remaining: t.days_remaining(today),
            name: t.name,
            district: t.district,
            deadline: t.deadline,
        })
        .collect();
    Ok(Json(TargetsResponse { targets }))
}
