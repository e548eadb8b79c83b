//! Artifact download, print and discard handlers.
//!
//! The three post-generation affordances: fetch the PDF inline (the
//! frontend shows it in an iframe and calls the browser's print on it),
//! fetch it as an attachment, or discard it and release the bytes.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::server::state::AppState;

/// GET /api/artifact/:id/pdf - the PDF bytes, inline.
pub async fn pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (filename, bytes) = fetch(&state, id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

/// GET /api/artifact/:id/download - the PDF bytes, as an attachment.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (filename, bytes) = fetch(&state, id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

/// DELETE /api/artifact/:id - discard and release.
pub async fn discard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.artifacts.discard(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn fetch(state: &AppState, id: Uuid) -> Result<(String, Vec<u8>), (StatusCode, String)> {
    state
        .artifacts
        .pdf(id)
        .await
        .ok_or((StatusCode::NOT_FOUND, "No such artifact".to_string()))
}
