//! Session, target selection and form submission handlers.
//!
//! Submitting the form runs the whole generation pipeline. Requests are
//! serialized per session by generation number: a submission that
//! finishes after a newer one has been claimed drops its artifact
//! instead of publishing it.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::reject;
use crate::error::StampaError;
use crate::form::FormData;
use crate::pipeline::GenerationRequest;
use crate::server::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
}

/// POST /api/session - issue a session id for the browser to hold.
pub async fn create_session() -> Json<SessionResponse> {
    Json(SessionResponse {
        session_id: Uuid::new_v4(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub session_id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectResponse {
    pub name: String,
    pub district: String,
    pub deadline: String,
}

/// POST /api/target/select - validate against the directory and remember
/// the selection. Selecting discards any previously submitted form data.
pub async fn select_target(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, (StatusCode, String)> {
    let directory = state.source.target_directory().await.map_err(reject)?;
    let Some(target) = directory.find(&req.name) else {
        return Err(reject(StampaError::ConfigMissing(req.name)));
    };

    let name = target.name.clone();
    state
        .sessions
        .with_session(req.session_id, |s| s.select_target(name, Utc::now()))
        .await;

    Ok(Json(SelectResponse {
        name: target.name.clone(),
        district: target.district.clone(),
        deadline: target.deadline.clone(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub form: FormData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub artifact_id: Uuid,
    pub filename: String,
}

/// POST /api/form/submit - store the form and run the pipeline.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, (StatusCode, String)> {
    let now = Utc::now();

    // Store the submission and claim a generation number in one step.
    let (target, generation) = state
        .sessions
        .with_session(req.session_id, |s| {
            s.submit_form(req.form, now);
            (
                s.target(now).map(str::to_string),
                s.next_generation(),
            )
        })
        .await;

    let Some(target) = target else {
        return Err((
            StatusCode::CONFLICT,
            "No target selected for this session".to_string(),
        ));
    };

    // Hand-off: read back through the store so expiry is checked at the
    // moment the pipeline takes the values.
    let form = state
        .sessions
        .with_session(req.session_id, |s| s.form(now).cloned())
        .await
        .map_err(reject)?;

    let request = GenerationRequest { target, form };
    let document = state.pipeline.generate(&request).await.map_err(reject)?;

    // Publish only if no newer submission claimed the session meanwhile;
    // a superseded run releases its artifact here by dropping it.
    let current = state
        .sessions
        .with_session(req.session_id, |s| s.generation())
        .await;
    if current != generation {
        println!("[pipeline] Generation {generation} superseded by {current}, dropping artifact");
        return Err((
            StatusCode::CONFLICT,
            "Superseded by a newer request".to_string(),
        ));
    }

    let filename = format!("petition_{}.pdf", request.form.name);
    let artifact_id = state.artifacts.insert(filename.clone(), document).await;

    Ok(Json(SubmitResponse {
        artifact_id,
        filename,
    }))
}
