//! HTTP handlers for the server.

pub mod artifacts;
pub mod generate;
pub mod targets;

use axum::http::StatusCode;

use crate::error::StampaError;

/// The HTTP status a pipeline error surfaces as.
///
/// `MissingFormData` maps to 204: the frontend treats it as "nothing to
/// generate yet" and stays quiet, per the error taxonomy.
pub fn error_status(err: &StampaError) -> StatusCode {
    match err {
        StampaError::ConfigMissing(_) => StatusCode::NOT_FOUND,
        StampaError::MissingFormData => StatusCode::NO_CONTENT,
        StampaError::ExpiredData => StatusCode::GONE,
        StampaError::ConfigFetch(_)
        | StampaError::ImageLoad(_)
        | StampaError::ArtifactBuild(_)
        | StampaError::Io(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Standard rejection tuple for a pipeline error.
///
/// A 204 must not carry a body; the quiet no-op case stays quiet.
pub fn reject(err: StampaError) -> (StatusCode, String) {
    let status = error_status(&err);
    if status == StatusCode::NO_CONTENT {
        (status, String::new())
    } else {
        (status, err.to_string())
    }
}
