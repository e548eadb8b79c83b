//! # Error Types
//!
//! This module defines error types used throughout the stampa library.

use thiserror::Error;

/// Main error type for stampa operations.
///
/// The variants matter to callers: fetch failures are infrastructure
/// problems, a missing config entry is a content problem, missing form
/// data is not a fault at all (there is simply nothing to generate yet),
/// and expired form data must be surfaced distinctly so the user knows to
/// fill the form in again.
#[derive(Debug, Error)]
pub enum StampaError {
    /// Template configuration could not be retrieved or parsed.
    #[error("Failed to load template configuration: {0}")]
    ConfigFetch(String),

    /// Configuration loaded fine but has no entry for the target.
    #[error("No template configured for \"{0}\"")]
    ConfigMissing(String),

    /// Template image failed to load or decode.
    #[error("Failed to load template image: {0}")]
    ImageLoad(String),

    /// No form data has been submitted yet.
    #[error("No form data submitted")]
    MissingFormData,

    /// Form data exists but its validity window has passed.
    #[error("Form data has expired, please fill in the form again")]
    ExpiredData,

    /// The output document could not be encoded.
    #[error("Failed to build the PDF document: {0}")]
    ArtifactBuild(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
