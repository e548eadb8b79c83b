//! # Stampa - Petition Sheet Generator
//!
//! Stampa overlays submitted form data onto per-target template images
//! and embeds the result into a single-page landscape A4 PDF, ready to
//! download or print. It provides:
//!
//! - **Glyph layout**: even character spacing for fixed-width fields,
//!   greedy line wrapping for free text
//! - **Canvas composition**: template background plus overlay text at
//!   the template's natural resolution
//! - **Document assembly**: aspect-preserving scale and centering into a
//!   fixed-size page, written with `pdf-writer`
//! - **Configuration sources**: filesystem and HTTP backends, re-fetched
//!   per request so layout updates take effect immediately
//! - **HTTP server**: the embedded web frontend plus the session and
//!   artifact plumbing around the pipeline
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use stampa::pipeline::{GenerationRequest, Pipeline};
//! use stampa::source::FsSource;
//! use stampa::typeface::Typeface;
//! use stampa::FormData;
//!
//! # async fn example() -> Result<(), stampa::StampaError> {
//! let source = Arc::new(FsSource::new("config"));
//! let face = Typeface::load_or_system(None)?;
//! let pipeline = Pipeline::new(source, face);
//!
//! let request = GenerationRequest {
//!     target: "Jane Doe".to_string(),
//!     form: FormData {
//!         name: "Ann Example".to_string(),
//!         id_number: "A123456789".to_string(),
//!         birth_date: "1990-01-01".to_string(),
//!         address: "12 Example Road".to_string(),
//!     },
//! };
//! let document = pipeline.generate(&request).await?;
//! std::fs::write("petition.pdf", &document.pdf)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Even spacing and line wrapping |
//! | [`compose`] | Template + text composition |
//! | [`page`] | Page geometry and placement |
//! | [`pdf`] | Single-page PDF encoding |
//! | [`pipeline`] | The generation state machine |
//! | [`source`] | Filesystem/HTTP configuration backends |
//! | [`session`] | Per-user state with expiry |
//! | [`artifact`] | Finished-document store |
//! | [`server`] | HTTP server and embedded frontend |
//! | [`error`] | Error types |

pub mod artifact;
pub mod compose;
pub mod directory;
pub mod error;
pub mod form;
pub mod layout;
pub mod page;
pub mod pdf;
pub mod pipeline;
pub mod server;
pub mod session;
pub mod source;
pub mod template;
pub mod typeface;

// Re-exports for convenience
pub use error::StampaError;
pub use form::FormData;
pub use page::PageGeometry;
pub use template::{FieldSpec, TemplateConfig};
