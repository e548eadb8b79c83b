//! The generation pipeline: one request from target identity to PDF bytes.
//!
//! Stages run strictly in order for a request; the compose and encode
//! steps are CPU-bound and run on the blocking pool so the runtime stays
//! responsive. The pipeline holds no request state between runs: every
//! input arrives in the [`GenerationRequest`], every output leaves in the
//! [`GeneratedDocument`].

use std::sync::Arc;

use crate::compose;
use crate::error::StampaError;
use crate::form::FormData;
use crate::page::{PageGeometry, Placement};
use crate::pdf;
use crate::source::{self, ConfigSource};
use crate::typeface::Typeface;

/// Stages of a single generation request.
///
/// `Ready` and `Failed` are terminal; a new request starts over at
/// `Idle`. `Failed` is reachable from every non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ResolvingConfig,
    LoadingImage,
    Composing,
    Assembling,
    Ready,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Ready | PipelineState::Failed)
    }
}

/// Everything one generation request needs, owned by the caller.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Target identity as listed in the directory.
    pub target: String,
    pub form: FormData,
}

/// The finished output of one request.
#[derive(Debug)]
pub struct GeneratedDocument {
    /// Encoded single-page PDF.
    pub pdf: Vec<u8>,
    /// Where the raster landed on the page, in millimetres.
    pub placement: Placement,
    /// Natural pixel dimensions of the composed raster.
    pub raster_size: (u32, u32),
}

/// Runs generation requests against a configuration source.
pub struct Pipeline {
    source: Arc<dyn ConfigSource>,
    face: Typeface,
    page: PageGeometry,
}

impl Pipeline {
    pub fn new(source: Arc<dyn ConfigSource>, face: Typeface) -> Self {
        Self {
            source,
            face,
            page: PageGeometry::A4_LANDSCAPE,
        }
    }

    /// Run one request to completion.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedDocument, StampaError> {
        self.generate_observed(request, |_| {}).await
    }

    /// Run one request, reporting each stage transition to `observe`.
    ///
    /// `observe` sees `ResolvingConfig` through `Ready` in order, or
    /// `Failed` as the final transition when a stage errors.
    pub async fn generate_observed(
        &self,
        request: &GenerationRequest,
        mut observe: impl FnMut(PipelineState),
    ) -> Result<GeneratedDocument, StampaError> {
        match self.run(request, &mut observe).await {
            Ok(doc) => {
                observe(PipelineState::Ready);
                Ok(doc)
            }
            Err(e) => {
                observe(PipelineState::Failed);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        observe: &mut impl FnMut(PipelineState),
    ) -> Result<GeneratedDocument, StampaError> {
        if request.form.is_empty() {
            return Err(StampaError::MissingFormData);
        }

        observe(PipelineState::ResolvingConfig);
        let directory = self.source.target_directory().await?;
        if !directory.contains(&request.target) {
            return Err(StampaError::ConfigMissing(request.target.clone()));
        }
        let entry = source::resolve_template(self.source.as_ref(), &request.target).await?;

        observe(PipelineState::LoadingImage);
        let template = self.source.load_image(&entry.template).await?;

        observe(PipelineState::Composing);
        let face = self.face.clone();
        let form = request.form.clone();
        let fields = entry.fields;
        let raster = tokio::task::spawn_blocking(move || {
            compose::compose(&template, &form, &fields, &face)
        })
        .await
        .map_err(|e| StampaError::ArtifactBuild(format!("Compose task failed: {e}")))?;
        let raster_size = raster.dimensions();

        observe(PipelineState::Assembling);
        let page = self.page;
        let (placement, pdf) =
            tokio::task::spawn_blocking(move || pdf::assemble(&raster, page))
                .await
                .map_err(|e| StampaError::ArtifactBuild(format!("Encode task failed: {e}")))??;

        Ok(GeneratedDocument {
            pdf,
            placement,
            raster_size,
        })
    }
}
