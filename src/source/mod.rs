//! Configuration sources: where templates, directories and images come from.
//!
//! [`ConfigSource`] bundles the template-config resolver and the image
//! loader behind one async interface with filesystem and HTTP backends.
//! Configuration is re-fetched on every call, never cached, so layout
//! updates take effect without restarting anything.

use async_trait::async_trait;
use image::DynamicImage;

use crate::directory::TargetDirectory;
use crate::error::StampaError;
use crate::template::{TemplateConfig, TemplateEntry};

mod fs;
mod http;

pub use fs::FsSource;
pub use http::HttpSource;

/// File name of the template configuration within a source.
pub const TEMPLATE_CONFIG_PATH: &str = "template-config.json";

/// File name of the target directory within a source.
pub const DIRECTORY_PATH: &str = "data.json";

/// Async access to the fetched configuration and template assets.
///
/// Failure kinds matter to callers: `ConfigFetch` is an infrastructure
/// problem (retrieval or parsing failed), `ConfigMissing` a content
/// problem (fetched fine, no entry), `ImageLoad` a broken asset.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetch and parse the template configuration.
    async fn template_config(&self) -> Result<TemplateConfig, StampaError>;

    /// Fetch and parse the target directory.
    async fn target_directory(&self) -> Result<TargetDirectory, StampaError>;

    /// Load and decode a template image by its asset reference.
    async fn load_image(&self, image_ref: &str) -> Result<DynamicImage, StampaError>;
}

/// Resolve one target's layout contract.
pub async fn resolve_template(
    source: &dyn ConfigSource,
    target: &str,
) -> Result<TemplateEntry, StampaError> {
    let config = source.template_config().await?;
    config
        .entries
        .get(target)
        .cloned()
        .ok_or_else(|| StampaError::ConfigMissing(target.to_string()))
}
