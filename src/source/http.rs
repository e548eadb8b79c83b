//! HTTP-backed configuration source.

use async_trait::async_trait;
use image::DynamicImage;

use super::{ConfigSource, DIRECTORY_PATH, TEMPLATE_CONFIG_PATH};
use crate::directory::TargetDirectory;
use crate::error::StampaError;
use crate::template::TemplateConfig;

/// Fetches configuration from a base URL.
///
/// The template config request carries a cache-busting timestamp query so
/// intermediary caches never serve a stale layout; template images are
/// stable assets and are fetched as-is.
pub struct HttpSource {
    base: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base: impl Into<String>) -> Result<Self, StampaError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stampa/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StampaError::ConfigFetch(format!("HTTP client error: {e}")))?;
        Ok(Self {
            base: base.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, rel: &str) -> String {
        if rel.starts_with("http://") || rel.starts_with("https://") {
            rel.to_string()
        } else {
            format!("{}/{}", self.base, rel)
        }
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch {url}: {e}"))?;
        if !response.status().is_success() {
            return Err(format!("Failed to fetch {url}: HTTP {}", response.status()));
        }
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| format!("Failed to read {url}: {e}"))
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    async fn template_config(&self) -> Result<TemplateConfig, StampaError> {
        let url = format!(
            "{}?t={}",
            self.url(TEMPLATE_CONFIG_PATH),
            chrono::Utc::now().timestamp_millis()
        );
        let bytes = self.get_bytes(&url).await.map_err(StampaError::ConfigFetch)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| StampaError::ConfigFetch(format!("Failed to parse {url}: {e}")))
    }

    async fn target_directory(&self) -> Result<TargetDirectory, StampaError> {
        let url = self.url(DIRECTORY_PATH);
        let bytes = self.get_bytes(&url).await.map_err(StampaError::ConfigFetch)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| StampaError::ConfigFetch(format!("Failed to parse {url}: {e}")))
    }

    async fn load_image(&self, image_ref: &str) -> Result<DynamicImage, StampaError> {
        let url = self.url(image_ref);
        let bytes = self.get_bytes(&url).await.map_err(StampaError::ImageLoad)?;
        image::load_from_memory(&bytes)
            .map_err(|e| StampaError::ImageLoad(format!("Failed to decode {url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_refs_join_the_base() {
        let source = HttpSource::new("https://example.org/petition/").unwrap();
        assert_eq!(
            source.url("templates/jane.png"),
            "https://example.org/petition/templates/jane.png"
        );
    }

    #[test]
    fn test_absolute_refs_pass_through() {
        let source = HttpSource::new("https://example.org").unwrap();
        assert_eq!(
            source.url("https://cdn.example.org/jane.png"),
            "https://cdn.example.org/jane.png"
        );
    }
}
