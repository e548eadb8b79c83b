//! Filesystem-backed configuration source.

use async_trait::async_trait;
use image::DynamicImage;
use std::path::{Path, PathBuf};

use super::{ConfigSource, DIRECTORY_PATH, TEMPLATE_CONFIG_PATH};
use crate::directory::TargetDirectory;
use crate::error::StampaError;
use crate::template::TemplateConfig;

/// Reads configuration from a directory on disk: `template-config.json`,
/// `data.json`, and template images resolved relative to the root.
#[derive(Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read(&self, rel: &str) -> Result<(PathBuf, Vec<u8>), (PathBuf, String)> {
        let path = self.root.join(rel);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok((path, bytes)),
            Err(e) => Err((path, e.to_string())),
        }
    }
}

#[async_trait]
impl ConfigSource for FsSource {
    async fn template_config(&self) -> Result<TemplateConfig, StampaError> {
        let (path, bytes) = self
            .read(TEMPLATE_CONFIG_PATH)
            .await
            .map_err(|(p, e)| StampaError::ConfigFetch(format!("{}: {e}", p.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| StampaError::ConfigFetch(format!("{}: {e}", path.display())))
    }

    async fn target_directory(&self) -> Result<TargetDirectory, StampaError> {
        let (path, bytes) = self
            .read(DIRECTORY_PATH)
            .await
            .map_err(|(p, e)| StampaError::ConfigFetch(format!("{}: {e}", p.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| StampaError::ConfigFetch(format!("{}: {e}", path.display())))
    }

    async fn load_image(&self, image_ref: &str) -> Result<DynamicImage, StampaError> {
        let (path, bytes) = self
            .read(image_ref)
            .await
            .map_err(|(p, e)| StampaError::ImageLoad(format!("{}: {e}", p.display())))?;
        image::load_from_memory(&bytes)
            .map_err(|e| StampaError::ImageLoad(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::resolve_template;
    use std::fs;

    fn write_config_dir(dir: &Path) {
        fs::write(
            dir.join(TEMPLATE_CONFIG_PATH),
            r#"{"Jane Doe": {"template": "jane.png", "fields": {
                "name": {"x": 10, "y": 50, "fontSize": 20, "maxWidth": 200}
            }}}"#,
        )
        .unwrap();
        fs::write(
            dir.join(DIRECTORY_PATH),
            r#"{"targets": [{"name": "Jane Doe", "district": "3rd", "deadline": "2026-09-30"}]}"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_resolve_known_target() {
        let dir = tempfile::tempdir().unwrap();
        write_config_dir(dir.path());
        let source = FsSource::new(dir.path());
        let entry = resolve_template(&source, "Jane Doe").await.unwrap();
        assert_eq!(entry.template, "jane.png");
    }

    #[tokio::test]
    async fn test_unknown_target_is_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_config_dir(dir.path());
        let source = FsSource::new(dir.path());
        let err = resolve_template(&source, "Nobody").await.unwrap_err();
        assert!(matches!(err, StampaError::ConfigMissing(name) if name == "Nobody"));
    }

    #[tokio::test]
    async fn test_missing_config_file_is_config_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsSource::new(dir.path());
        let err = resolve_template(&source, "Jane Doe").await.unwrap_err();
        assert!(matches!(err, StampaError::ConfigFetch(_)));
    }

    #[tokio::test]
    async fn test_malformed_config_is_config_fetch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TEMPLATE_CONFIG_PATH), "{not json").unwrap();
        let source = FsSource::new(dir.path());
        let err = source.template_config().await.unwrap_err();
        assert!(matches!(err, StampaError::ConfigFetch(_)));
    }

    #[tokio::test]
    async fn test_broken_image_is_image_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("jane.png"), b"not a png").unwrap();
        let source = FsSource::new(dir.path());
        let err = source.load_image("jane.png").await.unwrap_err();
        assert!(matches!(err, StampaError::ImageLoad(_)));
        let err = source.load_image("absent.png").await.unwrap_err();
        assert!(matches!(err, StampaError::ImageLoad(_)));
    }
}
