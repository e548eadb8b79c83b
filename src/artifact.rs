//! Generated-document store.
//!
//! Holds finished PDFs between generation and whatever the user does
//! with them: download, open for printing, or discard. Discarding (or
//! the periodic sweep) releases the bytes; nothing outlives its welcome.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::pipeline::GeneratedDocument;

/// How long an unclaimed artifact is kept before the sweep reclaims it.
pub const ARTIFACT_EXPIRY_SECS: i64 = 10 * 60;

struct StoredArtifact {
    filename: String,
    document: GeneratedDocument,
    created_at: DateTime<Utc>,
}

/// Uuid-keyed store of finished documents.
#[derive(Default)]
pub struct ArtifactStore {
    artifacts: RwLock<HashMap<Uuid, StoredArtifact>>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished document and return its handle.
    pub async fn insert(&self, filename: String, document: GeneratedDocument) -> Uuid {
        let id = Uuid::new_v4();
        let mut artifacts = self.artifacts.write().await;
        artifacts.insert(
            id,
            StoredArtifact {
                filename,
                document,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// The artifact's filename and PDF bytes, if it still exists.
    pub async fn pdf(&self, id: Uuid) -> Option<(String, Vec<u8>)> {
        let artifacts = self.artifacts.read().await;
        artifacts
            .get(&id)
            .map(|a| (a.filename.clone(), a.document.pdf.clone()))
    }

    /// Discard an artifact, releasing its bytes. Returns whether it existed.
    pub async fn discard(&self, id: Uuid) -> bool {
        self.artifacts.write().await.remove(&id).is_some()
    }

    /// Reclaim artifacts older than the expiry window. Returns the count.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::seconds(ARTIFACT_EXPIRY_SECS);
        let mut artifacts = self.artifacts.write().await;
        let before = artifacts.len();
        artifacts.retain(|_, a| a.created_at > cutoff);
        before - artifacts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageGeometry, fit};

    fn document() -> GeneratedDocument {
        GeneratedDocument {
            pdf: b"%PDF-1.7 fake".to_vec(),
            placement: fit(100, 60, PageGeometry::A4_LANDSCAPE),
            raster_size: (100, 60),
        }
    }

    #[tokio::test]
    async fn test_insert_fetch_discard() {
        let store = ArtifactStore::new();
        let id = store.insert("petition_Ann.pdf".into(), document()).await;

        let (filename, bytes) = store.pdf(id).await.unwrap();
        assert_eq!(filename, "petition_Ann.pdf");
        assert!(bytes.starts_with(b"%PDF-"));

        assert!(store.discard(id).await);
        assert!(store.pdf(id).await.is_none());
        // Discarding twice is a no-op, not an error.
        assert!(!store.discard(id).await);
    }

    #[tokio::test]
    async fn test_sweep_reclaims_old_artifacts() {
        let store = ArtifactStore::new();
        let id = store.insert("petition_Ann.pdf".into(), document()).await;

        let reclaimed = store
            .sweep(Utc::now() + Duration::seconds(ARTIFACT_EXPIRY_SECS + 1))
            .await;
        assert_eq!(reclaimed, 1);
        assert!(store.pdf(id).await.is_none());
    }
}
