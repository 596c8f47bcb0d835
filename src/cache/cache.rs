// Read side of an installed cache:
// no mutation
// no "put" methods
// lookups only

use std::path::PathBuf;

use crate::cache::fetch::AssetResponse;
use crate::cache::install::CacheError;
use crate::cache::versioning::{CacheManifest, ManifestAssetEntry};
use crate::types::identifiers::ContentDigest;

#[derive(Debug, Clone)]
pub struct AssetCache {
    pub root: PathBuf,
    pub manifest: CacheManifest,
}

impl AssetCache {
    pub fn entry(&self, key: &str) -> Option<&ManifestAssetEntry> {
        self.manifest.assets.iter().find(|a| a.path == key)
    }

    /// Cached response for `key`, re-verified against the manifest digest.
    pub fn match_key(&self, key: &str) -> Result<Option<AssetResponse>, CacheError> {
        let Some(entry) = self.entry(key) else {
            return Ok(None);
        };
        self.load_entry(entry).map(Some)
    }

    fn load_entry(&self, entry: &ManifestAssetEntry) -> Result<AssetResponse, CacheError> {
        let body = std::fs::read(self.root.join(&entry.file))?;

        let actual = ContentDigest::from_content(&body);
        if actual != entry.digest {
            return Err(CacheError::IntegrityMismatch {
                path: entry.path.clone(),
                expected: entry.digest.as_str().to_string(),
                actual: actual.as_str().to_string(),
            });
        }

        Ok(AssetResponse {
            status: entry.status,
            content_type: entry.content_type.clone(),
            body,
        })
    }

    /// Every manifest entry is present on disk with the recorded digest.
    pub fn verify(&self) -> Result<(), CacheError> {
        for entry in &self.manifest.assets {
            self.load_entry(entry)?;
        }
        Ok(())
    }
}
