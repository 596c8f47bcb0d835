use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use crate::cache::cache::AssetCache;
use crate::cache::fetch::AssetResponse;
use crate::cache::storage::CacheStorage;
use crate::cache::versioning::{CacheConfig, CacheManifest, ManifestAssetEntry};
use crate::service::ServiceError;
use crate::types::identifiers::ContentDigest;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to fetch {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: ServiceError,
    },
    #[error("Asset {path} returned status {status}")]
    BadStatus { path: String, status: u16 },
    #[error("Manifest asset missing from install set: {0}")]
    MissingAsset(String),
    #[error("Asset not in manifest: {0}")]
    UnexpectedAsset(String),
    #[error("Cached asset {path} is corrupt: manifest says {expected}, content hashes to {actual}")]
    IntegrityMismatch {
        path: String,
        expected: String,
        actual: String,
    },
    #[error("Invalid digest format: {0}")]
    InvalidDigestFormat(String),
    #[error("Invalid cache config: {0}")]
    InvalidConfig(String),
    #[error("Cache has not been installed")]
    NotInstalled,
}

/// A manifest path and what the network answered for it.
#[derive(Debug, Clone)]
pub struct FetchedAsset {
    pub path: String,
    pub response: AssetResponse,
}

/// CacheInstaller is single-threaded and non-reentrant by design.
pub struct CacheInstaller<'a> {
    config: &'a CacheConfig,
}

impl<'a> CacheInstaller<'a> {
    pub fn new(config: &'a CacheConfig) -> Self {
        Self { config }
    }

    /// Write a complete cache for the configured name, or nothing at all.
    ///
    /// `assets` must cover the manifest exactly and every response must be a
    /// success. Files are written to a temp directory which is renamed into
    /// place only once everything is on disk.
    pub fn install(
        &self,
        assets: Vec<FetchedAsset>,
        storage: &CacheStorage,
    ) -> Result<AssetCache, CacheError> {
        // 1. Sort by path for a deterministic manifest
        let mut sorted = assets;
        sorted.sort_by(|a, b| a.path.cmp(&b.path));

        // 1b. Exactly the manifest, each path once, all successful
        let mut seen = BTreeSet::new();
        for asset in &sorted {
            if !self.config.contains_path(&asset.path) {
                return Err(CacheError::UnexpectedAsset(asset.path.clone()));
            }
            if !seen.insert(asset.path.as_str()) {
                return Err(CacheError::UnexpectedAsset(asset.path.clone()));
            }
            if !asset.response.is_success() {
                return Err(CacheError::BadStatus {
                    path: asset.path.clone(),
                    status: asset.response.status,
                });
            }
        }
        if let Some(missing) = self.config.asset_paths.iter().find(|p| !seen.contains(p.as_str())) {
            return Err(CacheError::MissingAsset(missing.clone()));
        }

        // 2. Build entries; identical bodies share one stored file
        let mut entries = Vec::with_capacity(sorted.len());
        let mut version_hasher = Sha256::new();
        version_hasher.update(self.config.cache_name.as_str().as_bytes());

        for asset in &sorted {
            let digest = ContentDigest::from_content(&asset.response.body);
            let hex = digest
                .hex()
                .ok_or_else(|| CacheError::InvalidDigestFormat(digest.as_str().to_string()))?;
            let file = format!("assets/{hex}");

            let line = format!("{}:{}", asset.path, digest.as_str());
            version_hasher.update(line.as_bytes());

            entries.push(ManifestAssetEntry {
                path: asset.path.clone(),
                digest,
                file,
                status: asset.response.status,
                content_type: asset.response.content_type.clone(),
            });
        }

        let content_version = format!("sha256:{}", hex::encode(version_hasher.finalize()));

        let manifest = CacheManifest {
            cache_name: self.config.cache_name.clone(),
            content_version: content_version.clone(),
            created_at: Utc::now(),
            asset_count: entries.len(),
            assets: entries,
        };

        // 3. Write to temp dir next to the final location
        let output_dir = storage.cache_dir(&self.config.cache_name);
        let temp_dir = PathBuf::from(format!(
            "{}.tmp.{}",
            output_dir.display(),
            &content_version[7..19]
        ));

        // Left over from a crashed install of this exact content
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir)?;
        }

        if let Err(e) = Self::write_tree(&temp_dir, &sorted, &manifest) {
            let _ = fs::remove_dir_all(&temp_dir);
            return Err(e);
        }

        // 4. Swap into place
        if output_dir.exists() {
            debug!("replacing existing cache at {}", output_dir.display());
            fs::remove_dir_all(&output_dir)?;
        }
        fs::rename(&temp_dir, &output_dir)?;

        info!(
            "installed cache {} ({} assets, {})",
            manifest.cache_name, manifest.asset_count, manifest.content_version
        );

        Ok(AssetCache {
            root: output_dir,
            manifest,
        })
    }

    fn write_tree(
        dir: &std::path::Path,
        assets: &[FetchedAsset],
        manifest: &CacheManifest,
    ) -> Result<(), CacheError> {
        fs::create_dir_all(dir.join("assets"))?;

        // manifest.assets is aligned with `assets` by construction
        for (asset, entry) in assets.iter().zip(&manifest.assets) {
            let path = dir.join(&entry.file);
            if path.exists() {
                continue;
            }
            fs::write(&path, &asset.response.body)?;
        }

        let f = fs::File::create(dir.join("manifest.json"))?;
        serde_json::to_writer_pretty(&f, manifest)?;
        f.sync_all()?;
        Ok(())
    }
}
