use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::{load_json, ConfigError};
use crate::types::identifiers::{CacheName, ContentDigest};

/// Whether the manifest merely seeds the cache or also bounds what is intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterceptPolicy {
    /// Every request is looked up in the cache before going to network.
    Advisory,
    /// Only manifest paths are intercepted; everything else goes straight to
    /// network, so API traffic is never answered from cache.
    Authoritative,
}

// Key point:
// Serializable
// Comparable
// Fixed at deploy time
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    pub cache_name: CacheName,
    pub asset_paths: BTreeSet<String>,
    pub intercept_policy: InterceptPolicy,
}

impl CacheConfig {
    pub const NAME_V1: &'static str = "mte-cache-v1";

    /// Static frontend deployment: manifest seeds the cache, every fetch is
    /// checked against it.
    pub fn shell_v1() -> Self {
        Self::preset(
            InterceptPolicy::Advisory,
            &["/", "/index.html", "/style.css", "/script.js", "/manifest.json"],
        )
    }

    /// Deployment served next to the live backend: only shell assets are
    /// intercepted.
    pub fn app_v1() -> Self {
        Self::preset(
            InterceptPolicy::Authoritative,
            &["/", "/index.html", "/script_v2.js", "/styles.css", "/manifest.json"],
        )
    }

    fn preset(intercept_policy: InterceptPolicy, paths: &[&str]) -> Self {
        Self {
            cache_name: CacheName::from_static(Self::NAME_V1),
            asset_paths: paths.iter().map(|p| p.to_string()).collect(),
            intercept_policy,
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Asset paths must be absolute, without query or fragment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.asset_paths.is_empty() {
            return Err(ConfigError::Invalid("assetPaths must not be empty".into()));
        }
        for path in &self.asset_paths {
            if !path.starts_with('/') || path.contains('?') || path.contains('#') {
                return Err(ConfigError::Invalid(format!("invalid asset path: {path}")));
            }
        }
        Ok(())
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.asset_paths.contains(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ManifestAssetEntry {
    pub path: String,
    pub digest: ContentDigest,
    pub file: String,
    pub status: u16,
    pub content_type: Option<String>,
}

/// Written as `manifest.json` at the root of an installed cache.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub cache_name: CacheName,
    pub content_version: String,
    pub created_at: DateTime<Utc>, // informational only
    pub asset_count: usize,
    pub assets: Vec<ManifestAssetEntry>,
}

impl CacheManifest {
    pub fn paths(&self) -> BTreeSet<&str> {
        self.assets.iter().map(|a| a.path.as_str()).collect()
    }
}
