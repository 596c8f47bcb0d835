use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cache::cache::AssetCache;
use crate::cache::install::CacheError;
use crate::cache::versioning::CacheManifest;
use crate::types::identifiers::CacheName;

const MANIFEST_FILE: &str = "manifest.json";

/// Named caches, one directory each, under a shared root.
#[derive(Debug, Clone)]
pub struct CacheStorage {
    root: PathBuf,
}

impl CacheStorage {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn cache_dir(&self, name: &CacheName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Names of every completely installed cache, sorted.
    pub fn keys(&self) -> Result<Vec<CacheName>, CacheError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(raw) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            // In-progress installs are not caches yet
            if raw.contains(".tmp.") || !entry.path().join(MANIFEST_FILE).is_file() {
                continue;
            }
            if let Ok(name) = CacheName::parse(raw) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn has(&self, name: &CacheName) -> bool {
        self.cache_dir(name).join(MANIFEST_FILE).is_file()
    }

    pub fn open(&self, name: &CacheName) -> Result<Option<AssetCache>, CacheError> {
        let root = self.cache_dir(name);
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Ok(None);
        }

        let f = fs::File::open(&manifest_path)?;
        let manifest: CacheManifest = serde_json::from_reader(f)?;
        debug!("opened cache {name} ({} assets)", manifest.asset_count);
        Ok(Some(AssetCache { root, manifest }))
    }

    /// Returns false if there was nothing to delete.
    pub fn delete(&self, name: &CacheName) -> Result<bool, CacheError> {
        let dir = self.cache_dir(name);
        if !dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir)?;
        info!("deleted cache {name}");
        Ok(true)
    }
}
