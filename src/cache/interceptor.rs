//! Offline shell: install a versioned cache from the manifest, then answer
//! fetches from it according to the configured policy.

use tracing::{debug, info, warn};
use url::Url;

use crate::cache::cache::AssetCache;
use crate::cache::fetch::{AssetFetcher, AssetRequest, AssetResponse};
use crate::cache::install::{CacheError, CacheInstaller, FetchedAsset};
use crate::cache::storage::CacheStorage;
use crate::cache::versioning::{CacheConfig, InterceptPolicy};
use crate::types::identifiers::CacheName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Installing,
    Active,
    /// Install failed; this version never takes over.
    Redundant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Served {
        source: ResponseSource,
        response: AssetResponse,
    },
    /// Not intercepted; the host sends the request to network itself.
    Bypassed,
}

pub struct AssetCacheInterceptor<F> {
    config: CacheConfig,
    storage: CacheStorage,
    fetcher: F,
    origin: Url,
    state: WorkerState,
    cache: Option<AssetCache>,
    controls_clients: bool,
}

impl<F> AssetCacheInterceptor<F>
where
    F: AssetFetcher,
{
    /// `origin` is the base manifest paths are resolved against.
    pub fn new(
        config: CacheConfig,
        storage: CacheStorage,
        fetcher: F,
        origin: Url,
    ) -> Result<Self, CacheError> {
        config
            .validate()
            .map_err(|e| CacheError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            config,
            storage,
            fetcher,
            origin,
            state: WorkerState::Installing,
            cache: None,
            controls_clients: false,
        })
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache(&self) -> Option<&AssetCache> {
        self.cache.as_ref()
    }

    pub fn controls_clients(&self) -> bool {
        self.controls_clients
    }

    /// Populate the cache from the manifest, all or nothing.
    ///
    /// There is no waiting phase: a successful install may be activated
    /// straight away.
    pub async fn on_install(&mut self) -> Result<(), CacheError> {
        self.state = WorkerState::Installing;
        match self.install().await {
            Ok(cache) => {
                self.cache = Some(cache);
                Ok(())
            }
            Err(e) => {
                warn!("install of {} failed: {e}", self.config.cache_name);
                self.state = WorkerState::Redundant;
                Err(e)
            }
        }
    }

    async fn install(&self) -> Result<AssetCache, CacheError> {
        let existing = match self.storage.open(&self.config.cache_name) {
            Ok(existing) => existing,
            Err(e) => {
                warn!("ignoring unreadable cache {}: {e}", self.config.cache_name);
                None
            }
        };
        if let Some(existing) = existing {
            let covers = existing.manifest.paths().len() == self.config.asset_paths.len()
                && self
                    .config
                    .asset_paths
                    .iter()
                    .all(|p| existing.entry(p).is_some());
            if covers && existing.verify().is_ok() {
                info!("reusing installed cache {}", self.config.cache_name);
                return Ok(existing);
            }
        }

        let mut fetched = Vec::with_capacity(self.config.asset_paths.len());
        for path in &self.config.asset_paths {
            let url = self
                .origin
                .join(path)
                .map_err(|e| CacheError::InvalidConfig(format!("{path}: {e}")))?;
            let response = self
                .fetcher
                .fetch(&AssetRequest::get(url))
                .await
                .map_err(|source| CacheError::Fetch {
                    path: path.clone(),
                    source,
                })?;
            fetched.push(FetchedAsset {
                path: path.clone(),
                response,
            });
        }

        CacheInstaller::new(&self.config).install(fetched, &self.storage)
    }

    /// Take control and drop older versions of this cache family.
    ///
    /// Returns the names of the pruned caches.
    pub fn on_activate(&mut self) -> Result<Vec<CacheName>, CacheError> {
        if self.state == WorkerState::Redundant || self.cache.is_none() {
            return Err(CacheError::NotInstalled);
        }

        let active = &self.config.cache_name;
        let mut pruned = Vec::new();
        for name in self.storage.keys()? {
            if name.is_superseded_by(active) && self.storage.delete(&name)? {
                pruned.push(name);
            }
        }

        self.controls_clients = true;
        self.state = WorkerState::Active;
        info!("cache {active} active, pruned {} stale", pruned.len());
        Ok(pruned)
    }

    pub async fn on_fetch(&self, request: &AssetRequest) -> Result<FetchOutcome, CacheError> {
        if self.state != WorkerState::Active {
            return Ok(FetchOutcome::Bypassed);
        }

        let intercept = match self.config.intercept_policy {
            InterceptPolicy::Advisory => true,
            InterceptPolicy::Authoritative => self.config.contains_path(request.path()),
        };
        if !intercept {
            debug!("bypassing {}", request.url);
            return Ok(FetchOutcome::Bypassed);
        }

        if let Some(response) = self.lookup(request) {
            return Ok(FetchOutcome::Served {
                source: ResponseSource::Cache,
                response,
            });
        }

        let response = self
            .fetcher
            .fetch(request)
            .await
            .map_err(|source| CacheError::Fetch {
                path: request.cache_key(),
                source,
            })?;
        Ok(FetchOutcome::Served {
            source: ResponseSource::Network,
            response,
        })
    }

    fn lookup(&self, request: &AssetRequest) -> Option<AssetResponse> {
        if request.method != reqwest::Method::GET {
            return None;
        }
        let cache = self.cache.as_ref()?;
        match cache.match_key(&request.cache_key()) {
            Ok(hit) => hit,
            Err(e) => {
                warn!("cache lookup for {} failed, using network: {e}", request.url);
                None
            }
        }
    }
}
