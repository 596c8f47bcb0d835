pub mod cache;
pub mod fetch;
pub mod install;
pub mod interceptor;
pub mod storage;
pub mod versioning;

pub use cache::AssetCache;
pub use fetch::{AssetFetcher, AssetRequest, AssetResponse, HttpAssetFetcher};
pub use install::{CacheError, CacheInstaller, FetchedAsset};
pub use interceptor::{AssetCacheInterceptor, FetchOutcome, ResponseSource, WorkerState};
pub use storage::CacheStorage;
pub use versioning::{CacheConfig, CacheManifest, InterceptPolicy, ManifestAssetEntry};
