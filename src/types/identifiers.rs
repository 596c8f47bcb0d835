use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Stable identity of a chip, assigned when the chip enters a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChipId(u64);

impl ChipId {
    pub(crate) fn new(raw: u64) -> Self {
        ChipId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chip-{}", self.0)
    }
}

/// Monotonic sequence number handed out per field each time a fetch is issued.
///
/// Only the most recently issued token for a field may apply its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Content hash of a cached asset body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        ContentDigest(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex portion without the algorithm prefix.
    pub fn hex(&self) -> Option<&str> {
        self.0.strip_prefix("sha256:")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheNameError {
    #[error("Cache name must not be empty")]
    Empty,
    #[error("Cache name contains a path separator: {0}")]
    PathSeparator(String),
}

/// Version-tagged cache name such as `mte-cache-v1`.
///
/// The family is everything before a trailing `-v<digits>` tag. Names without
/// a tag form their own family.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CacheName(String);

impl CacheName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, CacheNameError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CacheNameError::Empty);
        }
        // Names double as directory names inside the cache root.
        if raw.contains('/') || raw.contains('\\') || raw == "." || raw == ".." {
            return Err(CacheNameError::PathSeparator(raw));
        }
        Ok(CacheName(raw))
    }

    /// Literal names baked into presets.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        debug_assert!(CacheName::parse(raw).is_ok());
        CacheName(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn family(&self) -> &str {
        match self.split_tag() {
            Some((family, _)) => family,
            None => &self.0,
        }
    }

    pub fn version_tag(&self) -> Option<&str> {
        self.split_tag().map(|(_, tag)| tag)
    }

    /// Same family, different version tag.
    pub fn is_superseded_by(&self, active: &CacheName) -> bool {
        self != active && self.family() == active.family()
    }

    fn split_tag(&self) -> Option<(&str, &str)> {
        let (family, tag) = self.0.rsplit_once('-')?;
        let digits = tag.strip_prefix('v')?;
        if family.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some((family, tag))
    }
}

impl TryFrom<String> for CacheName {
    type Error = CacheNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CacheName::parse(value)
    }
}

impl From<CacheName> for String {
    fn from(name: CacheName) -> Self {
        name.0
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
