//! The persisted cache record.
//!
//! Load/store of the actual file belongs to an external persistence layer;
//! this module only defines the shape and the version-compatibility guard.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cache::store::Cache;
use crate::cache::types::CACHE_FILE_VERSION;

/// The on-disk cache record: the cache itself, a change counter per
/// document, and the format version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheFile {
    pub cache: Cache,
    /// Change counter (or timestamp) per document identifier, used by the
    /// persistence layer to decide which documents need rescanning.
    pub files: FxHashMap<String, u64>,
    pub version: u32,
}

impl CacheFile {
    /// Build a record stamped with the current format version.
    pub fn new(cache: Cache, files: FxHashMap<String, u64>) -> Self {
        Self {
            cache,
            files,
            version: CACHE_FILE_VERSION,
        }
    }

    /// Whether the record was written by the current format version.
    pub fn is_current(&self) -> bool {
        self.version == CACHE_FILE_VERSION
    }

    /// Extract the cache, enforcing the version guard: a record from any
    /// other version is discarded wholesale and replaced by the canonical
    /// empty cache. There is no partial migration.
    pub fn into_cache(self) -> Cache {
        if self.is_current() {
            self.cache
        } else {
            tracing::warn!(
                found = self.version,
                expected = CACHE_FILE_VERSION,
                "discarding persisted cache with incompatible version"
            );
            Cache::default()
        }
    }
}
