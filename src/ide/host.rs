//! CacheHost — unified state management around the shared cache.
//!
//! The `CacheHost` owns the one shared [`Cache`] plus the per-document
//! bookkeeping the document lifecycle needs, and wires the cache
//! primitives to that lifecycle: open → merge, edit → remap, close →
//! remove + trim.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = CacheHost::new(VisibilityDefault::Tier(VisibilityTier::Public));
//!
//! // A document was parsed and bound into a local cache.
//! host.open_document(uri, CacheType::Function, id, &local_cache, &line_index);
//!
//! // Serve queries.
//! let hit = host.symbol_at(offset);
//! let view = host.snapshot_for(CacheType::Function, &requesting_id);
//! ```
//!
//! All mutations execute to completion synchronously and never suspend
//! mid-mutation, so an interleaved query can never observe a half-merged
//! cache. A threaded embedding should hold one exclusive lock around the
//! whole host for the same reason; finer-grained locking would not prevent
//! the half-merged-state hazard.

use rustc_hash::FxHashMap;

use crate::base::{LineIndex, ResourceLocation};
use crate::cache::visibility::{IdentityProvider, VisibilityDefault};
use crate::cache::{
    Cache, CacheError, CacheFile, CacheType, IndexMapping, PositionStamp, SymbolHit,
};
use crate::ide::completion::{CompletionItem, completions};
use crate::ide::snapshot::visible_declarations;

/// Owns the shared cache and per-document session state.
pub struct CacheHost {
    cache: Cache,
    /// Change counter per open-or-seen document.
    document_versions: FxHashMap<String, u64>,
    /// Declared identity and category per document, fed to visibility
    /// fallback resolution.
    document_identities: FxHashMap<String, (CacheType, ResourceLocation)>,
    /// Fallback policy for positions with no recorded visibility rules.
    default_visibility: VisibilityDefault,
}

impl CacheHost {
    pub fn new(default_visibility: VisibilityDefault) -> Self {
        Self {
            cache: Cache::new(),
            document_versions: FxHashMap::default(),
            document_identities: FxHashMap::default(),
            default_visibility,
        }
    }

    /// Restore a host from a persisted record. The version guard applies:
    /// an incompatible record yields an empty host.
    pub fn from_cache_file(file: CacheFile, default_visibility: VisibilityDefault) -> Self {
        let mut host = Self::new(default_visibility);
        if file.is_current() {
            host.document_versions = file.files.clone();
        }
        host.cache = file.into_cache();
        host
    }

    /// Snapshot the host into a persisted record.
    pub fn to_cache_file(&self) -> CacheFile {
        CacheFile::new(self.cache.clone(), self.document_versions.clone())
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn default_visibility(&self) -> &VisibilityDefault {
        &self.default_visibility
    }

    pub fn document_version(&self, uri: &str) -> Option<u64> {
        self.document_versions.get(uri).copied()
    }

    /// Fold a freshly computed document-local cache into the shared cache.
    ///
    /// Registers the document's declared identity (for visibility
    /// fallback), bumps its change counter, and stamps every merged
    /// position with the document URI and line/column pairs resolved
    /// through `lines`.
    pub fn open_document(
        &mut self,
        uri: &str,
        ty: CacheType,
        id: ResourceLocation,
        local: &Cache,
        lines: &LineIndex,
    ) {
        self.document_identities.insert(uri.to_string(), (ty, id));
        *self.document_versions.entry(uri.to_string()).or_insert(0) += 1;
        let stamp = PositionStamp { doc: uri, lines };
        self.cache.merge(local, Some(&stamp));
    }

    /// Shift the document's cached positions across an incremental edit.
    ///
    /// Must run before any subsequent point query against the document,
    /// or stale ranges will misreport what is under the cursor.
    pub fn apply_edit(
        &mut self,
        uri: &str,
        mapping: &IndexMapping,
        lines: &LineIndex,
    ) -> Result<(), CacheError> {
        *self.document_versions.entry(uri.to_string()).or_insert(0) += 1;
        self.cache.remap_document(uri, mapping, lines)
    }

    /// Drop every position owned by the document, collect emptied units,
    /// and forget the document's session state.
    pub fn close_document(&mut self, uri: &str) {
        self.cache.remove_document(uri);
        self.cache.trim();
        self.document_versions.remove(uri);
        self.document_identities.remove(uri);
    }

    /// Delete an identifier entry outright (undeclared or renamed away).
    pub fn remove_identifier(&mut self, ty: CacheType, id: &str) {
        self.cache.remove_unit(ty, id);
    }

    /// Point lookup: what identifier is under this offset?
    pub fn symbol_at(&self, offset: usize) -> Option<SymbolHit<'_>> {
        self.cache.symbol_at(offset)
    }

    /// Deep visibility-scoped copy of the declarations and definitions
    /// the requesting identity may see.
    pub fn snapshot_for(&self, requesting_type: CacheType, requesting_id: &ResourceLocation) -> Cache {
        visible_declarations(
            &self.cache,
            requesting_type,
            requesting_id,
            &self.default_visibility,
            self,
        )
    }

    /// Unscoped completion listing for a category.
    pub fn completions_for(
        &self,
        ty: CacheType,
        insertion_start: usize,
        insertion_end: usize,
    ) -> Vec<CompletionItem> {
        completions(&self.cache, ty, insertion_start, insertion_end)
    }
}

impl IdentityProvider for CacheHost {
    fn declared_identity(&self, doc: &str) -> Option<(CacheType, ResourceLocation)> {
        self.document_identities.get(doc).cloned()
    }
}
