//! # datapack-base
//!
//! Core library for datapack tooling: the symbol cache, visibility-scoped
//! resolution, and the read-side queries behind editor features.
//!
//! The text/grammar parsers, the editor-protocol transport, and cache-file
//! persistence are external collaborators: the binder supplies
//! document-local caches (same shape as the shared one) and an
//! offset → line/column resolver; configuration supplies the default
//! visibility policy; the document registry supplies declared document
//! identities for visibility fallback.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → read-side features (point lookup, scoped snapshot, completion)
//!   ↓
//! cache     → cache store and algorithms (merge, remap, trim, visibility)
//!   ↓
//! base      → primitives (ResourceLocation, CharRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → cache → ide)
// ============================================================================

/// Foundation types: ResourceLocation, CharRange, Position, LineIndex
pub mod base;

/// The symbol cache: type registry, position store, merger, remapper,
/// visibility resolver, persisted-form shape
pub mod cache;

/// Editor-facing queries: completion, visibility-scoped snapshots, the
/// CacheHost session object
pub mod ide;

// Re-export foundation types
pub use base::{CharRange, DEFAULT_NAMESPACE, LineIndex, Position, ResourceLocation};

// Re-export the cache surface
pub use cache::{
    CACHE_FILE_VERSION, Cache, CacheError, CacheFile, CacheType, CacheUnit, IndexMapping,
    PositionKind, PositionStamp, SymbolPosition, VisibilityDefault, VisibilityRule, VisibilityTier,
};
