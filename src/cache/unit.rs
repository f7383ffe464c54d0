//! Per-identifier cache units.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cache::position::{PositionKind, SymbolPosition};

/// One category: identifier string (full `namespace:path` form) → unit.
/// Insertion order is preserved and is part of the query contract.
pub type CacheCategory = IndexMap<String, CacheUnit>;

/// Everything the cache knows about one identifier within one category:
/// its declaring, defining, and usage positions, plus optional free-text
/// documentation.
///
/// A unit whose three sequences are all empty is garbage and is collected
/// by [`Cache::trim`](crate::cache::Cache::trim) — including doc-only
/// units, whose documentation is treated as transient.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheUnit {
    /// Declaring occurrences.
    #[serde(default, rename = "dcl", skip_serializing_if = "Vec::is_empty")]
    pub declarations: Vec<SymbolPosition>,
    /// Defining occurrences.
    #[serde(default, rename = "def", skip_serializing_if = "Vec::is_empty")]
    pub definitions: Vec<SymbolPosition>,
    /// Usage occurrences.
    #[serde(default, rename = "ref", skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<SymbolPosition>,
    /// Free-text documentation for the identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl CacheUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self, kind: PositionKind) -> &[SymbolPosition] {
        match kind {
            PositionKind::Declaration => &self.declarations,
            PositionKind::Definition => &self.definitions,
            PositionKind::Reference => &self.references,
        }
    }

    pub fn positions_mut(&mut self, kind: PositionKind) -> &mut Vec<SymbolPosition> {
        match kind {
            PositionKind::Declaration => &mut self.declarations,
            PositionKind::Definition => &mut self.definitions,
            PositionKind::Reference => &mut self.references,
        }
    }

    /// Whether any of the three sequences holds a position.
    pub fn has_positions(&self) -> bool {
        !self.declarations.is_empty() || !self.definitions.is_empty() || !self.references.is_empty()
    }

    /// Whether the unit carries a non-empty documentation string.
    pub fn has_doc(&self) -> bool {
        self.doc.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Fully empty: no positions in any sequence and no documentation.
    /// Such units do not participate in merging.
    pub fn is_empty(&self) -> bool {
        !self.has_positions() && !self.has_doc()
    }

    /// Total number of positions across the three sequences.
    pub fn position_count(&self) -> usize {
        self.declarations.len() + self.definitions.len() + self.references.len()
    }
}
