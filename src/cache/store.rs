//! The nested position store.
//!
//! Three levels of insertion-order-preserving maps: type → category →
//! unit. One [`Cache`] instance is the process-wide shared state for a
//! language-tool session; document-local caches produced by the binder use
//! the same shape and are folded in by [`Cache::merge`](crate::cache::Cache::merge).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cache::position::{PositionKind, SymbolPosition};
use crate::cache::types::CacheType;
use crate::cache::unit::{CacheCategory, CacheUnit};

/// The shared symbol cache: category type → identifier → unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cache {
    categories: IndexMap<CacheType, CacheCategory>,
}

/// Result of a point query: the identifier found under an offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolHit<'a> {
    pub ty: CacheType,
    /// Full `namespace:path` identity string.
    pub id: &'a str,
    pub kind: PositionKind,
    pub position: &'a SymbolPosition,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, ty: CacheType) -> Option<&CacheCategory> {
        self.categories.get(&ty)
    }

    /// Fetch-or-create the category for a type.
    pub fn category_mut(&mut self, ty: CacheType) -> &mut CacheCategory {
        self.categories.entry(ty).or_default()
    }

    pub(crate) fn category_get_mut(&mut self, ty: CacheType) -> Option<&mut CacheCategory> {
        self.categories.get_mut(&ty)
    }

    /// Iterate the units of a category; empty when the category is absent.
    pub fn units(&self, ty: CacheType) -> impl Iterator<Item = (&str, &CacheUnit)> {
        self.categories
            .get(&ty)
            .into_iter()
            .flat_map(|category| category.iter().map(|(id, unit)| (id.as_str(), unit)))
    }

    pub fn unit(&self, ty: CacheType, id: &str) -> Option<&CacheUnit> {
        self.categories.get(&ty)?.get(id)
    }

    /// Fetch-or-create a unit, seeding an empty one when absent.
    pub fn unit_mut(&mut self, ty: CacheType, id: impl Into<String>) -> &mut CacheUnit {
        self.category_mut(ty).entry(id.into()).or_default()
    }

    /// Iterate all categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CacheType, &CacheCategory)> {
        self.categories.iter().map(|(ty, category)| (*ty, category))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (CacheType, &mut CacheCategory)> {
        self.categories
            .iter_mut()
            .map(|(ty, category)| (*ty, category))
    }

    pub(crate) fn insert_category(&mut self, ty: CacheType, category: CacheCategory) {
        self.categories.insert(ty, category);
    }

    pub(crate) fn retain_categories(
        &mut self,
        keep: impl FnMut(&CacheType, &mut CacheCategory) -> bool,
    ) {
        self.categories.retain(keep);
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of positions across every unit.
    pub fn position_count(&self) -> usize {
        self.iter()
            .flat_map(|(_, category)| category.values())
            .map(CacheUnit::position_count)
            .sum()
    }

    /// Find the identifier under an offset.
    ///
    /// Scans types, then identifiers, then declarations / definitions /
    /// references, all in insertion order, and returns the first position
    /// whose range contains the offset *inclusive of both endpoints*.
    ///
    /// The first-found tie-break for overlapping ranges is a behavioral
    /// commitment: stable and deterministic, but not smallest-range-wins.
    /// This is the hot path behind "what is under the cursor".
    pub fn symbol_at(&self, offset: usize) -> Option<SymbolHit<'_>> {
        for (ty, category) in self.iter() {
            for (id, unit) in category {
                for kind in PositionKind::ALL {
                    for position in unit.positions(kind) {
                        if position.range.contains_inclusive(offset) {
                            return Some(SymbolHit {
                                ty,
                                id,
                                kind,
                                position,
                            });
                        }
                    }
                }
            }
        }
        None
    }
}
