//! Folding a document-local cache into the shared cache.

use crate::base::LineIndex;
use crate::cache::position::{PositionKind, SymbolPosition};
use crate::cache::store::Cache;

/// Stamping descriptor applied to every position appended by a merge.
///
/// A document-local cache is built with offsets relative to its own text
/// and no notion of which document it belongs to. The stamp supplies the
/// absolute document identifier and the offset → line/column resolver so
/// positions enter the shared cache with their denormalized coordinates
/// already cached.
pub struct PositionStamp<'a> {
    pub doc: &'a str,
    pub lines: &'a LineIndex,
}

impl PositionStamp<'_> {
    fn apply(&self, position: &mut SymbolPosition) {
        position.doc = Some(self.doc.to_string());
        position.start_pos = Some(self.lines.position(position.range.start));
        position.end_pos = Some(self.lines.position(position.range.end));
    }
}

impl Cache {
    /// Fold `overlay` into this cache.
    ///
    /// Only overlay units with at least one position or a non-empty doc
    /// participate; fully-empty units never overwrite existing state. For
    /// participating units, positions are **appended** per kind — merging
    /// is additive, never destructive — while documentation **replaces**
    /// (last writer wins). With a `stamp`, every appended position gets the
    /// owning document identifier and denormalized line/column pairs.
    ///
    /// The overlay is borrowed immutably and never modified.
    pub fn merge(&mut self, overlay: &Cache, stamp: Option<&PositionStamp<'_>>) {
        for (ty, category) in overlay.iter() {
            for (id, unit) in category {
                if unit.is_empty() {
                    continue;
                }
                let base_unit = self.unit_mut(ty, id.clone());
                for kind in PositionKind::ALL {
                    for position in unit.positions(kind) {
                        let mut position = position.clone();
                        if let Some(stamp) = stamp {
                            stamp.apply(&mut position);
                        }
                        base_unit.positions_mut(kind).push(position);
                    }
                }
                if unit.doc.is_some() {
                    base_unit.doc = unit.doc.clone();
                }
            }
        }
    }
}
