//! Keeping cached positions valid across edits and document lifecycle.
//!
//! After an incremental edit, cached offsets refer to pre-edit text. An
//! [`IndexMapping`] — the ordered edit deltas of that edit batch —
//! translates old offsets to their post-edit positions without reparsing.
//! Remapping must run before any subsequent point query on the affected
//! positions, or stale ranges will misreport what is under the cursor.
//!
//! Document close and identifier removal are separate, composable
//! operations: [`Cache::remove_document`] drops positions but never units;
//! [`Cache::trim`] collects the emptied units afterwards.

use serde::{Deserialize, Serialize};

use crate::base::{CharRange, LineIndex};
use crate::cache::error::CacheError;
use crate::cache::position::{PositionKind, SymbolPosition};
use crate::cache::store::Cache;
use crate::cache::types::CacheType;
use crate::cache::unit::CacheUnit;

/// One edit: the original `[start, end)` span and the signed change in
/// length of the text that replaced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDelta {
    pub range: CharRange,
    pub delta: i64,
}

impl EditDelta {
    pub fn new(range: CharRange, delta: i64) -> Self {
        Self { range, delta }
    }

    /// Length of the replacement text.
    fn new_len(&self) -> i64 {
        self.range.len() as i64 + self.delta
    }
}

/// An ordered sequence of edit deltas from one edit batch.
///
/// Entries must be sorted by start offset and non-overlapping, and no
/// entry may shrink its span below zero length. [`IndexMapping::validate`]
/// enforces this at the boundary; the translation itself assumes it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMapping {
    entries: Vec<EditDelta>,
}

impl IndexMapping {
    /// Build a mapping, validating the entries.
    pub fn new(entries: Vec<EditDelta>) -> Result<Self, CacheError> {
        let mapping = Self { entries };
        mapping.validate()?;
        Ok(mapping)
    }

    pub fn entries(&self) -> &[EditDelta] {
        &self.entries
    }

    pub fn validate(&self) -> Result<(), CacheError> {
        let mut previous_end = 0usize;
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.range.start > entry.range.end {
                return Err(CacheError::InvalidRange {
                    start: entry.range.start,
                    end: entry.range.end,
                });
            }
            if entry.new_len() < 0 {
                return Err(CacheError::NegativeSpanLength {
                    start: entry.range.start,
                    end: entry.range.end,
                    delta: entry.delta,
                });
            }
            if i > 0 && entry.range.start < previous_end {
                return Err(CacheError::UnorderedMapping {
                    start: entry.range.start,
                });
            }
            previous_end = entry.range.end;
        }
        Ok(())
    }

    /// Translate a pre-edit offset to its post-edit offset.
    ///
    /// Offsets past an edited span shift by that span's delta; offsets
    /// inside an edited span are clamped to the span's new extent (the
    /// identifier under edit keeps a usable, if approximate, range until
    /// the next reparse replaces it).
    pub fn map_offset(&self, offset: usize) -> Result<usize, CacheError> {
        let mut shift: i64 = 0;
        for entry in &self.entries {
            if entry.range.end <= offset {
                shift += entry.delta;
            } else if entry.range.start <= offset {
                let within = ((offset - entry.range.start) as i64).min(entry.new_len());
                let mapped = entry.range.start as i64 + shift + within;
                return usize::try_from(mapped)
                    .map_err(|_| CacheError::OffsetUnderflow { offset, shift });
            } else {
                break;
            }
        }
        usize::try_from(offset as i64 + shift)
            .map_err(|_| CacheError::OffsetUnderflow { offset, shift })
    }

    fn map_range(&self, range: CharRange) -> Result<CharRange, CacheError> {
        CharRange::try_new(self.map_offset(range.start)?, self.map_offset(range.end)?)
    }
}

impl Cache {
    /// Remap every position in every unit's three sequences through the
    /// mapping, and recompute denormalized line/columns from the post-edit
    /// `lines`.
    ///
    /// Applies to the whole cache; intended for a single document's cache.
    /// For the multi-document shared cache use
    /// [`remap_document`](Cache::remap_document).
    ///
    /// The mapping is validated up front, so a malformed mapping leaves the
    /// cache untouched.
    pub fn remap(&mut self, mapping: &IndexMapping, lines: &LineIndex) -> Result<(), CacheError> {
        self.remap_filtered(mapping, lines, |_| true)
    }

    /// Remap only the positions stamped with `doc`.
    pub fn remap_document(
        &mut self,
        doc: &str,
        mapping: &IndexMapping,
        lines: &LineIndex,
    ) -> Result<(), CacheError> {
        self.remap_filtered(mapping, lines, |position| {
            position.doc.as_deref() == Some(doc)
        })
    }

    fn remap_filtered(
        &mut self,
        mapping: &IndexMapping,
        lines: &LineIndex,
        mut applies: impl FnMut(&SymbolPosition) -> bool,
    ) -> Result<(), CacheError> {
        mapping.validate()?;
        for (_, category) in self.iter_mut() {
            for unit in category.values_mut() {
                for kind in PositionKind::ALL {
                    for position in unit.positions_mut(kind) {
                        if !applies(position) {
                            continue;
                        }
                        position.range = mapping.map_range(position.range)?;
                        if let Some(scope) = position.scope {
                            position.scope = Some(mapping.map_range(scope)?);
                        }
                        position.start_pos = Some(lines.position(position.range.start));
                        position.end_pos = Some(lines.position(position.range.end));
                    }
                }
            }
        }
        Ok(())
    }

    /// Drop every position stamped with the given document identifier.
    ///
    /// Units are kept even when emptied; run [`trim`](Cache::trim)
    /// afterwards to collect them.
    pub fn remove_document(&mut self, doc: &str) {
        for (_, category) in self.iter_mut() {
            for unit in category.values_mut() {
                for kind in PositionKind::ALL {
                    unit.positions_mut(kind)
                        .retain(|position| position.doc.as_deref() != Some(doc));
                }
            }
        }
    }

    /// Delete an identifier entry outright. Used when an identifier is
    /// deliberately undeclared or renamed away, not merely when its
    /// document changes.
    pub fn remove_unit(&mut self, ty: CacheType, id: &str) -> Option<CacheUnit> {
        self.category_get_mut(ty)?.shift_remove(id)
    }

    /// Collect garbage: drop every unit whose three position sequences are
    /// all empty (documentation alone does not keep a unit alive), then
    /// drop every category left empty. Idempotent.
    pub fn trim(&mut self) {
        self.retain_categories(|_, category| {
            category.retain(|_, unit| unit.has_positions());
            !category.is_empty()
        });
    }
}
