//! Cached positions and the three kinds of recorded occurrence.

use serde::{Deserialize, Serialize};

use crate::base::{CharRange, Position};
use crate::cache::visibility::VisibilityRule;
use crate::cache::CacheError;

/// The three kinds of position a unit records for an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionKind {
    /// The declaring occurrence.
    Declaration,
    /// The defining occurrence, when distinct from the declaration.
    Definition,
    /// A usage occurrence.
    Reference,
}

impl PositionKind {
    /// All kinds, in scan order.
    pub const ALL: [PositionKind; 3] = [Self::Declaration, Self::Definition, Self::Reference];
}

/// One recorded occurrence of an identifier.
///
/// A position starts life in a document-local cache with only its range
/// set, relative to that document's text. Merging into the shared cache
/// stamps it with the owning document URI and denormalized line/column
/// pairs (see [`PositionStamp`](crate::cache::PositionStamp)).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPosition {
    /// Absolute identifier of the owning document, set when the position is
    /// folded into the shared cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Half-open offset range of the occurrence.
    pub range: CharRange,
    /// The enclosing block this position is valid within, for local-only
    /// references. Must contain `range`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<CharRange>,
    /// Recorded visibility rules. Empty means no rule was recorded and
    /// resolution falls back to the configured default policy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visibility: Vec<VisibilityRule>,
    /// Denormalized line/column of `range.start`, cached at stamping time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pos: Option<Position>,
    /// Denormalized line/column of `range.end`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pos: Option<Position>,
}

impl SymbolPosition {
    pub fn new(range: CharRange) -> Self {
        Self {
            doc: None,
            range,
            scope: None,
            visibility: Vec::new(),
            start_pos: None,
            end_pos: None,
        }
    }

    /// Set the enclosing scope range.
    pub fn with_scope(mut self, scope: CharRange) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the recorded visibility rules.
    pub fn with_visibility(mut self, rules: Vec<VisibilityRule>) -> Self {
        self.visibility = rules;
        self
    }

    /// Check the structural invariants: `start <= end`, and the scope (if
    /// present) contains the position's own range.
    pub fn validate(&self) -> Result<(), CacheError> {
        if self.range.start > self.range.end {
            return Err(CacheError::InvalidRange {
                start: self.range.start,
                end: self.range.end,
            });
        }
        if let Some(scope) = &self.scope {
            if !scope.contains_range(&self.range) {
                return Err(CacheError::ScopeOutsideRange {
                    scope_start: scope.start,
                    scope_end: scope.end,
                    start: self.range.start,
                    end: self.range.end,
                });
            }
        }
        Ok(())
    }
}
