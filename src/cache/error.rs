//! Error types for cache operations.

use thiserror::Error;

/// Errors raised when a cache operation is handed malformed input.
///
/// These are programmer-input violations: they are rejected at the boundary
/// so the cache's internal invariants are never corrupted. Best-effort
/// resolution gaps (e.g. an unresolvable defining document during
/// visibility fallback) are deliberately *not* errors; they are logged and
/// resolved permissively.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// A range with `start > end`.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: usize, end: usize },

    /// A position whose scope does not contain its own range.
    #[error("scope {scope_start}..{scope_end} does not contain position {start}..{end}")]
    ScopeOutsideRange {
        scope_start: usize,
        scope_end: usize,
        start: usize,
        end: usize,
    },

    /// Index-mapping entries must be sorted by start and non-overlapping.
    #[error("index mapping entry at {start} overlaps or precedes an earlier entry")]
    UnorderedMapping { start: usize },

    /// An edit delta that would shrink its span below zero length.
    #[error("edit delta {delta} shrinks span {start}..{end} below zero length")]
    NegativeSpanLength {
        start: usize,
        end: usize,
        delta: i64,
    },

    /// A remapped offset fell below zero.
    #[error("remapping moved offset {offset} below zero (shift {shift})")]
    OffsetUnderflow { offset: usize, shift: i64 },
}
