//! Completion suggestions over one cache category.

use std::sync::Arc;

use crate::base::CharRange;
use crate::cache::{Cache, CacheType};

/// A completion suggestion: an identifier label plus the range it replaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The identifier's full `namespace:path` string.
    pub label: Arc<str>,
    /// The insertion range the suggestion replaces.
    pub range: CharRange,
    /// Rendered documentation (shown in popup), when the unit has any.
    pub documentation: Option<Arc<str>>,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, range: CharRange) -> Self {
        Self {
            label: label.into(),
            range,
            documentation: None,
        }
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }
}

/// List every identifier under a type as a label + range suggestion.
///
/// Internal types (aliases, color bookkeeping) are never surfaced and
/// yield no items. No visibility filtering is applied here — callers that
/// need visibility-scoped completions compose this with
/// [`visible_declarations`](crate::ide::visible_declarations) first.
pub fn completions(
    cache: &Cache,
    ty: CacheType,
    insertion_start: usize,
    insertion_end: usize,
) -> Vec<CompletionItem> {
    if ty.is_internal_type() {
        return Vec::new();
    }
    let range = CharRange::new(insertion_start, insertion_end);
    cache
        .units(ty)
        .map(|(id, unit)| {
            let mut item = CompletionItem::new(id, range);
            if let Some(doc) = unit.doc.as_deref() {
                item = item.with_documentation(doc);
            }
            item
        })
        .collect()
}
