//! Visibility-scoped cache snapshots.

use crate::base::ResourceLocation;
use crate::cache::visibility::{IdentityProvider, VisibilityDefault, is_visible_to};
use crate::cache::{Cache, CacheCategory, CacheType, CacheUnit, SymbolPosition};

/// Produce a deep, independent copy of the cache filtered to the
/// declarations and definitions visible to the requesting identity.
///
/// References are excluded — this view answers "what exists / what can I
/// jump to", not "who references me". Units left with nothing visible are
/// dropped, then empty categories. The input cache is never mutated, and
/// the copy shares no storage with it, so the result stays stable across
/// suspension points and can be handed to features (like completion) that
/// must not leak private symbols into the requester's file.
pub fn visible_declarations(
    cache: &Cache,
    requesting_type: CacheType,
    requesting_id: &ResourceLocation,
    default: &VisibilityDefault,
    identities: &dyn IdentityProvider,
) -> Cache {
    let requesting_id = requesting_id.to_full_string();
    let mut snapshot = Cache::new();
    for (ty, category) in cache.iter() {
        let mut filtered_category = CacheCategory::new();
        for (id, unit) in category {
            let mut filtered = CacheUnit {
                doc: unit.doc.clone(),
                ..CacheUnit::new()
            };
            let visible = |positions: &[SymbolPosition]| {
                positions
                    .iter()
                    .filter(|position| {
                        is_visible_to(
                            &position.visibility,
                            requesting_type,
                            &requesting_id,
                            position.doc.as_deref(),
                            default,
                            identities,
                        )
                    })
                    .cloned()
                    .collect::<Vec<_>>()
            };
            filtered.declarations = visible(&unit.declarations);
            filtered.definitions = visible(&unit.definitions);
            if filtered.has_positions() {
                filtered_category.insert(id.clone(), filtered);
            }
        }
        if !filtered_category.is_empty() {
            snapshot.insert_category(ty, filtered_category);
        }
    }
    snapshot
}
