use datapack::cache::visibility::{NoIdentities, VisibilityDefault, VisibilityTier};
use datapack::cache::{Cache, CacheType, RuleTarget, SymbolPosition, VisibilityRule};
use datapack::ide::{completions, visible_declarations};
use datapack::{CharRange, ResourceLocation};

fn default_public() -> VisibilityDefault {
    VisibilityDefault::Tier(VisibilityTier::Public)
}

#[test]
fn test_snapshot_is_an_independent_copy() {
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::Function, "a:x")
        .declarations
        .push(SymbolPosition::new(CharRange::new(0, 3)));
    let before = cache.clone();

    let requester = ResourceLocation::new("b", "y");
    let mut view = visible_declarations(
        &cache,
        CacheType::Function,
        &requester,
        &default_public(),
        &NoIdentities,
    );

    // Mutating the view must not reach back into the source cache.
    view.unit_mut(CacheType::Function, "a:x")
        .declarations
        .push(SymbolPosition::new(CharRange::new(50, 60)));
    view.unit_mut(CacheType::Function, "a:new")
        .definitions
        .push(SymbolPosition::new(CharRange::new(0, 1)));

    assert_eq!(cache, before);
}

#[test]
fn test_snapshot_excludes_reference_only_units() {
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::Function, "a:referenced")
        .references
        .push(SymbolPosition::new(CharRange::new(0, 3)));
    cache
        .unit_mut(CacheType::Function, "a:declared")
        .declarations
        .push(SymbolPosition::new(CharRange::new(10, 13)));

    let requester = ResourceLocation::new("b", "y");
    let view = visible_declarations(
        &cache,
        CacheType::Function,
        &requester,
        &default_public(),
        &NoIdentities,
    );

    assert!(view.unit(CacheType::Function, "a:referenced").is_none());
    let declared = view.unit(CacheType::Function, "a:declared").unwrap();
    assert_eq!(declared.declarations.len(), 1);
    assert!(declared.references.is_empty());
}

#[test]
fn test_snapshot_filters_invisible_positions_and_drops_empty_categories() {
    let mut cache = Cache::new();
    let private_rule = vec![VisibilityRule::new(
        "a:x",
        RuleTarget::Category(CacheType::Function),
    )];
    cache.unit_mut(CacheType::Function, "a:x").declarations.push(
        SymbolPosition::new(CharRange::new(0, 3)).with_visibility(private_rule),
    );

    let stranger = ResourceLocation::new("b", "y");
    let view = visible_declarations(
        &cache,
        CacheType::Function,
        &stranger,
        &default_public(),
        &NoIdentities,
    );
    assert!(view.is_empty());

    let owner = ResourceLocation::new("a", "x");
    let view = visible_declarations(
        &cache,
        CacheType::Function,
        &owner,
        &default_public(),
        &NoIdentities,
    );
    assert!(view.unit(CacheType::Function, "a:x").is_some());
}

#[test]
fn test_completions_list_labels_ranges_and_docs() {
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::Function, "minecraft:foo")
        .declarations
        .push(SymbolPosition::new(CharRange::new(0, 3)));
    let documented = cache.unit_mut(CacheType::Function, "mypack:bar");
    documented
        .declarations
        .push(SymbolPosition::new(CharRange::new(10, 13)));
    documented.doc = Some("Does the thing.".to_string());

    let items = completions(&cache, CacheType::Function, 40, 45);
    assert_eq!(items.len(), 2);
    // Insertion order is preserved.
    assert_eq!(&*items[0].label, "minecraft:foo");
    assert_eq!(&*items[1].label, "mypack:bar");
    assert_eq!(items[0].range, CharRange::new(40, 45));
    assert!(items[0].documentation.is_none());
    assert_eq!(items[1].documentation.as_deref(), Some("Does the thing."));
}

#[test]
fn test_completions_never_surface_internal_types() {
    let mut cache = Cache::new();
    for ty in [
        CacheType::AliasEntity,
        CacheType::AliasUuid,
        CacheType::AliasVector,
        CacheType::Color,
    ] {
        cache
            .unit_mut(ty, "minecraft:hidden")
            .declarations
            .push(SymbolPosition::new(CharRange::new(0, 3)));
        assert!(completions(&cache, ty, 0, 0).is_empty(), "{ty}");
    }

    // A doc-only unit still completes: it exists, it just has no positions
    // yet.
    cache.unit_mut(CacheType::Bossbar, "minecraft:bar").doc = Some("hp".to_string());
    assert_eq!(completions(&cache, CacheType::Bossbar, 0, 0).len(), 1);
}
