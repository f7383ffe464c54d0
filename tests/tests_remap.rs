use datapack::cache::{Cache, CacheType, EditDelta, IndexMapping, SymbolPosition};
use datapack::{CharRange, LineIndex, Position};

fn stamped_position(doc: &str, start: usize, end: usize) -> SymbolPosition {
    let mut position = SymbolPosition::new(CharRange::new(start, end));
    position.doc = Some(doc.to_string());
    position
}

#[test]
fn test_remap_shifts_ranges_and_line_columns() {
    // Before: "run foo"; after inserting "say hi\n" at 0: "say hi\nrun foo".
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::Function, "minecraft:foo")
        .references
        .push(SymbolPosition::new(CharRange::new(4, 7)));

    let mapping = IndexMapping::new(vec![EditDelta::new(CharRange::new(0, 0), 7)]).unwrap();
    let lines = LineIndex::new("say hi\nrun foo");
    cache.remap(&mapping, &lines).unwrap();

    let position = &cache.unit(CacheType::Function, "minecraft:foo").unwrap().references[0];
    assert_eq!(position.range, CharRange::new(11, 14));
    assert_eq!(position.start_pos, Some(Position::new(1, 4)));
    assert_eq!(position.end_pos, Some(Position::new(1, 7)));
}

#[test]
fn test_remap_moves_scope_with_range() {
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::ScoreHolder, "minecraft:holder")
        .references
        .push(
            SymbolPosition::new(CharRange::new(10, 14)).with_scope(CharRange::new(5, 30)),
        );

    let mapping = IndexMapping::new(vec![EditDelta::new(CharRange::new(0, 0), 3)]).unwrap();
    let lines = LineIndex::new("abcdefghijklmnopqrstuvwxyz0123456789");
    cache.remap(&mapping, &lines).unwrap();

    let position = &cache.unit(CacheType::ScoreHolder, "minecraft:holder").unwrap().references[0];
    assert_eq!(position.range, CharRange::new(13, 17));
    assert_eq!(position.scope, Some(CharRange::new(8, 33)));
}

#[test]
fn test_remap_document_leaves_other_documents_alone() {
    let mut cache = Cache::new();
    let unit = cache.unit_mut(CacheType::Function, "minecraft:foo");
    unit.references.push(stamped_position("file:///a", 0, 3));
    unit.references.push(stamped_position("file:///b", 0, 3));

    let mapping = IndexMapping::new(vec![EditDelta::new(CharRange::new(0, 0), 10)]).unwrap();
    let lines = LineIndex::new("0123456789abc");
    cache.remap_document("file:///a", &mapping, &lines).unwrap();

    let unit = cache.unit(CacheType::Function, "minecraft:foo").unwrap();
    assert_eq!(unit.references[0].range, CharRange::new(10, 13));
    assert_eq!(unit.references[1].range, CharRange::new(0, 3));
}

#[test]
fn test_malformed_mapping_leaves_cache_untouched() {
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::Function, "minecraft:foo")
        .references
        .push(SymbolPosition::new(CharRange::new(4, 7)));
    let before = cache.clone();

    // A deserialized mapping bypasses the checked constructor; remap must
    // re-validate at its own boundary and reject without touching anything.
    let overlapping: IndexMapping = serde_json::from_str(
        r#"{"entries":[
            {"range":{"start":0,"end":5},"delta":1},
            {"range":{"start":3,"end":8},"delta":1}
        ]}"#,
    )
    .unwrap();

    let lines = LineIndex::new("whatever text");
    assert!(cache.remap(&overlapping, &lines).is_err());
    assert_eq!(cache, before);
}

#[test]
fn test_remove_document_keeps_units() {
    let mut cache = Cache::new();
    let unit = cache.unit_mut(CacheType::Function, "minecraft:foo");
    unit.references.push(stamped_position("file:///a", 0, 3));
    unit.references.push(stamped_position("file:///b", 5, 8));

    cache.remove_document("file:///a");

    let unit = cache.unit(CacheType::Function, "minecraft:foo").unwrap();
    assert_eq!(unit.references.len(), 1);
    assert_eq!(unit.references[0].doc.as_deref(), Some("file:///b"));

    cache.remove_document("file:///b");
    // Emptied, but still present until trim runs.
    assert!(cache.unit(CacheType::Function, "minecraft:foo").is_some());
}

#[test]
fn test_remove_document_then_trim_leaves_no_trace() {
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::Function, "minecraft:foo")
        .references
        .push(stamped_position("file:///a", 0, 3));
    cache
        .unit_mut(CacheType::Objective, "minecraft:score")
        .declarations
        .push(stamped_position("file:///keep", 0, 5));

    cache.remove_document("file:///a");
    cache.trim();

    assert!(cache.unit(CacheType::Function, "minecraft:foo").is_none());
    assert!(cache.category(CacheType::Function).is_none());
    // Unrelated documents untouched.
    assert!(cache.unit(CacheType::Objective, "minecraft:score").is_some());
    assert_eq!(cache.position_count(), 1);
}

#[test]
fn test_trim_collects_doc_only_units() {
    let mut cache = Cache::new();
    cache.unit_mut(CacheType::Function, "minecraft:documented").doc = Some("docs".to_string());

    cache.trim();

    // Documentation alone does not keep a unit alive.
    assert!(cache.is_empty());
}

#[test]
fn test_trim_is_idempotent() {
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::Function, "minecraft:keep")
        .declarations
        .push(SymbolPosition::new(CharRange::new(0, 4)));
    cache.unit_mut(CacheType::Function, "minecraft:drop");
    cache.unit_mut(CacheType::Bossbar, "minecraft:empty");

    cache.trim();
    let once = cache.clone();
    cache.trim();

    assert_eq!(cache, once);
    assert!(cache.unit(CacheType::Function, "minecraft:keep").is_some());
    assert!(cache.unit(CacheType::Function, "minecraft:drop").is_none());
    assert!(cache.category(CacheType::Bossbar).is_none());
}

#[test]
fn test_remove_unit_deletes_outright() {
    let mut cache = Cache::new();
    cache
        .unit_mut(CacheType::Function, "minecraft:foo")
        .references
        .push(SymbolPosition::new(CharRange::new(0, 3)));

    let removed = cache.remove_unit(CacheType::Function, "minecraft:foo");
    assert!(removed.is_some());
    assert!(cache.unit(CacheType::Function, "minecraft:foo").is_none());

    // Removing an absent unit is a quiet no-op.
    assert!(cache.remove_unit(CacheType::Function, "minecraft:foo").is_none());
}
