//! Load-order encoder and key resolution integration tests.
//!
//! Property tests check the permutation law of the encoder and the
//! idempotence of key resolution for arbitrary input.

use std::collections::BTreeSet;

use joker_forge::core::{ExportError, OrderingViolation, ValidationError};
use joker_forge::keys::{resolve_key, resolve_object_key};
use joker_forge::ordering::{loader_snippet, LoadOrderEncoder, LoadOrderEntry, LoadOrderIndex};
use joker_forge::rules::GameObjectData;
use joker_forge::ObjectType;
use proptest::prelude::*;

fn entries(objects: &[GameObjectData]) -> Vec<LoadOrderEntry> {
    objects.iter().map(LoadOrderEntry::from).collect()
}

// =============================================================================
// Encoder
// =============================================================================

#[test]
fn test_fruit_order() {
    let objects = [
        GameObjectData::new("apple", 20),
        GameObjectData::new("banana", 30),
        GameObjectData::new("cherry", 10),
    ];
    let index = LoadOrderEncoder::new().encode(&entries(&objects)).unwrap();
    assert_eq!(index.values(), &[3, 1, 2]);

    let listing = LoadOrderEncoder::new().listing(&entries(&objects));
    let loaded: Vec<&String> = index.apply(&listing).unwrap();
    assert_eq!(loaded, vec!["cherry.lua", "apple.lua", "banana.lua"]);
}

#[test]
fn test_input_order_does_not_matter() {
    let forward = [GameObjectData::new("a", 2), GameObjectData::new("b", 1)];
    let backward = [GameObjectData::new("b", 1), GameObjectData::new("a", 2)];
    let encoder = LoadOrderEncoder::new();
    assert_eq!(
        encoder.encode(&entries(&forward)).unwrap(),
        encoder.encode(&entries(&backward)).unwrap()
    );
}

#[test]
fn test_shared_file_before_every_object() {
    let objects = [GameObjectData::new("b", 2), GameObjectData::new("c", 1)];
    let encoder = LoadOrderEncoder::new().with_synthetic_file("_pools.lua");
    let index = encoder.encode(&entries(&objects)).unwrap();
    assert_eq!(index.skipped(), Some(1));
    assert_eq!(index.values(), &[3, 2]);
}

#[test]
fn test_shared_file_after_every_object() {
    let objects = [GameObjectData::new("b", 2), GameObjectData::new("c", 1)];
    let encoder = LoadOrderEncoder::new().with_synthetic_file("zz_pools.lua");
    let index = encoder.encode(&entries(&objects)).unwrap();
    assert_eq!(index.skipped(), Some(3));
    assert_eq!(index.values(), &[2, 1]);
}

#[test]
fn test_colliding_file_names_rejected() {
    let objects = [GameObjectData::new("same", 0), GameObjectData::new("same", 1)];
    assert_eq!(
        LoadOrderEncoder::new().encode(&entries(&objects)),
        Err(ExportError::Validation(ValidationError::DuplicateFileName("same.lua".to_string())))
    );
}

#[test]
fn test_corrupt_index_is_never_applied() {
    let listing = ["a.lua", "b.lua", "c.lua"];
    let index = LoadOrderIndex::new(vec![1, 3], Some(2)).unwrap();
    assert_eq!(index.apply(&listing).unwrap(), vec![&"a.lua", &"c.lua"]);

    assert_eq!(
        LoadOrderIndex::new(vec![2, 2, 1], None),
        Err(OrderingViolation::Duplicate(2))
    );
    assert_eq!(
        LoadOrderIndex::new(vec![1, 4], None),
        Err(OrderingViolation::OutOfRange { value: 4, max: 2 })
    );
}

#[test]
fn test_loader_embeds_index() {
    let index = LoadOrderIndex::new(vec![3, 1, 2], None).unwrap();
    let snippet = loader_snippet(ObjectType::Consumable.directory(), &index);
    assert!(snippet.contains("local consumables_order = { 3, 1, 2 }"));
    assert!(snippet.contains("for _, index in ipairs(consumables_order) do"));
}

// =============================================================================
// Key resolution
// =============================================================================

#[test]
fn test_resolve_key_examples() {
    assert_eq!(resolve_key("joker", "mymod", "j"), "j_mymod_joker");
    assert_eq!(resolve_key("j_mymod_joker", "mymod", "j"), "j_mymod_joker");
    assert_eq!(resolve_key("j_other_joker", "mymod", "j"), "j_other_joker");
    assert_eq!(resolve_object_key("wax", "mymod", ObjectType::Seal), "mymod_wax");
    assert_eq!(resolve_object_key("mymod_wax", "mymod", ObjectType::Seal), "mymod_wax");
}

// =============================================================================
// Properties
// =============================================================================

fn distinct_objects() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,8}", 0..12).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let len = names.len();
        (
            Just(names),
            Just((0..len as i64).collect::<Vec<_>>()).prop_shuffle(),
        )
            .prop_map(|(names, orders)| names.into_iter().zip(orders).collect::<Vec<_>>())
    })
}

proptest! {
    #[test]
    fn encoded_index_is_a_permutation(objects in distinct_objects()) {
        let entries: Vec<LoadOrderEntry> = objects
            .iter()
            .map(|(name, order)| LoadOrderEntry::new(format!("{name}.lua"), *order))
            .collect();
        let encoder = LoadOrderEncoder::new();
        let index = encoder.encode(&entries).unwrap();

        let values: BTreeSet<usize> = index.values().iter().copied().collect();
        prop_assert_eq!(values, (1..=entries.len()).collect::<BTreeSet<_>>());

        let listing = encoder.listing(&entries);
        let loaded: Vec<String> = index.apply(&listing).unwrap().into_iter().cloned().collect();
        let mut expected = entries.clone();
        expected.sort_by_key(|entry| entry.order_value);
        let expected: Vec<String> = expected.into_iter().map(|entry| entry.file_name).collect();
        prop_assert_eq!(loaded, expected);
    }

    #[test]
    fn synthetic_file_is_never_loaded(
        objects in distinct_objects(),
        synthetic in "[a-z][a-z0-9_]{0,8}_shared",
    ) {
        let entries: Vec<LoadOrderEntry> = objects
            .iter()
            .map(|(name, order)| LoadOrderEntry::new(format!("{name}.lua"), *order))
            .collect();
        let synthetic = format!("{synthetic}.lua");
        prop_assume!(entries.iter().all(|entry| entry.file_name != synthetic));

        let encoder = LoadOrderEncoder::new().with_synthetic_file(synthetic.clone());
        let index = encoder.encode(&entries).unwrap();
        let listing = encoder.listing(&entries);
        prop_assert_eq!(listing.len(), entries.len() + 1);

        let loaded = index.apply(&listing).unwrap();
        prop_assert!(loaded.iter().all(|name| **name != synthetic));
        prop_assert_eq!(loaded.len(), entries.len());
    }

    #[test]
    fn resolve_key_is_idempotent(
        raw in "[a-z_]{0,12}",
        prefix in "[a-z]{1,6}",
        kind in prop::sample::select(vec!["j", "c", "m", "e", "v"]),
    ) {
        let once = resolve_key(&raw, &prefix, kind);
        prop_assert_eq!(resolve_key(&once, &prefix, kind), once.clone());
    }
}
