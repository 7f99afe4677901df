//! Ordering Property Tests
//!
//! Bytewise order of encoded keys must follow the logical order of the
//! fields they carry: range scans over a structure depend on it.

use std::cmp::Ordering;

use proptest::prelude::*;

use kvcodec::{CodecConfig, KeyKind, StorageKey};

fn encode(key: &StorageKey) -> Vec<u8> {
    key.encode(&CodecConfig::default())
        .expect("encoding should succeed")
        .to_vec()
}

fn arb_bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max)
}

/// Scores with at most five decimal places and few enough significant
/// digits that scaling by 100000 is exact
fn arb_score() -> impl Strategy<Value = f64> {
    (-1_000_000_000_000_000i64..=1_000_000_000_000_000).prop_map(|n| n as f64 / 100_000.0)
}

// =============================================================================
// Concrete Scenarios
// =============================================================================

#[test]
fn test_negative_score_sorts_before_positive() {
    let low = encode(&StorageKey::zscore("z", "m", -1.5, 3));
    let high = encode(&StorageKey::zscore("z", "m", 2.0, 3));
    assert!(low < high);
}

#[test]
fn test_score_order_across_sign_boundary() {
    let scores = [-1e13, -1e6, -2.5, -1.0, -0.00001, 0.0, 0.00001, 1.0, 2.5, 1e6, 1e13];
    let encoded: Vec<Vec<u8>> = scores
        .iter()
        .map(|&s| encode(&StorageKey::zscore("z", "m", s, 1)))
        .collect();

    for pair in encoded.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn test_tags_partition_key_space() {
    let key = "k";
    let meta = encode(&StorageKey::meta(key));
    let item = encode(&StorageKey::item(key, "f", 1));
    let zscore = encode(&StorageKey::zscore(key, "m", 1.0, 1));
    let list = encode(&StorageKey::list(key, 1, 1));
    let delete = encode(&StorageKey::delete(key, 1));

    assert!(meta.starts_with(&KeyKind::Meta.tag_prefix()));
    assert!(delete.starts_with(&KeyKind::Delete.tag_prefix()));
    for child in [&item, &zscore, &list] {
        assert!(child.starts_with(&KeyKind::Item.tag_prefix()));
        assert_ne!(child, &meta);
        assert_ne!(child, &delete);
        assert!(!child.starts_with(&KeyKind::Meta.tag_prefix()));
        assert!(!child.starts_with(&KeyKind::Delete.tag_prefix()));
    }
    assert_ne!(meta, delete);
}

#[test]
fn test_item_prefix_covers_one_generation() {
    let prefix = StorageKey::item_prefix(b"h", 7).unwrap();

    let current = encode(&StorageKey::item("h", "f", 7));
    let older = encode(&StorageKey::item("h", "f", 6));
    let other_key = encode(&StorageKey::item("hh", "f", 7));

    assert!(current.starts_with(&prefix));
    assert!(!older.starts_with(&prefix));
    assert!(!other_key.starts_with(&prefix));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn item_keys_sort_by_field(
        key in arb_bytes(64),
        version in any::<u16>(),
        f1 in arb_bytes(32),
        f2 in arb_bytes(32),
    ) {
        let e1 = encode(&StorageKey::item(key.clone(), f1.clone(), version));
        let e2 = encode(&StorageKey::item(key, f2.clone(), version));
        prop_assert_eq!(e1.cmp(&e2), f1.cmp(&f2));
    }

    #[test]
    fn zscore_keys_sort_by_score_then_member(
        key in arb_bytes(64),
        version in any::<u16>(),
        s1 in arb_score(),
        s2 in arb_score(),
        m1 in arb_bytes(16),
        m2 in arb_bytes(16),
    ) {
        let e1 = encode(&StorageKey::zscore(key.clone(), m1.clone(), s1, version));
        let e2 = encode(&StorageKey::zscore(key, m2.clone(), s2, version));
        let expected = s1.partial_cmp(&s2).unwrap_or(Ordering::Equal).then(m1.cmp(&m2));
        prop_assert_eq!(e1.cmp(&e2), expected);
    }

    #[test]
    fn list_keys_sort_by_seq(
        key in arb_bytes(64),
        version in any::<u16>(),
        seq1 in any::<u64>(),
        seq2 in any::<u64>(),
    ) {
        let e1 = encode(&StorageKey::list(key.clone(), seq1, version));
        let e2 = encode(&StorageKey::list(key, seq2, version));
        prop_assert_eq!(e1.cmp(&e2), seq1.cmp(&seq2));
    }

    #[test]
    fn item_key_round_trip(key in arb_bytes(128), field in arb_bytes(128), version in any::<u16>()) {
        let item = StorageKey::item(key, field, version);
        let decoded = StorageKey::decode(KeyKind::Item, &encode(&item)).expect("decoding should succeed");
        prop_assert_eq!(decoded, item);
    }

    #[test]
    fn zscore_key_round_trip(
        key in arb_bytes(128),
        member in arb_bytes(128),
        score in arb_score(),
        version in any::<u16>(),
    ) {
        let zscore = StorageKey::zscore(key, member, score, version);
        let decoded = StorageKey::decode(KeyKind::ZScore, &encode(&zscore)).expect("decoding should succeed");
        prop_assert_eq!(decoded, zscore);
    }

    #[test]
    fn list_key_round_trip(key in arb_bytes(128), seq in any::<u64>(), version in any::<u16>()) {
        let list = StorageKey::list(key, seq, version);
        let decoded = StorageKey::decode(KeyKind::List, &encode(&list)).expect("decoding should succeed");
        prop_assert_eq!(decoded, list);
    }

    #[test]
    fn meta_and_delete_round_trip(key in arb_bytes(128), version in any::<u16>()) {
        let meta = StorageKey::meta(key.clone());
        let delete = StorageKey::delete(key, version);
        prop_assert_eq!(StorageKey::decode(KeyKind::Meta, &encode(&meta)).expect("meta"), meta);
        prop_assert_eq!(StorageKey::decode(KeyKind::Delete, &encode(&delete)).expect("delete"), delete);
    }

    #[test]
    fn decoding_garbage_never_panics(bytes in arb_bytes(64)) {
        for kind in [KeyKind::Meta, KeyKind::Item, KeyKind::ZScore, KeyKind::List, KeyKind::Delete] {
            let _ = StorageKey::decode(kind, &bytes);
        }
        let _ = kvcodec::StorageValue::decode(&bytes);
    }
}
