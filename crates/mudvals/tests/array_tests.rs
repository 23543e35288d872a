//! Integration tests for hybrid array containers

use mudvals::*;
use pretty_assertions::assert_eq;

fn int(n: i64) -> Value {
    Value::Integer(n)
}

fn s(text: &str) -> Value {
    Value::string(text)
}

fn packed(values: Vec<Value>) -> ArrayRef {
    ArrayRef::from_values(values)
}

/// Walk a container the way VM iteration primitives do: first key, then
/// repeated next.
fn iterate(arr: &ArrayRef) -> Vec<(Value, Value)> {
    let mut out = Vec::new();
    let mut key = arr.first();
    while let Some(k) = key {
        let v = arr.get_item(&k).expect("iterated key must be present");
        key = arr.next(&k);
        out.push((k, v));
    }
    out
}

#[test]
fn test_dictionary_range_extraction() {
    // Keys {1,3,5,7,9}; bounds 3..=8 round inward to the keys 3, 5, 7
    let mut ages = ArrayRef::new_dictionary();
    for k in [1, 3, 5, 7, 9] {
        ages.set_int_key(k, k * 10).unwrap();
    }
    let sub = ages.get_range(&int(3), &int(8)).unwrap();
    assert_eq!(
        sub.entries(),
        vec![
            (int(3), int(30)),
            (int(5), int(50)),
            (int(7), int(70)),
        ]
    );
    // The source is untouched
    assert_eq!(ages.len(), 5);
}

#[test]
fn test_packed_delete_range_closes_gap() {
    let mut list = packed(vec![s("a"), s("b"), s("c")]);
    assert_eq!(list.delete_range(&int(0), &int(1)), Ok(1));
    assert_eq!(list.entries(), vec![(int(0), s("c"))]);
}

#[test]
fn test_mash_builds_word_counts() {
    let words = packed(vec![s("x"), s("y"), s("x")]);
    let mut counts = ArrayRef::new_dictionary();
    counts.mash(&words, 1);
    assert_eq!(
        counts.entries(),
        vec![(s("x"), int(2)), (s("y"), int(1))]
    );
}

#[test]
fn test_mash_into_itself() {
    // The source snapshot keeps self-mash well defined
    let mut arr = ArrayRef::new_dictionary();
    arr.set_int_key(1, 1).unwrap();
    let alias = arr.clone();
    arr.mash(&alias, 1);
    assert_eq!(arr.get_int_key(1), Some(int(2)));
}

#[test]
fn test_cow_isolates_handles() {
    let mut a = packed(vec![int(1), int(2)]);
    let mut b = a.clone();
    let c = a.clone();
    assert_eq!(a.share_count(), 3);

    a.append_item(int(3)).unwrap();
    assert_eq!(a.len(), 3);
    assert_eq!(b.len(), 2);
    assert_eq!(c.len(), 2);
    // b and c still alias each other
    assert!(ArrayRef::ptr_eq(&b, &c));

    b.set_item(&int(0), int(9)).unwrap();
    assert_eq!(b.get_item(&int(0)), Some(int(9)));
    assert_eq!(c.get_item(&int(0)), Some(int(1)));
}

#[test]
fn test_pinned_container_shares_mutations() {
    let mut config = ArrayRef::new_dictionary();
    config.set_pinned(true);
    let mut writer = config.clone();
    writer.set_str_key("debug", 1).unwrap();
    assert_eq!(config.get_str_key("debug"), Some(int(1)));
    assert_eq!(config.share_count(), 2);

    // Unpinning restores copy-on-write
    writer.set_pinned(false);
    writer.set_str_key("debug", 0).unwrap();
    assert_eq!(config.get_str_key("debug"), Some(int(1)));
    assert_eq!(writer.get_str_key("debug"), Some(int(0)));
}

#[test]
fn test_nested_arrays_share_by_handle() {
    let inner = packed(vec![int(1)]);
    let mut outer = ArrayRef::new_dictionary();
    outer
        .set_str_key("list", inner.clone().into_value())
        .unwrap();

    // Mutating through a fetched handle decouples it from the stored one
    let mut fetched = outer
        .get_str_key("list")
        .and_then(|v| v.as_array().cloned())
        .unwrap();
    fetched.append_item(int(2)).unwrap();
    assert_eq!(fetched.len(), 2);
    assert_eq!(
        outer
            .get_str_key("list")
            .and_then(|v| v.as_array().map(ArrayRef::len)),
        Some(1)
    );
}

#[test]
fn test_get_range_set_range_round_trip() {
    let mut arr = packed((0..10).map(int).collect());
    let slice = arr.get_range(&int(2), &int(5)).unwrap();
    assert_eq!(slice.len(), 4);
    let mut rebuilt = arr.get_range(&int(0), &int(1)).unwrap();
    rebuilt.set_range(&int(2), &slice).unwrap();
    assert_eq!(rebuilt.entries(), arr.get_range(&int(0), &int(5)).unwrap().entries());
    // Writing the slice back where it came from changes nothing
    arr.set_range(&int(2), &slice).unwrap();
    assert_eq!(arr.entries(), (0..10).map(|n| (int(n), int(n))).collect::<Vec<_>>());
}

#[test]
fn test_insert_range_splice() {
    let mut arr = packed(vec![s("a"), s("d")]);
    let middle = packed(vec![s("b"), s("c")]);
    assert_eq!(arr.insert_range(&int(1), &middle), Ok(4));
    let values: Vec<Value> = arr.entries().into_iter().map(|(_, v)| v).collect();
    assert_eq!(values, vec![s("a"), s("b"), s("c"), s("d")]);
}

#[test]
fn test_packed_append_only_at_len() {
    let mut arr = ArrayRef::new_packed(0);
    assert_eq!(arr.set_item(&int(0), s("first")), Ok(1));
    assert_eq!(arr.set_item(&int(1), s("second")), Ok(2));
    assert!(matches!(
        arr.set_item(&int(5), s("sparse")),
        Err(ArrayError::IndexOutOfBounds { index: 5, len: 2 })
    ));
}

#[test]
fn test_promote_enables_sparse_keys() {
    let list = packed(vec![s("a"), s("b")]);
    let mut dict = list.promote();
    assert_eq!(dict.mode(), ArrayMode::Dictionary);
    dict.set_int_key(100, "sparse").unwrap();
    dict.set_str_key("name", "mixed").unwrap();
    assert_eq!(dict.len(), 4);
    assert_eq!(dict.get_int_key(0), Some(s("a")));
}

#[test]
fn test_demote_keys_as_set() {
    // Union via mash, then demote back to a key list
    let left = packed(vec![s("a"), s("b")]);
    let right = packed(vec![s("b"), s("c")]);
    let mut tally = ArrayRef::new_dictionary();
    tally.mash(&left, 1);
    tally.mash(&right, 1);
    let union = tally.demote_only(1).unwrap();
    let values: Vec<Value> = union.entries().into_iter().map(|(_, v)| v).collect();
    assert_eq!(values, vec![s("a"), s("b"), s("c")]);
    // Intersection: only keys seen in both lists reach a count of 2
    let both = tally.demote_only(2).unwrap();
    let values: Vec<Value> = both.entries().into_iter().map(|(_, v)| v).collect();
    assert_eq!(values, vec![s("b")]);
}

#[test]
fn test_iteration_matches_entries() {
    let mut arr = ArrayRef::new_dictionary();
    arr.set_str_key("banana", 2).unwrap();
    arr.set_int_key(3, 0).unwrap();
    arr.set_str_key("apple", 1).unwrap();
    arr.set_item(&Value::Float(1.5), int(9)).unwrap();
    assert_eq!(iterate(&arr), arr.entries());

    let list = packed(vec![s("a"), s("b"), s("c")]);
    assert_eq!(iterate(&list), list.entries());
}

#[test]
fn test_dictionary_keys_fold_case() {
    let mut arr = ArrayRef::new_dictionary();
    arr.set_str_key("Name", 1).unwrap();
    assert_eq!(arr.set_str_key("NAME", 2), Ok(1));
    assert_eq!(arr.get_str_key("name"), Some(int(2)));
    assert_eq!(arr.delete_item(&s("nAmE")), Ok(0));
}

#[test]
fn test_large_dictionary_stays_ordered() {
    let mut arr = ArrayRef::new_dictionary();
    for i in 0..500 {
        // Insertion order deliberately scrambled
        arr.set_int_key((i * 193) % 500, i).unwrap();
    }
    assert_eq!(arr.len(), 500);
    let keys: Vec<i64> = arr
        .entries()
        .into_iter()
        .map(|(k, _)| k.as_integer().unwrap())
        .collect();
    assert_eq!(keys, (0..500).collect::<Vec<_>>());
}

#[test]
fn test_homogeneity_checks() {
    let strings = packed(vec![s("a"), s("b")]);
    assert!(strings.is_homogenous(TypeTag::String));
    assert!(!strings.is_homogenous(TypeTag::Integer));

    let mut mixed = ArrayRef::new_dictionary();
    mixed.set_str_key("n", 1).unwrap();
    mixed.set_str_key("s", "x").unwrap();
    assert!(!mixed.is_homogenous(TypeTag::Integer));
}

#[test]
fn test_error_messages() {
    let mut arr = ArrayRef::new_packed(2);
    let err = arr.set_item(&s("key"), int(0)).unwrap_err();
    assert_eq!(err.to_string(), "Type error: expected integer, got string");
    let err = arr.set_item(&int(7), int(0)).unwrap_err();
    assert_eq!(err.to_string(), "Index 7 out of bounds (length 2)");
    let err = arr.get_range(&int(1), &int(0)).unwrap_err();
    assert_eq!(err.to_string(), "Invalid range 1..=0");
    let err = ArrayRef::new_dictionary().append_item(int(1)).unwrap_err();
    assert_eq!(err.to_string(), "Operation requires a packed array");
}
