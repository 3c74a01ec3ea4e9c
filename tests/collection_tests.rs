// tests/collection_tests.rs
use yamlnub::collection::{Collection, CollectionError};
use yamlnub::document::node::{Kind, Node};
use yamlnub::document::parser::parse_yaml;
use yamlnub::yamlpath;

fn ints(values: &[i64]) -> Vec<Node> {
    values.iter().map(|v| Node::Int(*v)).collect()
}

// ============================================================================
// Indexing
// ============================================================================

#[test]
fn test_negative_indexing_end_to_end() {
    let c = Collection::from_values([1, 2, 3, 4]);
    assert_eq!(c.at(-1), Some(&Node::Int(4)));
    assert_eq!(c.slice(-2, -1), ints(&[3, 4]).as_slice());
}

#[test]
fn test_inclusive_range_law() {
    for n in 1..8i64 {
        let values: Vec<i64> = (0..n).collect();
        let c = Collection::from_values(values.clone());
        let whole = c.slice(0, -1);
        assert_eq!(whole.len(), n as usize);
        assert_eq!(whole, ints(&values).as_slice());
    }
}

#[test]
fn test_at_never_panics() {
    let c = Collection::from_values(["a"]);
    for i in [-100, -2, 1, 100] {
        assert_eq!(c.at(i), None);
    }
    assert_eq!(Collection::new().at(0), None);
}

// Path reads report a missing position as absent, while direct indexing of a
// collection panics. Both behaviors are kept on purpose and pinned here.
#[test]
fn test_out_of_bounds_path_read_is_absent() {
    let root = parse_yaml("items: [1]").unwrap();
    assert_eq!(yamlpath::query(&root, "items.[5]").unwrap(), None);
}

#[test]
#[should_panic(expected = "index 5 is out of bounds for length 1")]
fn test_out_of_bounds_direct_index_panics() {
    let root = parse_yaml("items: [1]").unwrap();
    let items = Collection::from_node(root.get("items").unwrap().clone()).unwrap();
    let _ = &items[5];
}

// ============================================================================
// Copy vs. view
// ============================================================================

#[test]
fn test_copy_round_trip_and_independence() {
    let c = Collection::from_values(["x", "y", "z"]);
    let mut copy = c.copy(0, -1);
    assert_eq!(copy.slice(0, -1), c.slice(0, -1));

    copy.set(1, "changed").drop_last();
    assert_eq!(c.join(","), "x,y,z");
    assert_eq!(copy.join(","), "x,changed");
}

#[test]
fn test_view_shares_storage() {
    let mut c = Collection::from_values([1, 2, 3, 4]);
    let mut view = c.slice_mut(-2, -1);
    view.set(0, 30).set(1, 40);
    assert_eq!(c.as_slice(), ints(&[1, 2, 30, 40]).as_slice());
}

#[test]
fn test_clone_is_a_deep_copy() {
    let original = Collection::from_values([Node::map()]);
    let mut cloned = original.clone();
    if let Some(Node::Map(map)) = cloned.at(0).cloned() {
        let mut map = map;
        map.insert("k".to_string(), Node::from(1));
        cloned.set(0, Node::Map(map));
    }
    assert_eq!(original.at(0), Some(&Node::map()));
    assert_ne!(cloned.at(0), original.at(0));
}

// ============================================================================
// Kind checking
// ============================================================================

#[test]
fn test_kind_established_by_first_append() {
    let mut c = Collection::new();
    assert_eq!(c.kind(), None);
    c.try_append(1.5).unwrap();
    assert_eq!(c.kind(), Some(Kind::Float));

    c.try_append(2).unwrap();
    assert_eq!(c.kind(), Some(Kind::Float));

    let err = c.try_append("2").unwrap_err();
    assert_eq!(
        err,
        CollectionError::TypeMismatch {
            expected: Kind::Float,
            found: Kind::Str
        }
    );
}

#[test]
fn test_decoded_sequence_with_nulls_is_never_shortened() {
    let leading = parse_yaml("[~, 1, 2]").unwrap();
    assert!(Collection::from_node(leading).unwrap_err().is_type_error());

    let middle = parse_yaml("[1, ~, 2]").unwrap();
    assert!(Collection::from_node(middle).unwrap_err().is_type_error());

    let all_null = Collection::from_node(parse_yaml("[~, ~]").unwrap()).unwrap();
    assert_eq!(all_null.len(), 2);
}

#[test]
fn test_decoded_mixed_numbers_form_one_collection() {
    let c = Collection::from_node(parse_yaml("[1, 2.5]").unwrap()).unwrap();
    assert_eq!(c.len(), 2);
    assert!(c.contains(&Node::from(2.5)));
}

#[test]
fn test_insert_out_of_range_still_checks_kind() {
    let mut c = Collection::from_values([1, 2]);
    assert!(c.try_insert(10, ["x"]).unwrap_err().is_type_error());
    c.try_insert(10, [3]).unwrap();
    assert_eq!(c.to_string(), "[1 2]");
}

#[test]
fn test_n_helpers_with_huge_counts() {
    let c = Collection::from_values([1, 2, 3]);
    assert_eq!(c.first_n(usize::MAX).len(), 3);
    assert_eq!(c.last_n(usize::MAX).len(), 3);
    assert_eq!(c.last_n(1 << 63).len(), 3);
    assert_eq!(c.first_n(2), c.slice(0, 1));
    assert_eq!(c.last_n(2), c.slice(-2, -1));
    assert!(c.first_n(0).is_empty());
    assert!(c.last_n(0).is_empty());

    let mut d = c.clone();
    d.drop_first_n(usize::MAX);
    assert!(d.is_empty());

    let mut d = c.clone();
    d.drop_last_n(usize::MAX);
    assert!(d.is_empty());

    let mut d = c.clone();
    d.drop_first_n(1).drop_last_n(1);
    assert_eq!(d.to_string(), "[2]");
}

#[test]
fn test_insert_checks_kind_without_side_effects() {
    let mut c = Collection::from_values(["a", "c"]);
    assert!(c.try_insert(1, [Node::from("b"), Node::from(1)]).is_err());
    assert_eq!(c.join(""), "ac");
    c.try_insert(1, ["b"]).unwrap();
    assert_eq!(c.join(""), "abc");
}

#[test]
#[should_panic(expected = "can't add type 'bool' to a collection of 'int'")]
fn test_unchecked_insert_panics() {
    let mut c = Collection::from_values([1]);
    c.insert(0, [true]);
}

#[test]
fn test_clear_keeps_kind() {
    let mut c = Collection::from_values([1, 2]);
    c.clear();
    assert!(c.is_empty());
    assert!(c.try_append("x").is_err());
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_unique_preserves_first_seen_order() {
    let mut c = Collection::from_values([3, 1, 2, 1, 3]);
    c.unique();
    assert_eq!(c.as_slice(), ints(&[3, 1, 2]).as_slice());
}

#[test]
fn test_unique_floats() {
    let mut c = Collection::from_values([1.0, 1.5, 1.0]);
    c.unique();
    assert_eq!(c.len(), 2);
}

#[test]
fn test_sort_strings_lexicographic() {
    let mut c = Collection::from_values(["b10", "a", "b2"]);
    c.sort().unwrap();
    assert_eq!(c.join(" "), "a b10 b2");
}

#[test]
fn test_sort_floats_numeric() {
    let mut c = Collection::from_values([2.5, -1.0, 10.0]);
    c.sort().unwrap();
    assert_eq!(c.to_string(), "[-1 2.5 10]");
}

#[test]
fn test_swap_out_of_bounds_is_noop() {
    let mut c = Collection::from_values([1, 2]);
    c.swap(0, 2).swap(-3, 1);
    assert_eq!(c.as_slice(), ints(&[1, 2]).as_slice());
}

// ============================================================================
// Interop with document trees
// ============================================================================

#[test]
fn test_collection_from_query_result() {
    let root = parse_yaml("ports: [443, 80, 8080, 80]").unwrap();
    let ports = yamlpath::query(&root, "ports").unwrap().unwrap().clone();
    let mut ports = Collection::from_node(ports).unwrap();
    ports.unique().sort().unwrap();
    assert_eq!(ports.join(","), "80,443,8080");

    let mut root = root;
    yamlpath::mutate(&mut root, "ports", ports.into_node()).unwrap();
    assert_eq!(root, parse_yaml("ports: [80, 443, 8080]").unwrap());
}

#[test]
fn test_mixed_sequence_is_rejected() {
    let root = parse_yaml("[1, two]").unwrap();
    assert!(Collection::from_node(root).unwrap_err().is_type_error());
}
