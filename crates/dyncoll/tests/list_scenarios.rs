// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::cast_sign_loss)] // Test data conversions
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::unreadable_literal)] // Large test constants
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::too_many_lines)] // Example/test code
#![allow(clippy::redundant_closure_for_method_calls)] // Test code clarity
#![allow(clippy::similar_names)] // Test variable naming
#![allow(clippy::needless_pass_by_value)] // Test functions

//! End-to-end list behavior: ordering, lookup, removal and copying.

use dyncoll::{list, Error, List, TypeDescriptor, Value};
use std::cmp::Ordering;

fn keys(list: &List) -> Vec<String> {
    list.iter()
        .map(|node| node.key().to_display_string())
        .collect()
}

fn scenario_list() -> List {
    let mut list = List::new(TypeDescriptor::STRING);
    list.add_back("key1", "value1").expect("add key1");
    list.add_back("key4", "value4").expect("add key4");
    list.add_back("key2", "value2").expect("add key2");
    list.add_front("key3", "value3").expect("add key3");
    list
}

#[test]
fn test_front_and_back_insertion_order() {
    let list = scenario_list();
    assert_eq!(keys(&list), ["key3", "key1", "key4", "key2"]);

    let node = list.get_forward(&"key2".into()).expect("key2 present");
    assert_eq!(node.value().as_str(), Some("value2"));
    assert!(list.get_forward(&"key5".into()).is_none());
}

#[test]
fn test_length_matches_both_walks() {
    let mut list = scenario_list();
    list.remove(&"key4".into()).expect("remove key4");
    list.add_back("key9", 9_i32).expect("mixed value types are fine");

    let forward = list.iter().count();
    let backward = list.iter().rev().count();
    assert_eq!(forward, list.len());
    assert_eq!(backward, list.len());
    assert_eq!(list.front().map(|n| n.key().to_display_string()).as_deref(), Some("key3"));
    assert_eq!(list.back().map(|n| n.key().to_display_string()).as_deref(), Some("key9"));
}

#[test]
fn test_drain_from_both_ends() {
    let mut list = scenario_list();
    let (key, _) = list.remove_front().expect("front");
    assert_eq!(key.as_str(), Some("key3"));
    let (key, value) = list.remove_back().expect("back");
    assert_eq!(key.as_str(), Some("key2"));
    assert_eq!(value.as_str(), Some("value2"));

    list.remove_front().expect("front");
    list.remove_front().expect("front");
    assert!(list.is_empty());
    assert!(list.front().is_none() && list.back().is_none());
    assert!(matches!(list.remove_back(), Err(Error::Empty)));
}

#[test]
fn test_cloned_insert_leaves_source_usable() {
    let mut inner = List::new(TypeDescriptor::STRING);
    inner.add_back("x", 1_i64).expect("add");
    let value = Value::from(inner);
    let key = Value::from("nested");

    let mut list = List::new(TypeDescriptor::STRING);
    list.add_back_cloned(&key, &value).expect("first copy");
    list.add_front_cloned(&key, &value).expect("second copy");

    assert_eq!(list.len(), 2);
    let first = list.front().expect("front");
    let second = list.back().expect("back");
    assert_eq!(first.value().compare(second.value()), Ordering::Equal);
    assert_eq!(value.as_list().map(List::len), Some(1));
}

#[test]
fn test_nested_mutation_through_node() {
    let mut list = List::new(TypeDescriptor::STRING);
    let id = list
        .add_back("child", List::new(TypeDescriptor::U32))
        .expect("add");
    list.node_mut(id)
        .and_then(|node| node.value_mut().as_list_mut())
        .expect("child list")
        .add_back(7_u32, "seven")
        .expect("nested add");

    let child = list.node(id).and_then(|n| n.value().as_list()).expect("child");
    assert_eq!(child.len(), 1);
}

#[test]
fn test_compare_ranks_by_length_then_values() {
    let a = scenario_list();
    let mut b = scenario_list();
    assert_eq!(a.compare(&b), Ordering::Equal);

    b.add_back("extra", "z").expect("add");
    assert_eq!(a.compare(&b), Ordering::Less);
    assert_eq!(list::compare(Some(&b), Some(&a)), Ordering::Greater);
    assert_eq!(list::compare(None, Some(&a)), Ordering::Less);

    let mut c = List::new(TypeDescriptor::STRING);
    let mut d = List::new(TypeDescriptor::STRING);
    c.add_back("k", 1_i32).expect("add");
    d.add_back("k", 2_i32).expect("add");
    assert_eq!(c.compare(&d), Ordering::Less);
    assert!(c < d);
}

#[test]
fn test_case_insensitive_keys() {
    let mut list = List::new(TypeDescriptor::STRING_CI);
    list.add_back(Value::string_ci("Content-Type"), "text/plain")
        .expect("add");
    let node = list
        .get_forward(&Value::string_ci("content-type"))
        .expect("case-insensitive match");
    assert_eq!(node.value().as_str(), Some("text/plain"));
}
