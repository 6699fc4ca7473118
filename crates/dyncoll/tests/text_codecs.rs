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

//! XML, JSON and text forms across both containers.

use dyncoll::{xml_to_list, List, TypeDescriptor, Value, Vector};

fn strip_whitespace_outside_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in text.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if !c.is_whitespace() {
            out.push(c);
        }
    }
    out
}

#[test]
fn test_xml_scan_of_flat_document() {
    let list = xml_to_list("<list><a>1</a><b>2</b></list>").expect("parsed");
    assert_eq!(list.len(), 2);
    let pairs: Vec<(String, Vec<u8>)> = list
        .iter()
        .map(|node| {
            (
                node.key().to_display_string(),
                node.value().as_bytes().expect("bytes value").to_vec(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        [("a".to_string(), b"1".to_vec()), ("b".to_string(), b"2".to_vec())]
    );
    assert!(list
        .iter()
        .all(|node| node.type_descriptor() == TypeDescriptor::BYTES));
}

#[test]
fn test_xml_scan_of_soap_style_response() {
    let input = r#"
<?xml version="1.0" encoding="UTF-8"?>
<getStatusResponse xmlns="urn:example">
  <status>ok</status>
  <detail>
    <code>200</code>
    <text>fine</text>
  </detail>
</getStatusResponse>
"#;
    let list = xml_to_list(input).expect("parsed");
    assert_eq!(list.len(), 2);
    let detail = list
        .get_forward(&"detail".into())
        .and_then(|node| node.value().as_list())
        .expect("nested detail");
    let code = detail
        .get_forward(&"code".into())
        .and_then(|node| node.value().as_bytes())
        .expect("code");
    assert_eq!(code, b"200");
}

#[test]
fn test_json_object_normalized_round_trip() {
    let input = r#"{"key1":"value1","key2":false,"key3":null}"#;
    let list = List::from_json(input).expect("parse");
    assert_eq!(strip_whitespace_outside_strings(&list.to_json()), input);
}

#[test]
fn test_json_nested_round_trip() {
    let input = r#"{"id":42,"ratio":0.500000,"tags":["x","y"],"owner":{"name":"ann","admin":true}}"#;
    let list = List::from_json(input).expect("parse");
    let rendered = list.to_json();
    assert_eq!(strip_whitespace_outside_strings(&rendered), input);

    let again = List::from_json(&rendered).expect("reparse");
    assert_eq!(again, list);
}

#[test]
fn test_json_matches_serde_view() {
    let mut list = List::new(TypeDescriptor::STRING);
    list.add_back("quote", "say \"hi\"\n").expect("add");
    list.add_back("n", -7_i16).expect("add");
    let mut inner = Vector::new(TypeDescriptor::U8);
    inner.add_entry(1_u8).expect("add");
    list.add_back("v", inner).expect("add");

    let parsed: serde_json::Value = serde_json::from_str(&list.to_json()).expect("valid json");
    assert_eq!(
        parsed,
        serde_json::json!({ "quote": "say \"hi\"\n", "n": -7, "v": [1] })
    );
}

#[test]
fn test_xml_render_then_scan() {
    let mut inner = List::new(TypeDescriptor::STRING);
    inner.add_back("city", "Lyon").expect("add");
    let mut list = List::new(TypeDescriptor::STRING);
    list.add_back("name", "Ann").expect("add");
    list.add_back("age", 33_u8).expect("add");
    list.add_back("home", inner).expect("add");

    for indent in [false, true] {
        let xml = list.to_xml("personRequest", indent);
        let back = xml_to_list(&xml).expect("scan");
        assert_eq!(back.len(), 3, "indent={} xml={}", indent, xml);
        let home = back
            .get_forward(&"home".into())
            .and_then(|node| node.value().as_list())
            .expect("home list");
        let city = home
            .get_forward(&"homeList".into())
            .and_then(|node| node.value().as_list())
            .and_then(|l| l.get_forward(&"city".into()))
            .and_then(|node| node.value().as_bytes())
            .expect("city");
        assert_eq!(city, b"Lyon");
    }
}

#[test]
fn test_display_matches_dump() {
    let mut list = List::new(TypeDescriptor::I32);
    list.add_back(1_i32, Value::bytes(b"tab\there")).expect("add");
    let text = list.to_string();
    assert!(text.starts_with("{\n  size=1\n  keyType=i32\n"));
    assert!(text.contains("      tab%09here"));
    assert!(String::from_utf8(list.to_bytes())
        .expect("utf8")
        .starts_with("size=1\n{"));
}
