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

//! Attached file handles ride along with a container but never leave it
//! through a copy.

use std::io::{Read, Seek, SeekFrom, Write};

use dyncoll::{List, TypeDescriptor, Vector};

#[test]
fn test_list_file_round_trip() {
    let mut list = List::new(TypeDescriptor::STRING);
    list.add_back("k", 1_i32).expect("add");
    assert!(list.file_mut().is_none());

    let file = tempfile::tempfile().expect("tempfile");
    assert!(list.set_file(file).is_none());

    let dump = list.to_bytes();
    list.file_mut()
        .expect("attached")
        .write_all(&dump)
        .expect("write");

    let mut file = list.take_file().expect("attached");
    assert!(list.file_mut().is_none());
    file.seek(SeekFrom::Start(0)).expect("seek");
    let mut back = Vec::new();
    file.read_to_end(&mut back).expect("read");
    assert_eq!(back, dump);
}

#[test]
fn test_set_file_returns_previous_handle() {
    let mut list = List::new(TypeDescriptor::STRING);
    let mut first = tempfile::tempfile().expect("tempfile");
    first.write_all(b"first").expect("write");
    list.set_file(first);

    let previous = list
        .set_file(tempfile::tempfile().expect("tempfile"))
        .expect("previous handle");
    assert_eq!(previous.metadata().expect("metadata").len(), 5);
}

#[test]
fn test_clone_does_not_carry_file() {
    let mut list = List::new(TypeDescriptor::STRING);
    list.add_back("k", "v").expect("add");
    list.set_file(tempfile::tempfile().expect("tempfile"));
    let mut copy = list.clone();
    assert_eq!(copy, list);
    assert!(copy.file_mut().is_none());
    assert!(list.file_mut().is_some());

    let mut vector = Vector::new(TypeDescriptor::I32);
    vector.add_entry(3_i32).expect("add");
    vector.set_file(tempfile::tempfile().expect("tempfile"));
    let mut copy = vector.clone();
    assert_eq!(copy, vector);
    assert!(copy.file_mut().is_none());
    assert!(vector.file_mut().is_some());
}

#[test]
fn test_vector_clear_closes_file() {
    let mut vector = Vector::new(TypeDescriptor::I32);
    vector.set_entry(4, 9_i32).expect("set");
    vector.set_file(tempfile::tempfile().expect("tempfile"));
    let capacity = vector.capacity();

    vector.clear();
    assert!(vector.is_empty());
    assert_eq!(vector.capacity(), capacity);
    assert!(vector.file_mut().is_none());
}
