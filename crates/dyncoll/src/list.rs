// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Doubly-linked key/value list.
//!
//! Nodes live in an index arena; `prev`/`next` are slot indices, and a
//! generation counter per slot makes stale [`NodeId`]s miss instead of
//! aliasing a reused slot. Every removal funnels through
//! [`List::destroy_node`].
//!
//! Keys must all have the list's key type; values may be of any type and
//! differ from node to node.

use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::iter::FusedIterator;

use crate::config::ContainerOptions;
use crate::error::{Error, Result};
use crate::types::{compare_descriptors, TypeDescriptor};
use crate::value::Value;

/// Handle to a node, valid until that node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    slot: usize,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.slot, self.generation)
    }
}

/// One key/value entry.
#[derive(Debug, Clone)]
pub struct ListNode {
    id: NodeId,
    key: Value,
    value: Value,
    prev: Option<usize>,
    next: Option<usize>,
}

impl ListNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &Value {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Type of this node's value.
    pub fn type_descriptor(&self) -> TypeDescriptor {
        self.value.type_descriptor()
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<ListNode>,
}

/// Doubly-linked list of key/value pairs.
#[derive(Debug)]
pub struct List {
    key_type: TypeDescriptor,
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    file: Option<File>,
}

impl List {
    /// Empty list whose keys have type `key_type`.
    pub fn new(key_type: TypeDescriptor) -> Self {
        Self::with_options(key_type, ContainerOptions::default())
    }

    /// Empty list with node storage reserved up front.
    pub fn with_options(key_type: TypeDescriptor, options: ContainerOptions) -> Self {
        let mut slots = Vec::new();
        if let Err(err) = slots.try_reserve_exact(options.initial_capacity) {
            log::warn!(
                "[list] cannot reserve {} nodes, starting empty: {}",
                options.initial_capacity,
                err
            );
        }
        Self {
            key_type,
            slots,
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            file: None,
        }
    }

    pub fn key_type(&self) -> &TypeDescriptor {
        &self.key_type
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check_key(&self, key: &Value) -> Result<()> {
        let found = key.type_descriptor();
        if found != self.key_type {
            log::warn!(
                "[list] key type {} does not match list key type {}",
                found,
                self.key_type
            );
            return Err(Error::mismatch(self.key_type.name(), found.name()));
        }
        Ok(())
    }

    fn slot(&self, index: usize) -> Option<&ListNode> {
        self.slots.get(index).and_then(|slot| slot.node.as_ref())
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut ListNode> {
        self.slots.get_mut(index).and_then(|slot| slot.node.as_mut())
    }

    fn allocate(&mut self, key: Value, value: Value) -> usize {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        slot.node = Some(ListNode {
            id: NodeId {
                slot: index,
                generation: slot.generation,
            },
            key,
            value,
            prev: None,
            next: None,
        });
        index
    }

    fn id_at(&self, index: usize) -> NodeId {
        NodeId {
            slot: index,
            generation: self.slots[index].generation,
        }
    }

    fn link_front(&mut self, index: usize) {
        let old_head = self.head;
        if let Some(node) = self.slot_mut(index) {
            node.next = old_head;
        }
        match old_head.and_then(|h| self.slot_mut(h)) {
            Some(head) => head.prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
    }

    fn link_back(&mut self, index: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.slot_mut(index) {
            node.prev = old_tail;
        }
        match old_tail.and_then(|t| self.slot_mut(t)) {
            Some(tail) => tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// Insert at the head, taking ownership of `key` and `value`.
    pub fn add_front(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<NodeId> {
        let key = key.into();
        self.check_key(&key)?;
        let index = self.allocate(key, value.into());
        self.link_front(index);
        Ok(self.id_at(index))
    }

    /// Insert at the tail, taking ownership of `key` and `value`.
    pub fn add_back(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<NodeId> {
        let key = key.into();
        self.check_key(&key)?;
        let index = self.allocate(key, value.into());
        self.link_back(index);
        Ok(self.id_at(index))
    }

    /// Insert deep copies of `key` and `value` at the head.
    pub fn add_front_cloned(&mut self, key: &Value, value: &Value) -> Result<NodeId> {
        self.add_front(key.clone(), value.clone())
    }

    /// Insert deep copies of `key` and `value` at the tail.
    pub fn add_back_cloned(&mut self, key: &Value, value: &Value) -> Result<NodeId> {
        self.add_back(key.clone(), value.clone())
    }

    /// Detach the head node and return its key and value.
    pub fn remove_front(&mut self) -> Result<(Value, Value)> {
        let id = self.front().map(ListNode::id).ok_or(Error::Empty)?;
        self.destroy_node(id)
    }

    /// Detach the tail node and return its key and value.
    pub fn remove_back(&mut self) -> Result<(Value, Value)> {
        let id = self.back().map(ListNode::id).ok_or(Error::Empty)?;
        self.destroy_node(id)
    }

    /// Remove the first node, scanning forward, whose key equals `key`.
    pub fn remove(&mut self, key: &Value) -> Result<(Value, Value)> {
        let id = self.get_forward(key).map(ListNode::id).ok_or_else(|| {
            log::debug!("[list] remove: key {} not found", key);
            Error::NotFound
        })?;
        self.destroy_node(id)
    }

    /// First node, scanning from the head, whose key equals `key`.
    pub fn get_forward(&self, key: &Value) -> Option<&ListNode> {
        self.iter().find(|node| node.key.compare(key) == Ordering::Equal)
    }

    /// First node, scanning from the tail, whose key equals `key`.
    pub fn get_reverse(&self, key: &Value) -> Option<&ListNode> {
        self.iter()
            .rev()
            .find(|node| node.key.compare(key) == Ordering::Equal)
    }

    pub fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.slots
            .get(id.slot)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut ListNode> {
        self.slots
            .get_mut(id.slot)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Detach a node, fix up its neighbours, and hand back its key and value.
    pub fn destroy_node(&mut self, id: NodeId) -> Result<(Value, Value)> {
        let node = match self.slots.get_mut(id.slot) {
            Some(slot) if slot.generation == id.generation => slot.node.take(),
            _ => None,
        }
        .ok_or(Error::NotFound)?;

        match node.prev.and_then(|p| self.slot_mut(p)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|n| self.slot_mut(n)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        let slot = &mut self.slots[id.slot];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.slot);
        self.len -= 1;
        Ok((node.key, node.value))
    }

    /// Drop every node; the list itself stays usable.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn front(&self) -> Option<&ListNode> {
        self.head.and_then(|h| self.slot(h))
    }

    pub fn back(&self) -> Option<&ListNode> {
        self.tail.and_then(|t| self.slot(t))
    }

    /// Iterate from head to tail (reversible).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Value-only ordering.
    ///
    /// Key types rank first (registry index, then name), then lengths, then
    /// values pairwise. Keys themselves never take part.
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.key_type != other.key_type {
            return compare_descriptors(&self.key_type, &other.key_type);
        }
        if self.len != other.len {
            return self.len.cmp(&other.len);
        }
        compare_values(
            self.iter().map(ListNode::value),
            other.iter().map(ListNode::value),
        )
    }

    /// Attach a file handle for buffered I/O helpers; replaces any previous one.
    pub fn set_file(&mut self, file: File) -> Option<File> {
        self.file.replace(file)
    }

    pub fn file_mut(&mut self) -> Option<&mut File> {
        self.file.as_mut()
    }

    pub fn take_file(&mut self) -> Option<File> {
        self.file.take()
    }
}

/// Null-aware comparison: `None` ranks below any list.
pub fn compare(a: Option<&List>, b: Option<&List>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b),
    }
}

/// Pairwise value comparison shared by both containers.
///
/// A type mismatch ranks by descriptor before any value is compared.
pub(crate) fn compare_values<'a>(
    a: impl Iterator<Item = &'a Value>,
    b: impl Iterator<Item = &'a Value>,
) -> Ordering {
    for (va, vb) in a.zip(b) {
        let (ta, tb) = (va.type_descriptor(), vb.type_descriptor());
        let ordering = if ta != tb {
            compare_descriptors(&ta, &tb)
        } else {
            va.compare(vb)
        };
        if ordering != Ordering::Equal {
            log::debug!("[list] compare: {} vs {} -> {:?}", va, vb, ordering);
            return ordering;
        }
    }
    Ordering::Equal
}

impl Clone for List {
    /// Deep copy; nested lists and vectors are copied recursively. The file
    /// association is not carried over.
    fn clone(&self) -> Self {
        let mut copy = Self::with_options(
            self.key_type.clone(),
            ContainerOptions {
                initial_capacity: self.len,
            },
        );
        for node in self {
            let index = copy.allocate(node.key.clone(), node.value.clone());
            copy.link_back(index);
        }
        copy
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd for List {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

/// Head-to-tail iterator over list nodes.
pub struct Iter<'a> {
    list: &'a List,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ListNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.slot(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.slot(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(node)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a List {
    type Item = &'a ListNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &List) -> Vec<String> {
        list.iter()
            .map(|node| node.key().as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_add_and_lookup_order() {
        let mut list = List::new(TypeDescriptor::STRING);
        list.add_back("key1", "value1").expect("add");
        list.add_back("key4", "value4").expect("add");
        list.add_back("key2", "value2").expect("add");
        list.add_front("key3", "value3").expect("add");

        assert_eq!(keys(&list), ["key3", "key1", "key4", "key2"]);
        let node = list.get_forward(&"key2".into()).expect("key2 present");
        assert_eq!(node.value().as_str(), Some("value2"));
        assert!(list.get_forward(&"key5".into()).is_none());
    }

    #[test]
    fn test_links_consistent_both_directions() {
        let mut list = List::new(TypeDescriptor::I32);
        for i in 0..10 {
            list.add_back(i, i * 10).expect("add");
        }
        list.remove(&Value::from(4)).expect("remove middle");
        list.remove_front().expect("remove head");
        list.remove_back().expect("remove tail");

        assert_eq!(list.len(), 7);
        assert_eq!(list.iter().count(), 7);
        assert_eq!(list.iter().rev().count(), 7);
        let forward: Vec<_> = list.iter().map(|n| n.key().as_i32()).collect();
        let mut backward: Vec<_> = list.iter().rev().map(|n| n.key().as_i32()).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_add_front_then_remove_front_restores() {
        let mut list = List::new(TypeDescriptor::STRING);
        list.add_back("a", 1_i64).expect("add");
        list.add_back("b", 2_i64).expect("add");
        let before = list.clone();

        list.add_front("z", "temporary").expect("add");
        let (key, value) = list.remove_front().expect("remove");
        assert_eq!(key.as_str(), Some("z"));
        assert_eq!(value.as_str(), Some("temporary"));
        assert_eq!(list.len(), 2);
        assert_eq!(list, before);
        assert_eq!(keys(&list), keys(&before));
    }

    #[test]
    fn test_key_type_enforced() {
        let mut list = List::new(TypeDescriptor::STRING);
        let err = list.add_back(1_i32, "x").expect_err("wrong key type");
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_errors() {
        let mut list = List::new(TypeDescriptor::STRING);
        assert!(matches!(list.remove_front(), Err(Error::Empty)));
        assert!(matches!(list.remove_back(), Err(Error::Empty)));
        list.add_back("a", 1_u8).expect("add");
        assert!(matches!(list.remove(&"b".into()), Err(Error::NotFound)));
    }

    #[test]
    fn test_stale_node_id_misses() {
        let mut list = List::new(TypeDescriptor::STRING);
        let first = list.add_back("a", 1_u8).expect("add");
        list.destroy_node(first).expect("destroy");
        let second = list.add_back("b", 2_u8).expect("add");

        assert!(list.node(first).is_none());
        assert!(matches!(list.destroy_node(first), Err(Error::NotFound)));
        assert_eq!(list.node(second).map(|n| n.value().clone()), Some(Value::from(2_u8)));
    }

    #[test]
    fn test_get_reverse_finds_last_duplicate() {
        let mut list = List::new(TypeDescriptor::STRING);
        list.add_back("dup", 1_i32).expect("add");
        list.add_back("dup", 2_i32).expect("add");
        assert_eq!(list.get_forward(&"dup".into()).and_then(|n| n.value().as_i32()), Some(1));
        assert_eq!(list.get_reverse(&"dup".into()).and_then(|n| n.value().as_i32()), Some(2));
    }

    #[test]
    fn test_compare_ignores_keys() {
        let mut a = List::new(TypeDescriptor::STRING);
        let mut b = List::new(TypeDescriptor::STRING);
        a.add_back("x", 1_i32).expect("add");
        b.add_back("y", 1_i32).expect("add");
        assert_eq!(a.compare(&b), Ordering::Equal);

        b.add_back("z", 0_i32).expect("add");
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_compare_null_aware() {
        let list = List::new(TypeDescriptor::STRING);
        assert_eq!(compare(None, None), Ordering::Equal);
        assert_eq!(compare(None, Some(&list)), Ordering::Less);
        assert_eq!(compare(Some(&list), None), Ordering::Greater);
        assert_eq!(compare(Some(&list), Some(&list)), Ordering::Equal);
    }

    #[test]
    fn test_compare_key_types_then_value_types() {
        let a = List::new(TypeDescriptor::I32);
        let b = List::new(TypeDescriptor::STRING);
        assert_eq!(a.compare(&b), Ordering::Less);

        let mut c = List::new(TypeDescriptor::STRING);
        let mut d = List::new(TypeDescriptor::STRING);
        c.add_back("k", 1_i64).expect("add");
        d.add_back("k", "one").expect("add");
        assert_eq!(c.compare(&d), Ordering::Less);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut inner = List::new(TypeDescriptor::STRING);
        inner.add_back("leaf", 7_u32).expect("add");
        let mut outer = List::new(TypeDescriptor::STRING);
        outer.add_back("inner", inner).expect("add");

        let mut copy = outer.clone();
        let nested = copy
            .iter()
            .next()
            .map(ListNode::id)
            .expect("one node");
        copy.node_mut(nested)
            .and_then(|n| n.value_mut().as_list_mut())
            .expect("nested list")
            .add_back("extra", 1_u32)
            .expect("add");

        let original_inner = outer.front().and_then(|n| n.value().as_list()).expect("inner");
        assert_eq!(original_inner.len(), 1);
        assert_ne!(outer, copy);
    }

    #[test]
    fn test_with_options_reserves_nodes() {
        let list = List::with_options(
            TypeDescriptor::STRING,
            ContainerOptions {
                initial_capacity: 16,
            },
        );
        assert!(list.slots.capacity() >= 16);
        assert!(list.is_empty());

        let mut oversized = List::with_options(
            TypeDescriptor::STRING,
            ContainerOptions {
                initial_capacity: usize::MAX,
            },
        );
        assert_eq!(oversized.slots.capacity(), 0);
        oversized.add_back("k", 1_i32).expect("add");
        assert_eq!(oversized.len(), 1);
    }

    #[test]
    fn test_clear_keeps_shell() {
        let mut list = List::new(TypeDescriptor::STRING);
        list.add_back("a", 1_u8).expect("add");
        list.clear();
        assert!(list.is_empty());
        assert!(list.front().is_none());
        assert!(list.back().is_none());
        list.add_back("b", 2_u8).expect("add after clear");
        assert_eq!(list.len(), 1);
    }
}
