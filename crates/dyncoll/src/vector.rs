// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Random-access vector with holes.
//!
//! Slots are a contiguous `Vec` whose length is the capacity; an empty slot
//! is a hole. `len` is a high-water mark (one past the highest index ever
//! set, reduced only by [`Vector::remove`] or [`Vector::sort`]), so holes
//! below it are legal. Growth is geometric: setting an index at or beyond
//! the capacity grows it to `(index + 1) * 2`.
//!
//! The first value stored fixes the vector's value type. After that an
//! inline scalar type can only be replaced by the same type; heap-backed
//! types (strings, bytes, containers, null) may mix freely.

use std::cmp::Ordering;
use std::fs::File;

use crate::config::ContainerOptions;
use crate::error::{Error, Result};
use crate::list::List;
use crate::types::{compare_descriptors, TypeDescriptor};
use crate::value::Value;

/// A populated vector slot.
#[derive(Debug, Clone)]
pub struct VectorEntry {
    index: usize,
    key: Option<Value>,
    value: Value,
}

impl VectorEntry {
    /// Slot index; always equal to the entry's position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Key, or `None` in a keyless vector.
    pub fn key(&self) -> Option<&Value> {
        self.key.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        self.value.type_descriptor()
    }
}

/// Sort direction; converts from the numeric `1` / `-1` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl TryFrom<i32> for SortOrder {
    type Error = Error;

    fn try_from(order: i32) -> Result<Self> {
        match order {
            1 => Ok(Self::Ascending),
            -1 => Ok(Self::Descending),
            other => Err(Error::InvalidArgument(format!("sort order {}", other))),
        }
    }
}

/// Which half of each entry [`Vector::sort`] orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Values,
    Keys,
}

/// Builder for [`Vector`].
#[derive(Debug, Clone)]
pub struct VectorBuilder {
    key_type: TypeDescriptor,
    value_type: Option<TypeDescriptor>,
    options: ContainerOptions,
}

impl VectorBuilder {
    /// Fix the value type up front instead of on the first insert.
    pub fn value_type(mut self, value_type: TypeDescriptor) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Number of empty slots to allocate eagerly.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.options.initial_capacity = capacity;
        self
    }

    pub fn options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Vector {
        let mut slots = Vec::new();
        match slots.try_reserve_exact(self.options.initial_capacity) {
            Ok(()) => slots.resize_with(self.options.initial_capacity, || None),
            Err(err) => log::warn!(
                "[vector] cannot reserve {} initial slots, starting empty: {}",
                self.options.initial_capacity,
                err
            ),
        }
        Vector {
            key_type: self.key_type,
            value_type: self.value_type,
            slots,
            len: 0,
            file: None,
        }
    }
}

/// Index-addressed key/value storage.
#[derive(Debug)]
pub struct Vector {
    key_type: TypeDescriptor,
    value_type: Option<TypeDescriptor>,
    slots: Vec<Option<VectorEntry>>,
    len: usize,
    file: Option<File>,
}

impl Vector {
    /// Keyless vector of `value_type` values.
    ///
    /// The key type mirrors the value type; entries carry no key.
    pub fn new(value_type: TypeDescriptor) -> Self {
        Self::builder(value_type.clone()).value_type(value_type).build()
    }

    /// Keyed vector; the value type is fixed by the first insert.
    pub fn with_key_type(key_type: TypeDescriptor) -> Self {
        Self::builder(key_type).build()
    }

    pub fn builder(key_type: TypeDescriptor) -> VectorBuilder {
        VectorBuilder {
            key_type,
            value_type: None,
            options: ContainerOptions::default(),
        }
    }

    pub fn key_type(&self) -> &TypeDescriptor {
        &self.key_type
    }

    /// Value type, once established.
    pub fn value_type(&self) -> Option<&TypeDescriptor> {
        self.value_type.as_ref()
    }

    /// Value type, defaulting to the key type while none is established.
    pub fn effective_value_type(&self) -> &TypeDescriptor {
        self.value_type.as_ref().unwrap_or(&self.key_type)
    }

    /// High-water mark: one past the highest populated index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of populated slots.
    pub fn populated(&self) -> usize {
        self.iter().count()
    }

    /// Store `value` at `index` in a keyless vector.
    pub fn set_entry(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        self.store(index, None, value.into())
    }

    /// Store `key`/`value` at `index`.
    pub fn kv_set_entry(
        &mut self,
        index: usize,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.store(index, Some(key.into()), value.into())
    }

    /// Store `value` at index `len`.
    pub fn add_entry(&mut self, value: impl Into<Value>) -> Result<()> {
        self.set_entry(self.len, value)
    }

    /// Store `key`/`value` at index `len`.
    pub fn kv_add_entry(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        self.kv_set_entry(self.len, key, value)
    }

    fn store(&mut self, index: usize, key: Option<Value>, value: Value) -> Result<()> {
        if let Some(key) = &key {
            let found = key.type_descriptor();
            if found != self.key_type {
                log::warn!(
                    "[vector] key type {} does not match vector key type {}",
                    found,
                    self.key_type
                );
                return Err(Error::mismatch(self.key_type.name(), found.name()));
            }
        }

        let found = value.type_descriptor();
        match &self.value_type {
            Some(expected)
                if *expected != found
                    && !(expected.data_is_pointer() && found.data_is_pointer()) =>
            {
                log::warn!(
                    "[vector] value type was set to {} and an entry of type {} was given",
                    expected,
                    found
                );
                return Err(Error::mismatch(expected.name(), found.name()));
            }
            _ => {}
        }

        if index >= self.slots.len() {
            self.grow_to(index)?;
        }
        if self.value_type.is_none() {
            self.value_type = Some(found);
        }

        self.slots[index] = Some(VectorEntry { index, key, value });
        if index >= self.len {
            self.len = index + 1;
        }
        Ok(())
    }

    /// Entry at `index`; `None` beyond capacity or for a hole.
    pub fn get_entry(&self, index: usize) -> Option<&VectorEntry> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_entry_mut(&mut self, index: usize) -> Option<&mut VectorEntry> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    pub fn get_value(&self, index: usize) -> Option<&Value> {
        self.get_entry(index).map(VectorEntry::value)
    }

    /// First entry, scanning forward, whose key equals `key`.
    pub fn kv_get_entry(&self, key: &Value) -> Option<&VectorEntry> {
        self.iter().find(|entry| {
            entry
                .key
                .as_ref()
                .is_some_and(|k| k.compare(key) == Ordering::Equal)
        })
    }

    pub fn kv_get_value(&self, key: &Value) -> Option<&Value> {
        self.kv_get_entry(key).map(VectorEntry::value)
    }

    /// Nearest populated slot strictly below `index`.
    pub fn find_previous_allocated(&self, index: usize) -> Option<&VectorEntry> {
        let end = index.min(self.slots.len());
        self.slots[..end].iter().rev().find_map(Option::as_ref)
    }

    /// Nearest populated slot strictly above `index`.
    pub fn find_next_allocated(&self, index: usize) -> Option<&VectorEntry> {
        let start = index.saturating_add(1).min(self.slots.len());
        self.slots[start..].iter().find_map(Option::as_ref)
    }

    /// Remove slot `index` and shift everything above it down by one.
    ///
    /// O(n). Returns the removed entry, or `None` if the slot was a hole.
    pub fn remove(&mut self, index: usize) -> Result<Option<VectorEntry>> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let removed = self.slots.remove(index);
        self.slots.push(None);
        for entry in self.slots[index..self.len - 1].iter_mut().flatten() {
            entry.index -= 1;
        }
        self.len -= 1;
        Ok(removed)
    }

    /// Drop every entry and close any attached file; capacity is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.len = 0;
        self.file = None;
    }

    /// Sort populated entries by value or key.
    ///
    /// Sorted entries are packed into indices `0..n` and `len` becomes `n`.
    pub fn sort(&mut self, order: SortOrder, by: SortKey) -> Result<()> {
        if by == SortKey::Values && self.value_type.is_none() {
            log::warn!("[vector] sort by value requested before any value was stored");
            return Err(Error::NoValueType);
        }
        self.sort_by(|a, b| {
            let ordering = match by {
                SortKey::Values => a.value.compare(&b.value),
                SortKey::Keys => match (&a.key, &b.key) {
                    (Some(ka), Some(kb)) => ka.compare(kb),
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                },
            };
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        Ok(())
    }

    /// Sort populated entries with a caller comparator, packing them into
    /// indices `0..n`.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&VectorEntry, &VectorEntry) -> Ordering,
    {
        let mut entries: Vec<VectorEntry> = self.slots.iter_mut().filter_map(Option::take).collect();
        entries.sort_by(|a, b| compare(a, b));
        self.len = entries.len();
        for (index, mut entry) in entries.into_iter().enumerate() {
            entry.index = index;
            self.slots[index] = Some(entry);
        }
    }

    /// Resolve a bracketed path such as `"[2]"` or `"[2][0]"` through
    /// nested vectors.
    ///
    /// Fails when the path is malformed, or when the path and the data
    /// disagree about nesting depth.
    pub fn get_index(&self, path: &str) -> Option<&VectorEntry> {
        let Some(rest) = path.strip_prefix('[') else {
            log::warn!("[vector] index path {:?} does not start with '['", path);
            return None;
        };
        let close = rest.find(']')?;
        let index: usize = match rest[..close].parse() {
            Ok(index) => index,
            Err(_) => {
                log::warn!("[vector] index path {:?} has a non-integer index", path);
                return None;
            }
        };
        let remainder = &rest[close + 1..];

        let entry = self.get_entry(index);
        let nested = entry.and_then(|e| e.value.as_vector());
        match (nested, remainder.starts_with('[')) {
            (Some(vector), true) => vector.get_index(remainder),
            (None, false) => entry,
            _ => {
                log::debug!("[vector] index path {:?} does not match nesting", path);
                None
            }
        }
    }

    /// Grow so `index` fits, to `(index + 1) * 2` slots.
    fn grow_to(&mut self, index: usize) -> Result<()> {
        let new_capacity = index
            .checked_add(1)
            .and_then(|n| n.checked_mul(2))
            .ok_or_else(|| Error::InvalidArgument(format!("index {} too large", index)))?;
        if let Err(err) = self
            .slots
            .try_reserve_exact(new_capacity - self.slots.len())
        {
            log::warn!(
                "[vector] cannot grow capacity {} -> {}: {}",
                self.slots.len(),
                new_capacity,
                err
            );
            return Err(Error::CapacityExhausted {
                requested: new_capacity,
            });
        }
        log::debug!(
            "[vector] growing capacity {} -> {}",
            self.slots.len(),
            new_capacity
        );
        self.slots.resize_with(new_capacity, || None);
        Ok(())
    }

    /// Iterate populated entries in index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &VectorEntry> + '_ {
        self.slots[..self.len.min(self.slots.len())]
            .iter()
            .filter_map(Option::as_ref)
    }

    /// Ordering by key type, then populated count, then populated values in
    /// index order. Holes and keys never take part.
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.key_type != other.key_type {
            return compare_descriptors(&self.key_type, &other.key_type);
        }
        let (count, other_count) = (self.populated(), other.populated());
        if count != other_count {
            return count.cmp(&other_count);
        }
        crate::list::compare_values(
            self.iter().map(VectorEntry::value),
            other.iter().map(VectorEntry::value),
        )
    }

    /// Copy into a list, in index order.
    ///
    /// Keyless entries get the key type's default value as their key.
    pub fn to_list(&self) -> List {
        let mut list = List::with_options(
            self.key_type.clone(),
            ContainerOptions {
                initial_capacity: self.len,
            },
        );
        for entry in self.iter() {
            let key = entry
                .key
                .clone()
                .unwrap_or_else(|| Value::default_for(&self.key_type));
            if let Err(err) = list.add_back(key, entry.value.clone()) {
                log::error!("[vector] to_list: entry {} rejected: {}", entry.index, err);
            }
        }
        list
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

impl Clone for Vector {
    /// Deep copy preserving capacity and indices; the file is not carried over.
    fn clone(&self) -> Self {
        Self {
            key_type: self.key_type.clone(),
            value_type: self.value_type.clone(),
            slots: self.slots.clone(),
            len: self.len,
            file: None,
        }
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd for Vector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}
