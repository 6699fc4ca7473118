// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry - stable indices for every storable kind.
//!
//! The order is part of the blob format and must not change. Each base kind
//! sits at an even index with a reserved "no copy" slot right after it;
//! decoding a no-copy index resolves to its base kind. Slots for kinds this
//! crate does not implement (long double, queue, stack, tree, hash table)
//! stay reserved so caller indices keep their positions.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use super::{CustomType, TypeDescriptor, TypeKind};
use crate::error::{Error, Result};

pub const BOOL: usize = 0;
pub const I8: usize = 2;
pub const U8: usize = 4;
pub const I16: usize = 6;
pub const U16: usize = 8;
pub const I32: usize = 10;
pub const U32: usize = 12;
pub const I64: usize = 14;
pub const U64: usize = 16;
pub const I128: usize = 18;
pub const U128: usize = 20;
pub const FLOAT: usize = 22;
pub const DOUBLE: usize = 24;
pub const LONG_DOUBLE: usize = 26;
pub const STRING: usize = 28;
pub const STRING_CI: usize = 30;
pub const BYTES: usize = 32;
pub const BYTES_NO_COPY: usize = 33;
pub const LIST: usize = 34;
pub const QUEUE: usize = 36;
pub const STACK: usize = 38;
pub const RB_TREE: usize = 40;
pub const HASH_TABLE: usize = 42;
pub const VECTOR: usize = 44;
pub const POINTER: usize = 46;

/// Number of built-in slots; caller types start here.
pub const BUILTIN_COUNT: usize = 48;

/// Base slots in registry order (index / 2). `Err` marks a reserved kind.
const BASE_SLOTS: [std::result::Result<TypeKind, &str>; BUILTIN_COUNT / 2] = [
    Ok(TypeKind::Bool),
    Ok(TypeKind::I8),
    Ok(TypeKind::U8),
    Ok(TypeKind::I16),
    Ok(TypeKind::U16),
    Ok(TypeKind::I32),
    Ok(TypeKind::U32),
    Ok(TypeKind::I64),
    Ok(TypeKind::U64),
    Ok(TypeKind::I128),
    Ok(TypeKind::U128),
    Ok(TypeKind::Float),
    Ok(TypeKind::Double),
    Err("longDouble"),
    Ok(TypeKind::String),
    Ok(TypeKind::StringCi),
    Ok(TypeKind::Bytes),
    Ok(TypeKind::List),
    Err("Queue"),
    Err("Stack"),
    Err("RbTree"),
    Err("HashTable"),
    Ok(TypeKind::Vector),
    Ok(TypeKind::Pointer),
];

static CUSTOM_TYPES: OnceLock<RwLock<Vec<Arc<dyn CustomType>>>> = OnceLock::new();

fn custom_types() -> &'static RwLock<Vec<Arc<dyn CustomType>>> {
    CUSTOM_TYPES.get_or_init(|| RwLock::new(Vec::new()))
}

/// Registry index of `descriptor`, `None` if it was never registered.
pub fn index_of(descriptor: &TypeDescriptor) -> Option<usize> {
    match descriptor {
        TypeDescriptor::Builtin(kind) => Some(kind.index()),
        TypeDescriptor::Custom(custom) => custom_types()
            .read()
            .iter()
            .position(|known| known.name() == custom.name())
            .map(|pos| BUILTIN_COUNT + pos),
    }
}

/// Descriptor registered at `index`.
///
/// No-copy slots resolve to their base kind.
pub fn descriptor_at(index: usize) -> Result<TypeDescriptor> {
    if index < BUILTIN_COUNT {
        return match BASE_SLOTS[index / 2] {
            Ok(kind) => Ok(TypeDescriptor::Builtin(kind)),
            Err(name) => Err(Error::UnsupportedType(name.to_string())),
        };
    }

    custom_types()
        .read()
        .get(index - BUILTIN_COUNT)
        .map(|custom| TypeDescriptor::Custom(Arc::clone(custom)))
        .ok_or(Error::UnknownTypeIndex(index as i64))
}

/// Register a caller type and return its index.
///
/// Registering a name twice returns the index it already has.
pub fn register(custom: Arc<dyn CustomType>) -> usize {
    let mut types = custom_types().write();
    if let Some(pos) = types.iter().position(|known| known.name() == custom.name()) {
        return BUILTIN_COUNT + pos;
    }
    types.push(custom);
    let index = BUILTIN_COUNT + types.len() - 1;
    log::debug!("[registry] registered custom type at index {}", index);
    index
}

/// Total number of registry slots, built-in and caller.
pub fn type_count() -> usize {
    BUILTIN_COUNT + custom_types().read().len()
}

/// Whether `index` selects a recursive (container or later) kind.
pub fn is_container_index(index: usize) -> bool {
    index >= LIST
}
