// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dyncoll - runtime-typed containers
//!
//! A doubly-linked [`List`] and a sparse random-access [`Vector`] whose keys
//! and values carry their type at runtime. Values may themselves be lists or
//! vectors, so arbitrarily nested data fits in one container type.
//!
//! ## Quick Start
//!
//! ```rust
//! use dyncoll::{DecodeOptions, List, Result, TypeDescriptor, Vector};
//!
//! fn main() -> Result<()> {
//!     let mut scores = Vector::new(TypeDescriptor::I64);
//!     scores.add_entry(42_i64)?;
//!     scores.add_entry(17_i64)?;
//!
//!     let mut record = List::new(TypeDescriptor::STRING);
//!     record.add_back("name", "probe-7")?;
//!     record.add_back("scores", scores)?;
//!
//!     let blob = record.to_blob()?;
//!     let decoded = List::from_blob(&blob, DecodeOptions::default())?;
//!     assert_eq!(decoded.into_complete()?, record);
//!
//!     println!("{}", record.to_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`List`] | Ordered key/value nodes with front/back insertion |
//! | [`Vector`] | Index-addressed entries with holes and geometric growth |
//! | [`Value`] | One dynamically typed value |
//! | [`TypeDescriptor`] | Runtime type of a value, with a stable registry index |
//! | [`Shared`] | `Arc` + mutex handle for cross-thread access |
//!
//! ## Formats
//!
//! - Binary blobs ([`List::to_blob`], [`List::from_blob`]), see [`codec`]
//! - JSON ([`List::to_json`], [`List::from_json`])
//! - XML ([`List::to_xml`], [`xml_to_list`])
//! - Text dumps ([`List::to_display_string`], [`List::to_key_value_string`])

/// Binary blob encoding and decoding.
pub mod codec;
/// Wire constants and runtime options.
pub mod config;
/// Error type shared by every operation.
pub mod error;
/// Doubly-linked list.
pub mod list;
/// Lock wrapper for sharing a container between threads.
pub mod sync;
/// String, XML and JSON forms.
pub mod text;
/// Runtime type descriptors and the type registry.
pub mod types;
/// Dynamically typed values.
pub mod value;
/// Sparse vector.
pub mod vector;

pub use codec::Decoded;
pub use config::{ContainerOptions, DecodeOptions};
pub use error::{Error, Result};
pub use list::{List, ListNode, NodeId};
pub use sync::Shared;
pub use text::xml_to_list;
pub use types::{
    descriptor_at, index_of, register, type_count, CustomType, CustomValue, TypeDescriptor,
    TypeKind,
};
pub use value::{Text, Value};
pub use vector::{SortKey, SortOrder, Vector, VectorBuilder, VectorEntry};
