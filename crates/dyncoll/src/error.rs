// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types shared by the containers, the blob codec and the text codecs.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by container operations and codecs.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was malformed (bad index path, bad sort order, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A key or value did not match the type the container expects.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Keyed lookup found no matching entry.
    #[error("entry not found")]
    NotFound,

    /// Removal from an empty container.
    #[error("container is empty")]
    Empty,

    /// Index at or beyond the logical length.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A registry index that no descriptor occupies.
    #[error("unknown type index {0}")]
    UnknownTypeIndex(i64),

    /// A registry slot that is reserved but has no implementation.
    #[error("type '{0}' is not supported")]
    UnsupportedType(String),

    /// Storage for the requested number of slots could not be reserved.
    #[error("cannot reserve storage for {requested} slots")]
    CapacityExhausted { requested: usize },

    /// Sorting by value before any value type has been established.
    #[error("vector has no value type to compare by")]
    NoValueType,

    /// Blob does not start with the expected marker.
    #[error("bad blob marker 0x{0:04X}")]
    BadMagic(u16),

    /// Blob was written by an incompatible format version.
    #[error("unsupported blob version {0}")]
    UnsupportedVersion(u32),

    /// Input ended before a complete field could be read.
    #[error("truncated input: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// String payload was not valid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    /// Nested containers deeper than the configured limit.
    #[error("nesting depth limit {0} exceeded")]
    DepthExceeded(usize),

    /// Malformed textual input (XML or JSON).
    #[error("malformed {format} input: {reason}")]
    Malformed {
        format: &'static str,
        reason: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }
}
