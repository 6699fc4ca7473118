// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary container blobs.
//!
//! All integers are little-endian.
//!
//! ```text
//! header   u16 marker (0x4ABC) | u32 version (10) | i16 key type index | u64 entry count
//! entry    i16 value type index | value payload | key payload
//! ```
//!
//! Payloads by kind:
//!
//! - inline scalars: their raw bytes (bool is one byte)
//! - strings: UTF-8 followed by a NUL
//! - bytes: u64 length, u64 size (length + 1), the data, a NUL
//! - pointer: eight bytes, only zero (null) is accepted on decode
//! - lists and vectors: a complete nested blob
//! - caller types: whatever [`CustomValue::write_blob`](crate::CustomValue::write_blob) emits
//!
//! Vector holes are not written; a keyless vector writes the key type's
//! default value in each key position.
//!
//! Decoding is lenient past the header: a failure part way through returns
//! the entries read so far together with the error, see [`Decoded`].

mod container;
mod cursor;
mod value;

pub use container::{list_from_slice, vector_from_slice};

use crate::error::{Error, Result};

/// Outcome of decoding a blob.
#[derive(Debug)]
pub struct Decoded<T> {
    /// Everything decoded before the first failing entry.
    pub value: T,
    /// Bytes consumed by the header and the complete entries.
    pub consumed: usize,
    /// Why decoding stopped early, if it did.
    pub truncated: Option<Error>,
}

impl<T> Decoded<T> {
    pub fn is_complete(&self) -> bool {
        self.truncated.is_none()
    }

    /// The decoded value, or the error that cut it short.
    pub fn into_complete(self) -> Result<T> {
        match self.truncated {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}
