// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate configuration - wire constants and tunable options.
//!
//! - **Level 1 (Static)**: blob format constants and renderer indent widths.
//!   **NEVER hardcode these elsewhere!**
//! - **Level 2 (Dynamic)**: [`ContainerOptions`] and [`DecodeOptions`], both
//!   loadable from JSON so a host can keep them next to its own settings.
//!
//! # Example
//!
//! ```
//! use dyncoll::config::{ContainerOptions, DecodeOptions};
//!
//! let opts = ContainerOptions::from_json_str(r#"{ "initial_capacity": 32 }"#).unwrap();
//! assert_eq!(opts.initial_capacity, 32);
//! assert!(!DecodeOptions::default().in_place);
//! ```

use serde::Deserialize;

use crate::error::Result;

// =======================================================================
// Blob format
// =======================================================================

/// Marker at offset 0 of every container blob.
pub const BLOB_MAGIC: u16 = 0x4ABC;

/// The only blob format version this crate reads or writes.
pub const BLOB_VERSION: u32 = 10;

/// Header length: marker (2) + version (4) + key type index (2) + entry count (8).
pub const BLOB_HEADER_LEN: usize = 2 + 4 + 2 + 8;

/// Width of the `length` + `size` prefix in front of a bytes payload.
pub const BYTES_PREFIX_LEN: usize = 16;

/// Width of an encoded pointer value.
pub const POINTER_WIDTH: usize = 8;

// =======================================================================
// Renderers
// =======================================================================

/// Indent applied to nested containers in XML and JSON output.
pub const NESTED_INDENT: usize = 2;

/// Indent applied to key and value bodies in the string dump.
pub const TEXT_VALUE_INDENT: usize = 6;

// =======================================================================
// Runtime options
// =======================================================================

/// Construction options for containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerOptions {
    /// Slots allocated eagerly by a vector, or node storage reserved by a
    /// list. A request that cannot be reserved starts empty.
    pub initial_capacity: usize,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
        }
    }
}

impl ContainerOptions {
    /// Parse options from a JSON object; missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Options for blob decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Alias string and bytes payloads into the source buffer instead of copying.
    pub in_place: bool,
    /// Maximum container nesting accepted before decoding stops.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            in_place: false,
            max_depth: 64,
        }
    }
}

impl DecodeOptions {
    /// Copying decode with default limits.
    pub fn copying() -> Self {
        Self::default()
    }

    /// Aliasing decode with default limits.
    pub fn in_place() -> Self {
        Self {
            in_place: true,
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
