// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Extension points for caller-defined value kinds.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// Descriptor of a caller-defined kind.
///
/// Register it once with [`register`](super::register) so it receives a
/// registry index; the blob codec writes that index in front of each value.
pub trait CustomType: Send + Sync + 'static {
    /// Unique name. Two descriptors with the same name are the same type.
    fn name(&self) -> &str;

    fn xml_name(&self) -> Option<&str> {
        None
    }

    fn data_is_pointer(&self) -> bool {
        true
    }

    /// Value used when a blob needs a placeholder of this type.
    fn default_value(&self) -> Box<dyn CustomValue>;

    /// Decode one value from the front of `input`.
    ///
    /// Returns the value and the number of bytes consumed.
    fn read_blob(&self, input: &[u8]) -> Result<(Box<dyn CustomValue>, usize)>;
}

/// A value of a caller-defined kind.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// The descriptor this value belongs to.
    fn custom_type(&self) -> Arc<dyn CustomType>;

    fn clone_boxed(&self) -> Box<dyn CustomValue>;

    /// Compare with another value of the same type.
    fn compare(&self, other: &dyn CustomValue) -> Ordering;

    fn to_display_string(&self) -> String;

    /// Append the self-delimiting encoding of this value.
    fn write_blob(&self, out: &mut Vec<u8>);

    /// Payload size in bytes.
    fn size(&self) -> usize;

    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn CustomValue> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}
