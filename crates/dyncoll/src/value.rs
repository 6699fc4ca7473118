// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic values stored in containers.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::list::List;
use crate::text::format;
use crate::types::{compare_descriptors, CustomValue, TypeDescriptor, TypeKind};
use crate::vector::Vector;

/// UTF-8 text backed by a shared byte buffer.
///
/// In-place blob decoding hands out `Text` values that point into the
/// source buffer; everything else owns its bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Text(Bytes);

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self(Bytes::from(text.into()))
    }

    /// Wrap a buffer after checking it is valid UTF-8.
    pub fn from_utf8(bytes: Bytes) -> Result<Self> {
        std::str::from_utf8(&bytes).map_err(|_| Error::InvalidUtf8)?;
        Ok(Self(bytes))
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: every constructor either starts from a `String`/`&str` or
        // validates the buffer in `from_utf8`, and the buffer is immutable.
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    /// Underlying buffer (shares storage, no copy).
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    // Inline scalars
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    Float(f32),
    Double(f64),

    // Heap-backed
    String(Text),
    StringCi(Text),
    Bytes(Bytes),
    List(Box<List>),
    Vector(Box<Vector>),

    /// The null pointer.
    Null,

    Custom(Box<dyn CustomValue>),
}

impl Value {
    /// Case-insensitive string value.
    pub fn string_ci(text: impl Into<Text>) -> Self {
        Self::StringCi(text.into())
    }

    /// Bytes value copied from `data`.
    pub fn bytes(data: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Bytes::copy_from_slice(data.as_ref()))
    }

    /// Placeholder of the given type (zero, empty, or null).
    pub fn default_for(descriptor: &TypeDescriptor) -> Self {
        match descriptor {
            TypeDescriptor::Builtin(kind) => match kind {
                TypeKind::Bool => Self::Bool(false),
                TypeKind::I8 => Self::I8(0),
                TypeKind::U8 => Self::U8(0),
                TypeKind::I16 => Self::I16(0),
                TypeKind::U16 => Self::U16(0),
                TypeKind::I32 => Self::I32(0),
                TypeKind::U32 => Self::U32(0),
                TypeKind::I64 => Self::I64(0),
                TypeKind::U64 => Self::U64(0),
                TypeKind::I128 => Self::I128(0),
                TypeKind::U128 => Self::U128(0),
                TypeKind::Float => Self::Float(0.0),
                TypeKind::Double => Self::Double(0.0),
                TypeKind::String => Self::String(Text::default()),
                TypeKind::StringCi => Self::StringCi(Text::default()),
                TypeKind::Bytes => Self::Bytes(Bytes::new()),
                TypeKind::List => Self::List(Box::new(List::new(TypeDescriptor::STRING))),
                TypeKind::Vector => Self::Vector(Box::new(Vector::new(TypeDescriptor::STRING))),
                TypeKind::Pointer => Self::Null,
            },
            TypeDescriptor::Custom(custom) => Self::Custom(custom.default_value()),
        }
    }

    /// Descriptor of this value's type.
    pub fn type_descriptor(&self) -> TypeDescriptor {
        match self {
            Self::Custom(custom) => TypeDescriptor::Custom(custom.custom_type()),
            _ => TypeDescriptor::Builtin(self.builtin_kind()),
        }
    }

    /// Built-in kind, `None` for caller values.
    pub fn kind(&self) -> Option<TypeKind> {
        match self {
            Self::Custom(_) => None,
            _ => Some(self.builtin_kind()),
        }
    }

    fn builtin_kind(&self) -> TypeKind {
        match self {
            Self::Bool(_) => TypeKind::Bool,
            Self::I8(_) => TypeKind::I8,
            Self::U8(_) => TypeKind::U8,
            Self::I16(_) => TypeKind::I16,
            Self::U16(_) => TypeKind::U16,
            Self::I32(_) => TypeKind::I32,
            Self::U32(_) => TypeKind::U32,
            Self::I64(_) => TypeKind::I64,
            Self::U64(_) => TypeKind::U64,
            Self::I128(_) => TypeKind::I128,
            Self::U128(_) => TypeKind::U128,
            Self::Float(_) => TypeKind::Float,
            Self::Double(_) => TypeKind::Double,
            Self::String(_) => TypeKind::String,
            Self::StringCi(_) => TypeKind::StringCi,
            Self::Bytes(_) => TypeKind::Bytes,
            Self::List(_) => TypeKind::List,
            Self::Vector(_) => TypeKind::Vector,
            // Custom values never reach here; callers branch first.
            Self::Null | Self::Custom(_) => TypeKind::Pointer,
        }
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Text of a string or case-insensitive string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) | Self::StringCi(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Shared buffer behind a string or bytes value.
    pub fn as_shared_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::String(v) | Self::StringCi(v) => Some(v.as_bytes()),
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vector_mut(&mut self) -> Option<&mut Vector> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&dyn CustomValue> {
        match self {
            Self::Custom(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    /// Total order over values.
    ///
    /// Values of different types rank by registry index, then type name.
    /// Floats use `total_cmp` so NaN has a fixed position.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::I8(a), Self::I8(b)) => a.cmp(b),
            (Self::U8(a), Self::U8(b)) => a.cmp(b),
            (Self::I16(a), Self::I16(b)) => a.cmp(b),
            (Self::U16(a), Self::U16(b)) => a.cmp(b),
            (Self::I32(a), Self::I32(b)) => a.cmp(b),
            (Self::U32(a), Self::U32(b)) => a.cmp(b),
            (Self::I64(a), Self::I64(b)) => a.cmp(b),
            (Self::U64(a), Self::U64(b)) => a.cmp(b),
            (Self::I128(a), Self::I128(b)) => a.cmp(b),
            (Self::U128(a), Self::U128(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Double(a), Self::Double(b)) => a.total_cmp(b),
            (Self::String(a), Self::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Self::StringCi(a), Self::StringCi(b)) => a
                .as_bytes()
                .iter()
                .map(u8::to_ascii_lowercase)
                .cmp(b.as_bytes().iter().map(u8::to_ascii_lowercase)),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => a.compare(b),
            (Self::Vector(a), Self::Vector(b)) => a.compare(b),
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Custom(a), Self::Custom(b)) if a.custom_type().name() == b.custom_type().name() => {
                a.compare(b.as_ref())
            }
            _ => compare_descriptors(&self.type_descriptor(), &other.type_descriptor()),
        }
    }

    /// Human-readable form.
    ///
    /// Floats print with six decimals, falling back to the shortest form
    /// when that would read as zero; bytes escape non-printables as `%XX`.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Bool(v) => v.to_string(),
            Self::I8(v) => v.to_string(),
            Self::U8(v) => v.to_string(),
            Self::I16(v) => v.to_string(),
            Self::U16(v) => v.to_string(),
            Self::I32(v) => v.to_string(),
            Self::U32(v) => v.to_string(),
            Self::I64(v) => v.to_string(),
            Self::U64(v) => v.to_string(),
            Self::I128(v) => v.to_string(),
            Self::U128(v) => v.to_string(),
            Self::Float(v) => format::c_double(f64::from(*v)),
            Self::Double(v) => format::c_double(*v),
            Self::String(v) | Self::StringCi(v) => v.to_string(),
            Self::Bytes(v) => format::escape_bytes(v),
            Self::List(v) => v.to_display_string(),
            Self::Vector(v) => v.to_display_string(),
            Self::Null => format::NULL_POINTER.to_string(),
            Self::Custom(v) => v.to_display_string(),
        }
    }

    /// Byte form: raw payload for bytes, flattened dump for containers,
    /// display text otherwise.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Bytes(v) => v.to_vec(),
            Self::List(v) => v.to_bytes(),
            Self::Vector(v) => v.to_bytes(),
            _ => self.to_display_string().into_bytes(),
        }
    }

    /// Storage size in bytes.
    ///
    /// Scalars report their width, strings include the terminator, bytes
    /// report their length and containers their shell size.
    pub fn size(&self) -> usize {
        match self {
            Self::String(v) | Self::StringCi(v) => v.len() + 1,
            Self::Bytes(v) => v.len(),
            Self::List(_) => std::mem::size_of::<List>(),
            Self::Vector(_) => std::mem::size_of::<Vector>(),
            Self::Null => crate::config::POINTER_WIDTH,
            Self::Custom(v) => v.size(),
            _ => self.builtin_kind().fixed_size().unwrap_or(0),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    i128 => I128,
    u128 => U128,
    f32 => Float,
    f64 => Double,
    Text => String,
    Bytes => Bytes,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Text::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Text::new(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(v))
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(Box::new(v))
    }
}

impl From<Vector> for Value {
    fn from(v: Vector) -> Self {
        Self::Vector(Box::new(v))
    }
}

impl From<Box<dyn CustomValue>> for Value {
    fn from(v: Box<dyn CustomValue>) -> Self {
        Self::Custom(v)
    }
}
