// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type descriptors.
//!
//! Every value stored in a [`List`](crate::List) or [`Vector`](crate::Vector)
//! carries one of these. Built-in kinds form a closed enum with fixed
//! registry indices (the blob codec writes them on the wire); caller kinds
//! implement [`CustomType`] and are appended to the registry at runtime.

mod custom;
pub mod registry;

pub use custom::{CustomType, CustomValue};
pub use registry::{descriptor_at, index_of, register, type_count};

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Built-in value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
    Float,
    Double,
    String,
    /// String compared without regard to ASCII case.
    StringCi,
    Bytes,
    List,
    Vector,
    /// Opaque reference; only the null reference is representable.
    Pointer,
}

impl TypeKind {
    /// Diagnostic name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::I128 => "i128",
            Self::U128 => "u128",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::StringCi => "case-insensitive string",
            Self::Bytes => "bytes",
            Self::List => "List",
            Self::Vector => "Vector",
            Self::Pointer => "Pointer",
        }
    }

    /// XML Schema name, where one exists.
    pub fn xml_name(self) -> Option<&'static str> {
        match self {
            Self::Bool => Some("xs:boolean"),
            Self::I8 => Some("xs:byte"),
            Self::U8 => Some("xs:unsignedByte"),
            Self::I16 => Some("xs:short"),
            Self::U16 => Some("xs:unsignedShort"),
            Self::I32 => Some("xs:int"),
            Self::U32 => Some("xs:unsignedInt"),
            Self::I64 => Some("xs:long"),
            Self::U64 => Some("xs:unsignedLong"),
            Self::I128 => Some("xs:integer"),
            Self::U128 => Some("xs:nonNegativeInteger"),
            Self::Float => Some("xs:float"),
            Self::Double => Some("xs:double"),
            Self::String | Self::StringCi => Some("xs:string"),
            Self::Bytes => Some(""),
            Self::List | Self::Vector | Self::Pointer => None,
        }
    }

    /// Stable registry index of the owning descriptor.
    pub fn index(self) -> usize {
        use registry::*;
        match self {
            Self::Bool => BOOL,
            Self::I8 => I8,
            Self::U8 => U8,
            Self::I16 => I16,
            Self::U16 => U16,
            Self::I32 => I32,
            Self::U32 => U32,
            Self::I64 => I64,
            Self::U64 => U64,
            Self::I128 => I128,
            Self::U128 => U128,
            Self::Float => FLOAT,
            Self::Double => DOUBLE,
            Self::String => STRING,
            Self::StringCi => STRING_CI,
            Self::Bytes => BYTES,
            Self::List => LIST,
            Self::Vector => VECTOR,
            Self::Pointer => POINTER,
        }
    }

    /// Encoded width of inline scalars; `None` for heap-backed kinds.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Bool | Self::I8 | Self::U8 => Some(1),
            Self::I16 | Self::U16 => Some(2),
            Self::I32 | Self::U32 | Self::Float => Some(4),
            Self::I64 | Self::U64 | Self::Double => Some(8),
            Self::I128 | Self::U128 => Some(16),
            Self::String
            | Self::StringCi
            | Self::Bytes
            | Self::List
            | Self::Vector
            | Self::Pointer => None,
        }
    }

    /// Whether values of this kind own heap storage rather than living inline.
    pub fn data_is_pointer(self) -> bool {
        self.fixed_size().is_none()
    }
}

/// Capability record identifying one storable kind.
#[derive(Clone)]
pub enum TypeDescriptor {
    Builtin(TypeKind),
    Custom(Arc<dyn CustomType>),
}

impl TypeDescriptor {
    pub const BOOL: Self = Self::Builtin(TypeKind::Bool);
    pub const I8: Self = Self::Builtin(TypeKind::I8);
    pub const U8: Self = Self::Builtin(TypeKind::U8);
    pub const I16: Self = Self::Builtin(TypeKind::I16);
    pub const U16: Self = Self::Builtin(TypeKind::U16);
    pub const I32: Self = Self::Builtin(TypeKind::I32);
    pub const U32: Self = Self::Builtin(TypeKind::U32);
    pub const I64: Self = Self::Builtin(TypeKind::I64);
    pub const U64: Self = Self::Builtin(TypeKind::U64);
    pub const I128: Self = Self::Builtin(TypeKind::I128);
    pub const U128: Self = Self::Builtin(TypeKind::U128);
    pub const FLOAT: Self = Self::Builtin(TypeKind::Float);
    pub const DOUBLE: Self = Self::Builtin(TypeKind::Double);
    pub const STRING: Self = Self::Builtin(TypeKind::String);
    pub const STRING_CI: Self = Self::Builtin(TypeKind::StringCi);
    pub const BYTES: Self = Self::Builtin(TypeKind::Bytes);
    pub const LIST: Self = Self::Builtin(TypeKind::List);
    pub const VECTOR: Self = Self::Builtin(TypeKind::Vector);
    pub const POINTER: Self = Self::Builtin(TypeKind::Pointer);

    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(kind) => kind.name(),
            Self::Custom(custom) => custom.name(),
        }
    }

    pub fn xml_name(&self) -> Option<&str> {
        match self {
            Self::Builtin(kind) => kind.xml_name(),
            Self::Custom(custom) => custom.xml_name(),
        }
    }

    pub fn data_is_pointer(&self) -> bool {
        match self {
            Self::Builtin(kind) => kind.data_is_pointer(),
            Self::Custom(custom) => custom.data_is_pointer(),
        }
    }

    /// Built-in kind, if this is not a caller type.
    pub fn kind(&self) -> Option<TypeKind> {
        match self {
            Self::Builtin(kind) => Some(*kind),
            Self::Custom(_) => None,
        }
    }

    /// Registry index, `None` for an unregistered caller type.
    pub fn index(&self) -> Option<usize> {
        index_of(self)
    }

    /// List or Vector.
    pub fn is_container(&self) -> bool {
        match self {
            Self::Builtin(kind) => matches!(kind, TypeKind::List | TypeKind::Vector),
            Self::Custom(_) => false,
        }
    }

    /// Kinds at or below the bytes slot, which render directly as text.
    pub fn is_string_like(&self) -> bool {
        self.index()
            .is_some_and(|index| index <= registry::BYTES_NO_COPY)
    }

    /// Element width for inline kinds.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Builtin(kind) => kind.fixed_size(),
            Self::Custom(_) => None,
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(kind) => write!(f, "TypeDescriptor({})", kind.name()),
            Self::Custom(custom) => write!(f, "TypeDescriptor(custom {})", custom.name()),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TypeKind> for TypeDescriptor {
    fn from(kind: TypeKind) -> Self {
        Self::Builtin(kind)
    }
}

/// Order two descriptors by registry index, then by name.
///
/// Unregistered caller types sort after everything registered.
pub fn compare_descriptors(a: &TypeDescriptor, b: &TypeDescriptor) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let ia = a.index().unwrap_or(usize::MAX);
    let ib = b.index().unwrap_or(usize::MAX);
    ia.cmp(&ib).then_with(|| a.name().cmp(b.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_kinds_have_sizes() {
        assert_eq!(TypeKind::Bool.fixed_size(), Some(1));
        assert_eq!(TypeKind::U128.fixed_size(), Some(16));
        assert_eq!(TypeKind::Double.fixed_size(), Some(8));
        assert!(TypeKind::String.data_is_pointer());
        assert!(TypeKind::Pointer.data_is_pointer());
        assert!(!TypeKind::Float.data_is_pointer());
    }

    #[test]
    fn test_string_like_boundary() {
        assert!(TypeDescriptor::BOOL.is_string_like());
        assert!(TypeDescriptor::BYTES.is_string_like());
        assert!(!TypeDescriptor::LIST.is_string_like());
        assert!(!TypeDescriptor::POINTER.is_string_like());
    }

    #[test]
    fn test_compare_descriptors_by_index() {
        assert_eq!(
            compare_descriptors(&TypeDescriptor::I32, &TypeDescriptor::STRING),
            Ordering::Less
        );
        assert_eq!(
            compare_descriptors(&TypeDescriptor::VECTOR, &TypeDescriptor::LIST),
            Ordering::Greater
        );
        assert_eq!(
            compare_descriptors(&TypeDescriptor::BYTES, &TypeDescriptor::BYTES),
            Ordering::Equal
        );
    }
}
