// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-value payloads.

use bytes::Bytes;

use super::container;
use super::cursor::{BlobReader, BlobWriter};
use crate::config::{DecodeOptions, BYTES_PREFIX_LEN, POINTER_WIDTH};
use crate::error::{Error, Result};
use crate::list::List;
use crate::types::{descriptor_at, TypeDescriptor, TypeKind};
use crate::value::{Text, Value};
use crate::vector::Vector;

/// Registry index of `descriptor` in its wire width.
pub(super) fn wire_index(descriptor: &TypeDescriptor) -> Result<i16> {
    let index = descriptor.index().ok_or_else(|| {
        Error::UnsupportedType(format!("{} is not registered", descriptor.name()))
    })?;
    i16::try_from(index).map_err(|_| Error::UnknownTypeIndex(index as i64))
}

/// Descriptor for a wire index.
pub(super) fn descriptor_for(index: i16) -> Result<TypeDescriptor> {
    let slot = usize::try_from(index).map_err(|_| Error::UnknownTypeIndex(i64::from(index)))?;
    descriptor_at(slot)
}

pub(super) fn write_value(out: &mut BlobWriter, value: &Value) -> Result<()> {
    match value {
        Value::Bool(v) => out.write_u8(u8::from(*v)),
        Value::I8(v) => out.write_i8(*v),
        Value::U8(v) => out.write_u8(*v),
        Value::I16(v) => out.write_i16(*v),
        Value::U16(v) => out.write_u16(*v),
        Value::I32(v) => out.write_i32(*v),
        Value::U32(v) => out.write_u32(*v),
        Value::I64(v) => out.write_i64(*v),
        Value::U64(v) => out.write_u64(*v),
        Value::I128(v) => out.write_i128(*v),
        Value::U128(v) => out.write_u128(*v),
        Value::Float(v) => out.write_f32(*v),
        Value::Double(v) => out.write_f64(*v),
        Value::String(text) | Value::StringCi(text) => {
            out.write_raw(text.as_bytes())?;
            out.write_u8(0)
        }
        Value::Bytes(data) => {
            let length = data.len() as u64;
            out.write_u64(length)?;
            out.write_u64(length + 1)?;
            out.write_raw(data)?;
            out.write_u8(0)
        }
        Value::List(list) => container::write_list(out, list),
        Value::Vector(vector) => container::write_vector(out, vector),
        Value::Null => out.write_raw(&[0; POINTER_WIDTH]),
        Value::Custom(custom) => {
            custom.write_blob(out.buffer_mut());
            Ok(())
        }
    }
}

/// Decode one payload of type `descriptor`.
///
/// A nested container that decodes only partially is reported as an error.
pub(super) fn read_value(
    descriptor: &TypeDescriptor,
    reader: &mut BlobReader<'_>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Value> {
    let kind = match descriptor {
        TypeDescriptor::Builtin(kind) => *kind,
        TypeDescriptor::Custom(custom) => {
            let (value, used) = custom.read_blob(reader.rest())?;
            reader.skip(used)?;
            return Ok(Value::Custom(value));
        }
    };

    let value = match kind {
        TypeKind::Bool => Value::Bool(reader.read_u8()? != 0),
        TypeKind::I8 => Value::I8(reader.read_i8()?),
        TypeKind::U8 => Value::U8(reader.read_u8()?),
        TypeKind::I16 => Value::I16(reader.read_i16()?),
        TypeKind::U16 => Value::U16(reader.read_u16()?),
        TypeKind::I32 => Value::I32(reader.read_i32()?),
        TypeKind::U32 => Value::U32(reader.read_u32()?),
        TypeKind::I64 => Value::I64(reader.read_i64()?),
        TypeKind::U64 => Value::U64(reader.read_u64()?),
        TypeKind::I128 => Value::I128(reader.read_i128()?),
        TypeKind::U128 => Value::U128(reader.read_u128()?),
        TypeKind::Float => Value::Float(reader.read_f32()?),
        TypeKind::Double => Value::Double(reader.read_f64()?),
        TypeKind::String => Value::String(read_text(reader, options)?),
        TypeKind::StringCi => Value::StringCi(read_text(reader, options)?),
        TypeKind::Bytes => Value::Bytes(read_bytes(reader, options)?),
        TypeKind::Pointer => {
            let address = reader.read_u64()?;
            if address != 0 {
                return Err(Error::Malformed {
                    format: "blob",
                    reason: format!("pointer value 0x{:X} cannot be restored", address),
                });
            }
            Value::Null
        }
        TypeKind::List => {
            let nested = container::decode_list(&reader.rest_shared(), options, depth + 1)?;
            reader.skip(nested.consumed)?;
            Value::List(Box::new(nested.into_complete()?))
        }
        TypeKind::Vector => {
            let nested = container::decode_vector(&reader.rest_shared(), options, depth + 1)?;
            reader.skip(nested.consumed)?;
            Value::Vector(Box::new(nested.into_complete()?))
        }
    };
    Ok(value)
}

fn payload(reader: &mut BlobReader<'_>, len: usize, options: &DecodeOptions) -> Result<Bytes> {
    if options.in_place {
        reader.shared(len)
    } else {
        Ok(Bytes::copy_from_slice(reader.take(len)?))
    }
}

fn read_text(reader: &mut BlobReader<'_>, options: &DecodeOptions) -> Result<Text> {
    let len = reader.find_nul()?;
    let text = Text::from_utf8(payload(reader, len, options)?)?;
    reader.skip(1)?;
    Ok(text)
}

fn read_bytes(reader: &mut BlobReader<'_>, options: &DecodeOptions) -> Result<Bytes> {
    if reader.remaining() < BYTES_PREFIX_LEN {
        return Err(Error::truncated(BYTES_PREFIX_LEN, reader.remaining()));
    }
    let length = reader.read_u64()?;
    let size = reader.read_u64()?;
    if size < length {
        return Err(Error::Malformed {
            format: "blob",
            reason: format!("bytes size {} smaller than length {}", size, length),
        });
    }
    let length = usize::try_from(length)
        .map_err(|_| Error::truncated(usize::MAX, reader.remaining()))?;
    let padding = usize::try_from(size)
        .map_err(|_| Error::truncated(usize::MAX, reader.remaining()))?
        - length;
    let data = payload(reader, length, options)?;
    reader.skip(padding)?;
    Ok(data)
}
