// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Container framing: header and entry loop.

use bytes::Bytes;

use super::cursor::{BlobReader, BlobWriter};
use super::value::{descriptor_for, read_value, wire_index, write_value};
use super::Decoded;
use crate::config::{DecodeOptions, BLOB_HEADER_LEN, BLOB_MAGIC, BLOB_VERSION};
use crate::error::{Error, Result};
use crate::list::List;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::vector::Vector;

fn write_header(out: &mut BlobWriter, key_type: &TypeDescriptor, count: usize) -> Result<()> {
    out.write_u16(BLOB_MAGIC)?;
    out.write_u32(BLOB_VERSION)?;
    out.write_i16(wire_index(key_type)?)?;
    out.write_u64(count as u64)
}

fn write_entry(
    out: &mut BlobWriter,
    key_type: &TypeDescriptor,
    key: Option<&Value>,
    value: &Value,
) -> Result<()> {
    out.write_i16(wire_index(&value.type_descriptor())?)?;
    write_value(out, value)?;
    match key {
        Some(key) => write_value(out, key),
        None => write_value(out, &Value::default_for(key_type)),
    }
}

pub(super) fn write_list(out: &mut BlobWriter, list: &List) -> Result<()> {
    write_header(out, list.key_type(), list.len())?;
    for node in list {
        write_entry(out, list.key_type(), Some(node.key()), node.value())?;
    }
    Ok(())
}

pub(super) fn write_vector(out: &mut BlobWriter, vector: &Vector) -> Result<()> {
    write_header(out, vector.key_type(), vector.populated())?;
    for entry in vector.iter() {
        write_entry(out, vector.key_type(), entry.key(), entry.value())?;
    }
    Ok(())
}

/// Validate the header and return the key type and declared entry count.
fn read_header(reader: &mut BlobReader<'_>) -> Result<(TypeDescriptor, u64)> {
    if reader.remaining() < BLOB_HEADER_LEN {
        return Err(Error::truncated(BLOB_HEADER_LEN, reader.remaining()));
    }
    let magic = reader.read_u16()?;
    if magic != BLOB_MAGIC {
        return Err(Error::BadMagic(magic));
    }
    let version = reader.read_u32()?;
    if version != BLOB_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }
    let key_type = descriptor_for(reader.read_i16()?)?;
    let count = reader.read_u64()?;
    Ok((key_type, count))
}

/// Run the entry loop, handing each decoded pair to `insert`.
///
/// Header problems are hard errors; anything after the header stops the
/// loop and is reported through [`Decoded::truncated`].
fn decode_entries<F>(
    source: &Bytes,
    options: &DecodeOptions,
    depth: usize,
    build: impl FnOnce(TypeDescriptor) -> F,
) -> Result<Decoded<F>>
where
    F: EntrySink,
{
    if depth > options.max_depth {
        return Err(Error::DepthExceeded(options.max_depth));
    }
    let mut reader = BlobReader::new(source);
    let (key_type, declared) = read_header(&mut reader)?;
    let mut sink = build(key_type.clone());

    let mut consumed = reader.offset();
    let mut entries = 0_u64;
    let mut truncated = None;
    while !reader.is_eof() && entries < declared {
        let step = read_entry(&mut reader, &key_type, options, depth, &mut sink);
        if let Err(err) = step {
            log::warn!(
                "[codec] entry {} of {} unreadable at offset {}: {}",
                entries,
                declared,
                consumed,
                err
            );
            truncated = Some(err);
            break;
        }
        entries += 1;
        consumed = reader.offset();
    }

    if truncated.is_none() && entries < declared {
        log::warn!(
            "[codec] blob ended after {} of {} entries",
            entries,
            declared
        );
        truncated = Some(Error::Malformed {
            format: "blob",
            reason: format!("expected {} entries, found {}", declared, entries),
        });
    }

    Ok(Decoded {
        value: sink,
        consumed,
        truncated,
    })
}

fn read_entry<F: EntrySink>(
    reader: &mut BlobReader<'_>,
    key_type: &TypeDescriptor,
    options: &DecodeOptions,
    depth: usize,
    sink: &mut F,
) -> Result<()> {
    let value_type = descriptor_for(reader.read_i16()?)?;
    let value = read_value(&value_type, reader, options, depth)?;
    let key = read_value(key_type, reader, options, depth)?;
    sink.insert(key, value)
}

trait EntrySink {
    fn insert(&mut self, key: Value, value: Value) -> Result<()>;
}

impl EntrySink for List {
    fn insert(&mut self, key: Value, value: Value) -> Result<()> {
        self.add_back(key, value).map(|_| ())
    }
}

impl EntrySink for Vector {
    fn insert(&mut self, key: Value, value: Value) -> Result<()> {
        self.kv_add_entry(key, value)
    }
}

pub(super) fn decode_list(
    source: &Bytes,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Decoded<List>> {
    decode_entries(source, options, depth, List::new)
}

pub(super) fn decode_vector(
    source: &Bytes,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Decoded<Vector>> {
    decode_entries(source, options, depth, Vector::with_key_type)
}

impl List {
    /// Encode into a self-describing blob.
    pub fn to_blob(&self) -> Result<Bytes> {
        let mut out = BlobWriter::new();
        write_list(&mut out, self)?;
        Ok(out.into_bytes())
    }

    /// Decode a blob produced by [`List::to_blob`].
    ///
    /// Fails outright only when the header is unusable; otherwise returns
    /// whatever entries could be read.
    pub fn from_blob(source: &Bytes, options: DecodeOptions) -> Result<Decoded<List>> {
        decode_list(source, &options, 0)
    }
}

impl Vector {
    /// Encode into a self-describing blob. Holes are skipped.
    pub fn to_blob(&self) -> Result<Bytes> {
        let mut out = BlobWriter::new();
        write_vector(&mut out, self)?;
        Ok(out.into_bytes())
    }

    /// Decode a blob produced by [`Vector::to_blob`] into a keyed vector
    /// with entries packed from index 0.
    pub fn from_blob(source: &Bytes, options: DecodeOptions) -> Result<Decoded<Vector>> {
        decode_vector(source, &options, 0)
    }
}

/// Decode a list blob held in a plain slice; the payloads are copied.
pub fn list_from_slice(source: &[u8]) -> Result<Decoded<List>> {
    List::from_blob(&Bytes::copy_from_slice(source), DecodeOptions::copying())
}

/// Decode a vector blob held in a plain slice; the payloads are copied.
pub fn vector_from_slice(source: &[u8]) -> Result<Decoded<Vector>> {
    Vector::from_blob(&Bytes::copy_from_slice(source), DecodeOptions::copying())
}
