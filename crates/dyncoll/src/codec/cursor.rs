// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Little-endian cursors over blob buffers.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use bytes::Bytes;

use crate::error::{Error, Result};

/// Generate bounds-checked little-endian reads.
macro_rules! impl_read_le {
    ($($name:ident => $type:ty, $size:expr, $decode:path;)*) => {
        $(
            pub fn $name(&mut self) -> Result<$type> {
                Ok($decode(self.take($size)?))
            }
        )*
    };
}

/// Generate little-endian appends.
macro_rules! impl_write_le {
    ($($name:ident => $type:ty;)*) => {
        $(
            pub fn $name(&mut self, value: $type) -> Result<()> {
                self.buffer.$name::<LittleEndian>(value)?;
                Ok(())
            }
        )*
    };
}

/// Read cursor over a shared buffer.
///
/// Slices taken with [`shared`](Self::shared) alias the source allocation.
pub(crate) struct BlobReader<'a> {
    source: &'a Bytes,
    offset: usize,
}

impl<'a> BlobReader<'a> {
    pub fn new(source: &'a Bytes) -> Self {
        Self { source, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.source.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::truncated(len, self.remaining()));
        }
        let source: &'a [u8] = self.source;
        let slice = &source[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Next `len` bytes as a view into the source buffer.
    pub fn shared(&mut self, len: usize) -> Result<Bytes> {
        if len > self.remaining() {
            return Err(Error::truncated(len, self.remaining()));
        }
        let view = self.source.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(view)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    /// Unread bytes, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        let source: &'a [u8] = self.source;
        &source[self.offset.min(source.len())..]
    }

    /// Unread bytes as a view into the source buffer, without advancing.
    pub fn rest_shared(&self) -> Bytes {
        self.source.slice(self.offset.min(self.source.len())..)
    }

    /// Distance to the next NUL byte.
    pub fn find_nul(&self) -> Result<usize> {
        self.rest()
            .iter()
            .position(|&byte| byte == 0)
            .ok_or_else(|| Error::truncated(self.remaining() + 1, self.remaining()))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    impl_read_le! {
        read_u16 => u16, 2, LittleEndian::read_u16;
        read_i16 => i16, 2, LittleEndian::read_i16;
        read_u32 => u32, 4, LittleEndian::read_u32;
        read_i32 => i32, 4, LittleEndian::read_i32;
        read_u64 => u64, 8, LittleEndian::read_u64;
        read_i64 => i64, 8, LittleEndian::read_i64;
        read_u128 => u128, 16, LittleEndian::read_u128;
        read_i128 => i128, 16, LittleEndian::read_i128;
        read_f32 => f32, 4, LittleEndian::read_f32;
        read_f64 => f64, 8, LittleEndian::read_f64;
    }
}

/// Growable write buffer.
#[derive(Debug, Default)]
pub(crate) struct BlobWriter {
    buffer: Vec<u8>,
}

impl BlobWriter {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buffer.write_u8(value)?;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.buffer.write_i8(value)?;
        Ok(())
    }

    impl_write_le! {
        write_u16 => u16;
        write_i16 => i16;
        write_u32 => u32;
        write_i32 => i32;
        write_u64 => u64;
        write_i64 => i64;
        write_u128 => u128;
        write_i128 => i128;
        write_f32 => f32;
        write_f64 => f64;
    }

    pub fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Direct access for encoders that append on their own.
    pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }

    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_little_endian() {
        let source = Bytes::from_static(&[0xBC, 0x4A, 0x0A, 0, 0, 0, 0xFF]);
        let mut reader = BlobReader::new(&source);
        assert_eq!(reader.read_u16().expect("u16"), 0x4ABC);
        assert_eq!(reader.read_u32().expect("u32"), 10);
        assert_eq!(reader.read_i8().expect("i8"), -1);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_short_read_reports_sizes() {
        let source = Bytes::from_static(&[1, 2, 3]);
        let mut reader = BlobReader::new(&source);
        let err = reader.read_u64().expect_err("short");
        assert!(matches!(
            err,
            Error::Truncated {
                needed: 8,
                available: 3
            }
        ));
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_shared_slices_alias_source() {
        let source = Bytes::from(b"hello\0world".to_vec());
        let mut reader = BlobReader::new(&source);
        assert_eq!(reader.find_nul().expect("nul"), 5);
        let view = reader.shared(5).expect("view");
        assert_eq!(view.as_ptr(), source.as_ptr());
        reader.skip(1).expect("skip");
        assert_eq!(reader.rest(), b"world");
        assert!(reader.find_nul().is_err());
    }

    #[test]
    fn test_writer_round_trip() {
        let mut writer = BlobWriter::new();
        writer.write_i16(-2).expect("i16");
        writer.write_f64(1.25).expect("f64");
        writer.write_u128(u128::MAX).expect("u128");
        assert_eq!(writer.len(), 26);

        let bytes = writer.into_bytes();
        let mut reader = BlobReader::new(&bytes);
        assert_eq!(reader.read_i16().expect("i16"), -2);
        assert_eq!(reader.read_f64().expect("f64"), 1.25);
        assert_eq!(reader.read_u128().expect("u128"), u128::MAX);
    }
}
