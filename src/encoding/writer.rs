// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire writer for ROS1-encoded data.
//!
//! Writes into a caller-supplied slice; the writer never grows or allocates.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, Result};

/// Little-endian writer over a borrowed mutable buffer.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robomsg::encoding::WireWriter;
///
/// let mut buf = [0u8; 6];
/// let mut writer = WireWriter::new(&mut buf, 0);
/// writer.write_u32(42)?;
/// writer.write_u16(7)?;
/// assert_eq!(writer.position(), 6);
/// assert_eq!(buf, [42, 0, 0, 0, 7, 0]);
/// # Ok(())
/// # }
/// ```
pub struct WireWriter<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> WireWriter<'a> {
    /// Create a writer starting at `offset`.
    pub fn new(buffer: &'a mut [u8], offset: usize) -> Self {
        Self { buffer, offset }
    }

    /// Current write position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Space left in the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    fn reserve(&mut self, n: usize) -> Result<&mut [u8]> {
        if n > self.remaining() {
            return Err(CodecError::BufferOverflow {
                required: n,
                offset: self.offset,
                buffer_len: self.buffer.len(),
            });
        }
        let start = self.offset;
        self.offset += n;
        Ok(&mut self.buffer[start..start + n])
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Write a u32 length prefix.
    pub fn write_length(&mut self, length: usize, field: &str) -> Result<()> {
        let length = u32::try_from(length).map_err(|_| {
            CodecError::type_mismatch(field, "length below 2^32", length.to_string())
        })?;
        self.write_u32(length)
    }

    /// Write a bool as a single 0/1 byte.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    /// Write a u8.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.reserve(1)?[0] = value;
        Ok(())
    }

    /// Write an i8.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write a u16.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        LittleEndian::write_u16(self.reserve(2)?, value);
        Ok(())
    }

    /// Write an i16.
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        LittleEndian::write_i16(self.reserve(2)?, value);
        Ok(())
    }

    /// Write a u32.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        LittleEndian::write_u32(self.reserve(4)?, value);
        Ok(())
    }

    /// Write an i32.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        LittleEndian::write_i32(self.reserve(4)?, value);
        Ok(())
    }

    /// Write a u64.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        LittleEndian::write_u64(self.reserve(8)?, value);
        Ok(())
    }

    /// Write an i64.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        LittleEndian::write_i64(self.reserve(8)?, value);
        Ok(())
    }

    /// Write an f32.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        LittleEndian::write_f32(self.reserve(4)?, value);
        Ok(())
    }

    /// Write an f64.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        LittleEndian::write_f64(self.reserve(8)?, value);
        Ok(())
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str, field: &str) -> Result<()> {
        self.write_length(value.len(), field)?;
        self.write_bytes(value.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_scalars() {
        let mut buf = [0u8; 14];
        let mut writer = WireWriter::new(&mut buf, 0);
        writer.write_i16(-2).unwrap();
        writer.write_f32(1.5).unwrap();
        writer.write_u64(1).unwrap();
        assert_eq!(writer.position(), 14);
        assert_eq!(
            buf,
            [0xFE, 0xFF, 0x00, 0x00, 0xC0, 0x3F, 1, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_write_at_offset_leaves_prefix() {
        let mut buf = [0xEEu8; 4];
        let mut writer = WireWriter::new(&mut buf, 2);
        writer.write_u16(0x0102).unwrap();
        assert_eq!(buf, [0xEE, 0xEE, 0x02, 0x01]);
    }

    #[test]
    fn test_overflow() {
        let mut buf = [0u8; 3];
        let mut writer = WireWriter::new(&mut buf, 0);
        let err = writer.write_u32(1).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferOverflow {
                required: 4,
                offset: 0,
                buffer_len: 3
            }
        );
        assert_eq!(writer.position(), 0);
    }

    #[test]
    fn test_write_string() {
        let mut buf = [0u8; 7];
        let mut writer = WireWriter::new(&mut buf, 0);
        writer.write_string("map", "frame_id").unwrap();
        assert_eq!(buf, [3, 0, 0, 0, b'm', b'a', b'p']);
    }
}
