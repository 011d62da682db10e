// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire cursor for reading ROS1-encoded data.
//!
//! ROS1 messages are a flat little-endian concatenation of their fields with
//! no alignment padding, so the cursor only tracks a read offset. Every read
//! takes the name of the field it belongs to so errors can point at it.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, Result};

/// Largest count accepted for a length-prefixed sequence of zero-sized
/// elements, which the remaining bytes cannot bound.
pub const MAX_ZERO_SIZED_ELEMENTS: usize = 1 << 16;

/// Cursor over a borrowed buffer.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robomsg::encoding::WireCursor;
///
/// let data = [0x2A, 0x00, 0x00, 0x00, 0x07];
/// let mut cursor = WireCursor::new(&data, 0);
/// assert_eq!(cursor.read_u32("size")?, 42);
/// assert_eq!(cursor.read_u8("flag")?, 7);
/// assert!(cursor.is_at_end());
/// # Ok(())
/// # }
/// ```
pub struct WireCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WireCursor<'a> {
    /// Create a cursor starting at `offset`.
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Take the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize, field: &str) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::truncated(
                field,
                n,
                self.remaining(),
                self.offset,
            ));
        }
        let data: &'a [u8] = self.data;
        let bytes = &data[self.offset..self.offset + n];
        self.offset += n;
        Ok(bytes)
    }

    /// Read a u32 length prefix and check that `length * min_element_size`
    /// bytes can still follow it.
    ///
    /// With `min_element_size == 0` the count is capped at
    /// [`MAX_ZERO_SIZED_ELEMENTS`] instead.
    pub fn read_length(&mut self, min_element_size: usize, field: &str) -> Result<usize> {
        let length = self.read_u32(field)? as usize;
        let fits = match min_element_size {
            0 => length <= MAX_ZERO_SIZED_ELEMENTS,
            n => length.saturating_mul(n) <= self.remaining(),
        };
        if !fits {
            return Err(CodecError::malformed_length(
                field,
                length,
                self.offset,
                self.data.len(),
            ));
        }
        Ok(length)
    }

    /// Read a bool (any non-zero byte is true).
    pub fn read_bool(&mut self, field: &str) -> Result<bool> {
        Ok(self.read_u8(field)? != 0)
    }

    /// Read a u8.
    pub fn read_u8(&mut self, field: &str) -> Result<u8> {
        Ok(self.read_bytes(1, field)?[0])
    }

    /// Read an i8.
    pub fn read_i8(&mut self, field: &str) -> Result<i8> {
        Ok(self.read_u8(field)? as i8)
    }

    /// Read a u16.
    pub fn read_u16(&mut self, field: &str) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2, field)?))
    }

    /// Read an i16.
    pub fn read_i16(&mut self, field: &str) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes(2, field)?))
    }

    /// Read a u32.
    pub fn read_u32(&mut self, field: &str) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4, field)?))
    }

    /// Read an i32.
    pub fn read_i32(&mut self, field: &str) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4, field)?))
    }

    /// Read a u64.
    pub fn read_u64(&mut self, field: &str) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.read_bytes(8, field)?))
    }

    /// Read an i64.
    pub fn read_i64(&mut self, field: &str) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(8, field)?))
    }

    /// Read an f32.
    pub fn read_f32(&mut self, field: &str) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(4, field)?))
    }

    /// Read an f64.
    pub fn read_f64(&mut self, field: &str) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.read_bytes(8, field)?))
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self, field: &str) -> Result<String> {
        let len = self.read_length(1, field)?;
        let start = self.offset;
        let bytes = self.read_bytes(len, field)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| CodecError::InvalidString {
                field: field.to_string(),
                offset: start,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scalars() {
        let data: Vec<u8> = vec![
            0x34, 0x12, // u16 = 0x1234
            0xFE, 0xFF, 0xFF, 0xFF, // i32 = -2
            0x00, 0x00, 0xC0, 0x3F, // f32 = 1.5
        ];
        let mut cursor = WireCursor::new(&data, 0);
        assert_eq!(cursor.read_u16("a").unwrap(), 0x1234);
        assert_eq!(cursor.read_i32("b").unwrap(), -2);
        assert_eq!(cursor.read_f32("c").unwrap(), 1.5);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_start_offset() {
        let data = [0xAA, 0xBB, 0x01, 0x00];
        let mut cursor = WireCursor::new(&data, 2);
        assert_eq!(cursor.read_u16("x").unwrap(), 1);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_truncated_read() {
        let data = [0x01, 0x02];
        let mut cursor = WireCursor::new(&data, 0);
        let err = cursor.read_u32("size").unwrap_err();
        assert_eq!(err, CodecError::truncated("size", 4, 2, 0));
        // Failed reads do not advance.
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_offset_past_end() {
        let data = [0x01];
        let mut cursor = WireCursor::new(&data, 5);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.read_u8("x").unwrap_err().is_truncation());
    }

    #[test]
    fn test_malformed_length() {
        // Claims 100 bytes, only 2 follow.
        let data = [100, 0, 0, 0, 1, 2];
        let mut cursor = WireCursor::new(&data, 0);
        let err = cursor.read_length(1, "data").unwrap_err();
        assert!(matches!(
            err,
            CodecError::MalformedLength {
                length: 100,
                offset: 4,
                buffer_len: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_length_with_element_size() {
        // Two float32 elements need 8 bytes, only 4 present.
        let data = [2, 0, 0, 0, 0, 0, 0, 0];
        let mut cursor = WireCursor::new(&data, 0);
        assert!(matches!(
            cursor.read_length(4, "samples"),
            Err(CodecError::MalformedLength { .. })
        ));
    }

    #[test]
    fn test_zero_sized_length_cap() {
        let data = (MAX_ZERO_SIZED_ELEMENTS as u32).to_le_bytes();
        let mut cursor = WireCursor::new(&data, 0);
        assert_eq!(cursor.read_length(0, "items").unwrap(), MAX_ZERO_SIZED_ELEMENTS);

        let data = (MAX_ZERO_SIZED_ELEMENTS as u32 + 1).to_le_bytes();
        let mut cursor = WireCursor::new(&data, 0);
        assert!(matches!(
            cursor.read_length(0, "items"),
            Err(CodecError::MalformedLength { offset: 4, .. })
        ));
    }

    #[test]
    fn test_read_string() {
        let data = [5, 0, 0, 0, b'l', b'i', b'd', b'a', b'r'];
        let mut cursor = WireCursor::new(&data, 0);
        assert_eq!(cursor.read_string("frame_id").unwrap(), "lidar");
    }

    #[test]
    fn test_read_invalid_string() {
        let data = [2, 0, 0, 0, 0xC3, 0x28];
        let mut cursor = WireCursor::new(&data, 0);
        assert!(matches!(
            cursor.read_string("frame_id"),
            Err(CodecError::InvalidString { offset: 4, .. })
        ));
    }
}
