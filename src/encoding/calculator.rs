// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Size calculator for ROS1-encoded data.
//!
//! Computes the encoded size of a message before encoding it, so callers can
//! pre-allocate buffers.

/// ROS1 size calculator.
///
/// # Example
///
/// ```
/// use robomsg::encoding::SizeCalculator;
///
/// let mut calc = SizeCalculator::new();
/// calc.time();         // 8 bytes
/// calc.sequence(3);    // 4 (length) + 3 bytes
/// calc.uint32();       // 4 bytes
/// assert_eq!(calc.size(), 19);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SizeCalculator {
    offset: usize,
}

impl SizeCalculator {
    /// Create a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current calculated size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.offset
    }

    /// Add `n` raw bytes.
    pub fn raw(&mut self, n: usize) -> usize {
        self.offset += n;
        self.offset
    }

    /// Calculate size for an 8-bit integer or bool.
    pub fn uint8(&mut self) -> usize {
        self.raw(1)
    }

    /// Calculate size for a 16-bit integer.
    pub fn uint16(&mut self) -> usize {
        self.raw(2)
    }

    /// Calculate size for a 32-bit integer or float.
    pub fn uint32(&mut self) -> usize {
        self.raw(4)
    }

    /// Calculate size for a 64-bit integer or double.
    pub fn uint64(&mut self) -> usize {
        self.raw(8)
    }

    /// Calculate size for a time or duration.
    pub fn time(&mut self) -> usize {
        self.raw(8)
    }

    /// Calculate size for a length prefix.
    pub fn sequence_length(&mut self) -> usize {
        self.uint32()
    }

    /// Calculate size for a length-prefixed byte sequence or string.
    ///
    /// # Arguments
    ///
    /// * `length` - The byte length of the content
    pub fn sequence(&mut self, length: usize) -> usize {
        self.sequence_length();
        self.raw(length)
    }
}
