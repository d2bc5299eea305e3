//! # Bit Codec
//!
//! Writer/reader cursors over a dense, non-byte-aligned bit stream.
//!
//! The sync payload packs every field back to back with no padding, each at
//! the width declared in [`DataWidth`]. Bits fill each byte LSB-first, so a
//! 4-bit field followed by a 3-bit field occupies the low seven bits of the
//! first byte.
//!
//! ## Contracts
//! - **Round trip**: writing any `(value, width)` sequence and reading the
//!   identical width sequence reproduces every value, masked to its width.
//! - **Truncation**: values wider than their field are silently masked to
//!   the low `width` bits. Widths are chosen to exactly bound each field's
//!   legal range, so overflow indicates a caller bug, not stream corruption.
//! - **Exhaustion**: reading past the end of the buffer is a hard decode
//!   failure ([`ClusterError::ShortPayload`]), never a silent wrap.

use crate::core::widths::DataWidth;
use crate::error::{ClusterError, Result};

/// Appends unsigned integers of arbitrary bit width to a growable buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    bits: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the byte buffer for an expected payload.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            bits: 0,
        }
    }

    /// Appends the low bits of `value` at the width declared for `width`.
    pub fn write(&mut self, value: u32, width: DataWidth) {
        self.write_bits(value, width.bit_count());
    }

    /// Appends the low `count` bits of `value`, LSB-first.
    pub fn write_bits(&mut self, value: u32, count: u32) {
        debug_assert!(count <= 32);
        for i in 0..count {
            if self.bits % 8 == 0 {
                self.buf.push(0);
            }
            if (value >> i) & 1 != 0 {
                self.buf[self.bits / 8] |= 1 << (self.bits % 8);
            }
            self.bits += 1;
        }
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// The encoded stream, final partial byte zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Consumes unsigned integers from a fully-received bit stream.
///
/// The buffer is treated as an immutable unit; partial or streaming decode
/// is not supported.
#[derive(Debug)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Reads one field at the width declared for `width`.
    pub fn read(&mut self, width: DataWidth) -> Result<u32> {
        self.read_bits(width.bit_count())
    }

    /// Reads `count` bits in the order they were written.
    pub fn read_bits(&mut self, count: u32) -> Result<u32> {
        debug_assert!(count <= 32);
        let remaining = self.remaining_bits();
        if count as usize > remaining {
            return Err(ClusterError::ShortPayload {
                needed: count as usize,
                remaining,
            });
        }
        let mut value = 0u32;
        for i in 0..count {
            let bit = (self.buf[self.pos / 8] >> (self.pos % 8)) & 1;
            value |= u32::from(bit) << i;
            self.pos += 1;
        }
        Ok(value)
    }

    /// Bits left before the stream is exhausted.
    pub fn remaining_bits(&self) -> usize {
        self.buf.len() * 8 - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_bits() == 0
    }
}
