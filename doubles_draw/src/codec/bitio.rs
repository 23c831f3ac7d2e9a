//! Most-significant-bit-first bit writer and reader.

use super::errors::{CodecError, CodecResult};

/// Appends bit fields to a growing byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the low `count` bits of `value`, high bit first.
    pub fn write_bits(&mut self, value: u64, count: u32) {
        debug_assert!(count <= 64);
        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> (self.bit_len % 8);
            }
        }
        self.bit_len += 1;
    }

    /// Write a byte-length-prefixed UTF-8 string.
    ///
    /// The caller guarantees the string is at most 255 bytes long.
    pub fn write_str(&mut self, s: &str) {
        self.write_bits(s.len() as u64, 8);
        for &b in s.as_bytes() {
            self.write_bits(u64::from(b), 8);
        }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// The written bytes; the last byte is padded with zero bits.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Reads bit fields back from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.pos
    }

    pub fn read_bit(&mut self) -> CodecResult<bool> {
        let byte = self
            .bytes
            .get(self.pos / 8)
            .ok_or_else(|| CodecError::corrupt("unexpected end of data"))?;
        let bit = (byte & (0x80 >> (self.pos % 8))) != 0;
        self.pos += 1;
        Ok(bit)
    }

    pub fn read_bits(&mut self, count: u32) -> CodecResult<u64> {
        debug_assert!(count <= 64);
        if self.remaining() < count as usize {
            return Err(CodecError::corrupt("unexpected end of data"));
        }
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    pub fn read_str(&mut self) -> CodecResult<String> {
        let len = self.read_bits(8)? as usize;
        let bytes = (0..len)
            .map(|_| self.read_bits(8).map(|b| b as u8))
            .collect::<CodecResult<Vec<u8>>>()?;
        String::from_utf8(bytes).map_err(|_| CodecError::corrupt("invalid UTF-8 in string"))
    }

    /// Accept only zero padding, shorter than a byte, after the last field.
    pub fn finish(mut self) -> CodecResult<()> {
        if self.remaining() >= 8 {
            return Err(CodecError::corrupt("trailing data"));
        }
        while self.remaining() > 0 {
            if self.read_bit()? {
                return Err(CodecError::corrupt("non-zero padding"));
            }
        }
        Ok(())
    }
}

/// Bits needed to store every value in `0..count`, at least one.
pub fn width_for(count: usize) -> u32 {
    (usize::BITS - count.saturating_sub(1).leading_zeros()).max(1)
}
