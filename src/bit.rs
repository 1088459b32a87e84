use std::fmt::{Debug, Formatter};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("Out of bounds: requested {requested} bits, but only {available} bits available")]
    OutOfBounds { requested: usize, available: usize },
    #[error("Invalid width: {bits} bits (expected 1 to 64)")]
    InvalidWidth { bits: u32 },
}

/// Closed set of fixed-width reads a record layout can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    UIntLe32,
    UIntLe64,
    FloatLe32,
    FloatBe32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    UInt(u64),
    Float(f32),
}

#[inline(always)]
pub fn reverse_byte(byte: u8) -> u8 {
    byte.reverse_bits()
}

/// Reverses the bit order inside every byte. Byte order is left untouched.
pub fn reverse_bits(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&byte| reverse_byte(byte)).collect()
}

/// Read-only cursor over a byte slice, consuming bits MSB-first within each byte.
///
/// A read either consumes exactly the bits it asked for or fails without
/// moving the cursor.
#[derive(Clone)]
pub struct BitCursor<'a> {
    bytes: &'a [u8],
    bits: usize,
    bit_position: usize,
}

impl<'a> BitCursor<'a> {
    #[inline(always)]
    pub fn new(bytes: &'a [u8]) -> Self {
        BitCursor {
            bytes,
            bits: bytes.len() * 8,
            bit_position: 0,
        }
    }

    pub fn with_offset(bytes: &'a [u8], bit_offset: usize) -> Result<Self, ReadError> {
        let mut cursor = Self::new(bytes);
        if bit_offset > cursor.bits {
            return Err(ReadError::OutOfBounds {
                requested: bit_offset,
                available: cursor.bits,
            });
        }
        cursor.bit_position = bit_offset;
        Ok(cursor)
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.bit_position
    }

    #[inline(always)]
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bits - self.bit_position
    }

    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    #[inline(always)]
    fn ensure(&self, requested: usize) -> Result<(), ReadError> {
        let available = self.remaining();
        if requested > available {
            return Err(ReadError::OutOfBounds { requested, available });
        }
        Ok(())
    }

    #[inline(always)]
    fn check_width(bits: u32) -> Result<(), ReadError> {
        if bits == 0 || bits > 64 {
            return Err(ReadError::InvalidWidth { bits });
        }
        Ok(())
    }

    // Caller has already checked `count <= 64` and `count <= remaining()`.
    #[inline(always)]
    fn take(&mut self, count: u32) -> u64 {
        let mut value = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let byte = self.bytes[self.bit_position >> 3];
            let bit_offset = (self.bit_position & 7) as u32;
            let bits_in_this_byte = (8 - bit_offset).min(remaining);

            let mask = ((1u16 << bits_in_this_byte) - 1) as u8;
            let chunk = (byte >> (8 - bit_offset - bits_in_this_byte)) & mask;
            value = (value << bits_in_this_byte) | chunk as u64;

            self.bit_position += bits_in_this_byte as usize;
            remaining -= bits_in_this_byte;
        }

        value
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Result<bool, ReadError> {
        self.ensure(1)?;
        Ok(self.take(1) == 1)
    }

    #[inline(always)]
    pub fn read_uint_be(&mut self, bits: u32) -> Result<u64, ReadError> {
        Self::check_width(bits)?;
        self.ensure(bits as usize)?;
        Ok(self.take(bits))
    }

    /// Reads `bits` bits as 8-bit groups in stream order, least significant group first.
    /// A trailing group shorter than 8 bits supplies the most significant bits.
    pub fn read_uint_le(&mut self, bits: u32) -> Result<u64, ReadError> {
        Self::check_width(bits)?;
        self.ensure(bits as usize)?;

        let mut value = 0u64;
        let mut shift = 0u32;
        let mut remaining = bits;
        while remaining > 0 {
            let group = remaining.min(8);
            value |= self.take(group) << shift;
            shift += group;
            remaining -= group;
        }

        Ok(value)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, ReadError> {
        let requested = count.checked_mul(8).ok_or(ReadError::OutOfBounds {
            requested: usize::MAX,
            available: self.remaining(),
        })?;
        self.ensure(requested)?;

        Ok((0..count).map(|_| self.take(8) as u8).collect())
    }

    /// Reads `bits` raw bits into whole bytes; the last byte is zero-padded in its low bits.
    pub fn read_bit_run(&mut self, bits: u32) -> Result<Vec<u8>, ReadError> {
        Self::check_width(bits)?;
        self.ensure(bits as usize)?;

        let mut run = Vec::with_capacity(bits.div_ceil(8) as usize);
        let mut remaining = bits;
        while remaining > 0 {
            let group = remaining.min(8);
            run.push((self.take(group) << (8 - group)) as u8);
            remaining -= group;
        }

        Ok(run)
    }

    /// Reads `bits` bits stored MSB-first per byte and assembles them least significant bit first.
    pub fn read_reversed_uint(&mut self, bits: u32) -> Result<u64, ReadError> {
        let run = reverse_bits(&self.read_bit_run(bits)?);
        let mut le_bytes = [0u8; 8];
        le_bytes[..run.len()].copy_from_slice(&run);
        Ok(u64::from_le_bytes(le_bytes))
    }

    #[inline(always)]
    pub fn read_f32_le(&mut self) -> Result<f32, ReadError> {
        Ok(f32::from_bits(self.read_uint_le(32)? as u32))
    }

    #[inline(always)]
    pub fn read_f32_be(&mut self) -> Result<f32, ReadError> {
        Ok(f32::from_bits(self.read_uint_be(32)? as u32))
    }

    pub fn read_primitive(&mut self, primitive: Primitive) -> Result<Value, ReadError> {
        Ok(match primitive {
            Primitive::Bool => Value::Bool(self.read_bit()?),
            Primitive::UIntLe32 => Value::UInt(self.read_uint_le(32)?),
            Primitive::UIntLe64 => Value::UInt(self.read_uint_le(64)?),
            Primitive::FloatLe32 => Value::Float(self.read_f32_le()?),
            Primitive::FloatBe32 => Value::Float(self.read_f32_be()?),
        })
    }
}

impl<'a> Debug for BitCursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut binary_string = String::new();
        for byte in self.bytes {
            binary_string.push_str(&format!("{:08b}, ", byte));
        }
        binary_string.pop();
        binary_string.pop();
        write!(f, "BitCursor {{\n\tbytes: {:?},\n\tbits: [{}],\n\tbit_position: {}\n}}", self.bytes, binary_string, self.bit_position)
    }
}
