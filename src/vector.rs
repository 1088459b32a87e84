use crate::bit::{reverse_byte, BitCursor};
use crate::errors::DecodeError;
use crate::int::decode_serialized_int;

/// Delta-encoded position or rotation, recentred around zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SerializedVector {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ByteVector {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

// Widest component that still fits an i32 after the bias is removed.
const MAX_COMPONENT_BITS: u32 = 32;

/// Decodes a quantized vector whose per-axis width is given by a bounded prefix.
///
/// The prefix `numbits` is a serialized int bounded by `bound`. Each axis is then
/// `numbits + 2` bits, assembled least significant bit first, minus `1 << (numbits + 1)`.
pub fn decode_serialized_vector(cursor: &mut BitCursor<'_>, bound: u64) -> Result<SerializedVector, DecodeError> {
    if bound == 0 {
        return Err(DecodeError::InvalidBound { max_value: bound });
    }
    // Largest width the prefix can select.
    let widest = bound.saturating_add(2);
    if widest > MAX_COMPONENT_BITS as u64 {
        return Err(DecodeError::InvalidWidth { bits: widest.min(u32::MAX as u64) as u32 });
    }

    let start = cursor.position();
    let numbits = decode_serialized_int(cursor, bound)? as u32;
    let bias = 1i64 << (numbits + 1);
    let width = numbits + 2;

    let mut axis = || -> Result<i32, DecodeError> {
        let raw = cursor.read_reversed_uint(width)? as i64;
        Ok((raw - bias) as i32)
    };
    let vector = SerializedVector {
        x: axis()?,
        y: axis()?,
        z: axis()?,
    };

    tracing::trace!(start, numbits, ?vector, "serialized vector");
    Ok(vector)
}

/// Decodes three optional bytes, each behind a presence bit and stored bit-reversed.
pub fn decode_byte_vector(cursor: &mut BitCursor<'_>) -> Result<ByteVector, DecodeError> {
    let start = cursor.position();

    let mut component = || -> Result<u8, DecodeError> {
        if cursor.read_bit()? {
            Ok(reverse_byte(cursor.read_uint_be(8)? as u8))
        } else {
            Ok(0)
        }
    };
    let vector = ByteVector {
        x: component()?,
        y: component()?,
        z: component()?,
    };

    tracing::trace!(start, ?vector, "byte vector");
    Ok(vector)
}
