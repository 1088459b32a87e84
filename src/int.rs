//! Bounded integers whose width is derived from their upper bound.
//!
//! Bits are accumulated least significant first. Before each bit the decoder
//! checks whether setting it could still produce a value inside the bound and
//! stops reading when it could not, mirroring the encoder, which never writes
//! such bits.

use crate::bit::BitCursor;
use crate::errors::DecodeError;

/// `ceil(log2(max_value))`, computed exactly. Zero for a bound of one.
#[inline(always)]
pub fn ceil_log2(max_value: u64) -> u32 {
    if max_value <= 1 {
        0
    } else {
        u64::BITS - (max_value - 1).leading_zeros()
    }
}

/// `floor(log2(max_value)) + 1`, the number of significant bits.
#[inline(always)]
pub fn bit_length(max_value: u64) -> u32 {
    u64::BITS - max_value.leading_zeros()
}

/// Decodes a value in `[0, max_value]`, reading at most `ceil(log2(max_value))` bits.
pub fn decode_serialized_int(cursor: &mut BitCursor<'_>, max_value: u64) -> Result<u64, DecodeError> {
    if max_value == 0 {
        return Err(DecodeError::InvalidBound { max_value });
    }

    let start = cursor.position();
    let max_bits = ceil_log2(max_value);
    let mut value = 0u64;
    let mut i = 0;

    while i < max_bits {
        match value.checked_add(1 << i) {
            Some(candidate) if candidate <= max_value => {}
            _ => break,
        }
        if cursor.read_bit()? {
            value += 1 << i;
        }
        i += 1;
    }

    tracing::trace!(start, bits = cursor.position() - start, max_value, value, "serialized int");
    Ok(value)
}

/// Decodes a value in `[0, max_value)`, reading at most `floor(log2(max_value)) + 1` bits.
///
/// Unlike [`decode_serialized_int`] the bound is exclusive, so the two disagree
/// on width for exact powers of two.
pub fn decode_int32_max(cursor: &mut BitCursor<'_>, max_value: u64) -> Result<u64, DecodeError> {
    if max_value == 0 {
        return Err(DecodeError::InvalidBound { max_value });
    }

    let start = cursor.position();
    let max_bits = bit_length(max_value);
    let mut value = 0u64;
    let mut i = 0;

    while i < max_bits {
        match value.checked_add(1 << i) {
            Some(candidate) if candidate < max_value => {}
            _ => break,
        }
        if cursor.read_bit()? {
            value += 1 << i;
        }
        i += 1;
    }

    if value > max_value {
        return Err(DecodeError::BoundOverflow { value, max_value });
    }

    tracing::trace!(start, bits = cursor.position() - start, max_value, value, "int32 max");
    Ok(value)
}
