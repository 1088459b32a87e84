//! Quantized floats.
//!
//! A float is stored as a `numbits`-wide serialized int centred on
//! `1 << (numbits - 1)` and scaled so that `max_bit_value` maps onto
//! `max_value`. The branch on `max_value > max_bit_value` and the order of
//! the divisions are part of the format: changing either changes the low bits
//! of the result.

use crate::bit::BitCursor;
use crate::config::FloatQuantization;
use crate::errors::DecodeError;
use crate::int::decode_serialized_int;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

const MIN_FLOAT_BITS: u32 = 2;
const MAX_FLOAT_BITS: u32 = 32;

pub fn decode_float(cursor: &mut BitCursor<'_>, quantization: FloatQuantization) -> Result<f64, DecodeError> {
    let FloatQuantization { max_value, numbits } = quantization;
    if !(MIN_FLOAT_BITS..=MAX_FLOAT_BITS).contains(&numbits) {
        return Err(DecodeError::InvalidWidth { bits: numbits });
    }
    if max_value == 0 {
        return Err(DecodeError::InvalidBound { max_value: 0 });
    }

    let max_bit_value = (1i64 << (numbits - 1)) - 1;
    let bias = 1i64 << (numbits - 1);
    let ser_int_max = 1u64 << numbits;

    let start = cursor.position();
    let delta = decode_serialized_int(cursor, ser_int_max)? as i64;
    let unscaled_value = delta - bias;

    let value = if i64::from(max_value) > max_bit_value {
        let inv_scale = f64::from(max_value) / max_bit_value as f64;
        unscaled_value as f64 * inv_scale
    } else {
        let scale = max_bit_value as f64 / f64::from(max_value);
        let inv_scale = 1.0 / scale;
        unscaled_value as f64 * inv_scale
    };

    tracing::trace!(start, delta, value, "float");
    Ok(value)
}

/// Decodes three unit-range floats, x then y then z.
#[inline(always)]
pub fn decode_float_vector(cursor: &mut BitCursor<'_>) -> Result<FloatVector, DecodeError> {
    decode_float_vector_with(cursor, FloatQuantization::default())
}

pub fn decode_float_vector_with(cursor: &mut BitCursor<'_>, quantization: FloatQuantization) -> Result<FloatVector, DecodeError> {
    Ok(FloatVector {
        x: decode_float(cursor, quantization)?,
        y: decode_float(cursor, quantization)?,
        z: decode_float(cursor, quantization)?,
    })
}
