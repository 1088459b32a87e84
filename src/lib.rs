//! Decoders for bit-packed replay values.
//!
//! Values are packed back to back without byte alignment. Every entry point
//! takes the buffer and the bit offset to start at, and returns the decoded
//! value with the offset of the first bit after it, so reads can be chained:
//!
//! ```
//! let bytes = [5, 0, 0, 0, b'h', b'i', b'!', b'!', 0, 0b1000_0000, 0];
//! let (name, offset) = replay_bits::read_string(&bytes, 0).unwrap();
//! let (vector, offset) = replay_bits::read_byte_vector(&bytes, offset).unwrap();
//! assert_eq!(name.as_str(), "hi!!");
//! assert_eq!((vector.x, vector.y, vector.z), (0, 0, 0));
//! assert_eq!(offset, 72 + 11);
//! ```
//!
//! For many reads over one buffer, use a [`BitCursor`] with the `decode_*`
//! functions directly.

pub mod bit;
pub mod config;
pub mod float;
pub mod int;
pub mod string;
pub mod traits;
pub mod vector;
mod errors;

#[cfg(test)]
mod tests;

pub use bit::{reverse_bits, reverse_byte, BitCursor, Primitive, ReadError, Value};
pub use config::{DecoderConfig, FloatQuantization, DEFAULT_FLOAT_BITS, DEFAULT_VECTOR_BOUND};
pub use errors::DecodeError;
pub use float::{decode_float, decode_float_vector, FloatVector};
pub use int::{decode_int32_max, decode_serialized_int};
pub use string::{decode_string, DecodedString, StringEncoding};
pub use traits::Decode;
pub use vector::{decode_byte_vector, decode_serialized_vector, ByteVector, SerializedVector};

#[inline(always)]
fn read_with<T>(
    buffer: &[u8],
    bit_offset: usize,
    decoder: impl FnOnce(&mut BitCursor<'_>) -> Result<T, DecodeError>,
) -> Result<(T, usize), DecodeError> {
    let mut cursor = BitCursor::with_offset(buffer, bit_offset)?;
    match decoder(&mut cursor) {
        Ok(value) => Ok((value, cursor.position())),
        Err(err) => {
            tracing::debug!(bit_offset, error = %err, "decode failed");
            Err(err)
        }
    }
}

#[inline(always)]
pub fn decode<T: Decode>(buffer: &[u8], bit_offset: usize) -> Result<(T, usize), DecodeError> {
    decode_with(buffer, bit_offset, &DecoderConfig::default())
}

#[inline(always)]
pub fn decode_with<T: Decode>(buffer: &[u8], bit_offset: usize, config: &DecoderConfig) -> Result<(T, usize), DecodeError> {
    read_with(buffer, bit_offset, |cursor| T::decode(cursor, config))
}

pub fn read_string(buffer: &[u8], bit_offset: usize) -> Result<(DecodedString, usize), DecodeError> {
    read_with(buffer, bit_offset, decode_string)
}

pub fn read_serialized_int(buffer: &[u8], bit_offset: usize, max_value: u64) -> Result<(u64, usize), DecodeError> {
    read_with(buffer, bit_offset, |cursor| decode_serialized_int(cursor, max_value))
}

pub fn read_int32_max(buffer: &[u8], bit_offset: usize, max_value: u64) -> Result<(u64, usize), DecodeError> {
    read_with(buffer, bit_offset, |cursor| decode_int32_max(cursor, max_value))
}

pub fn read_serialized_vector(buffer: &[u8], bit_offset: usize) -> Result<(SerializedVector, usize), DecodeError> {
    read_with(buffer, bit_offset, |cursor| decode_serialized_vector(cursor, DEFAULT_VECTOR_BOUND))
}

pub fn read_byte_vector(buffer: &[u8], bit_offset: usize) -> Result<(ByteVector, usize), DecodeError> {
    read_with(buffer, bit_offset, decode_byte_vector)
}

pub fn read_float(buffer: &[u8], bit_offset: usize, max_value: u32, numbits: u32) -> Result<(f64, usize), DecodeError> {
    read_with(buffer, bit_offset, |cursor| decode_float(cursor, FloatQuantization { max_value, numbits }))
}

pub fn read_float_vector(buffer: &[u8], bit_offset: usize) -> Result<(FloatVector, usize), DecodeError> {
    read_with(buffer, bit_offset, decode_float_vector)
}
