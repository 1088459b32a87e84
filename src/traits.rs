use crate::bit::BitCursor;
use crate::config::DecoderConfig;
use crate::errors::DecodeError;
use crate::float::{decode_float_vector_with, FloatVector};
use crate::string::{decode_string, DecodedString};
use crate::vector::{decode_byte_vector, decode_serialized_vector, ByteVector, SerializedVector};

pub trait Decode: Sized {
    fn decode(cursor: &mut BitCursor<'_>, config: &DecoderConfig) -> Result<Self, DecodeError>;
}

impl Decode for DecodedString {
    #[inline(always)]
    fn decode(cursor: &mut BitCursor<'_>, _config: &DecoderConfig) -> Result<Self, DecodeError> {
        decode_string(cursor)
    }
}

impl Decode for SerializedVector {
    #[inline(always)]
    fn decode(cursor: &mut BitCursor<'_>, config: &DecoderConfig) -> Result<Self, DecodeError> {
        decode_serialized_vector(cursor, config.vector_bound)
    }
}

impl Decode for ByteVector {
    #[inline(always)]
    fn decode(cursor: &mut BitCursor<'_>, _config: &DecoderConfig) -> Result<Self, DecodeError> {
        decode_byte_vector(cursor)
    }
}

impl Decode for FloatVector {
    #[inline(always)]
    fn decode(cursor: &mut BitCursor<'_>, config: &DecoderConfig) -> Result<Self, DecodeError> {
        decode_float_vector_with(cursor, config.float)
    }
}
