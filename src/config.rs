pub const DEFAULT_VECTOR_BOUND: u64 = 19;
pub const DEFAULT_FLOAT_BITS: u32 = 16;

/// Quantization parameters of a serialized float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatQuantization {
    pub max_value: u32,
    pub numbits: u32,
}

impl Default for FloatQuantization {
    fn default() -> Self {
        FloatQuantization {
            max_value: 1,
            numbits: DEFAULT_FLOAT_BITS,
        }
    }
}

/// Parameters used by [`crate::Decode`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Bound of the bit-count prefix of a serialized vector.
    pub vector_bound: u64,
    pub float: FloatQuantization,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            vector_bound: DEFAULT_VECTOR_BOUND,
            float: FloatQuantization::default(),
        }
    }
}
