use thiserror::Error;

use crate::bit::ReadError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Decoding error: Out of bounds - requested {requested} bits, but only {available} bits available")]
    OutOfBounds { requested: usize, available: usize },
    #[error("Decoding error: Invalid width - {bits} bits")]
    InvalidWidth { bits: u32 },
    #[error("Decoding error: Invalid bound - {max_value} (must be positive)")]
    InvalidBound { max_value: u64 },
    #[error("Decoding error: Bound overflow - {value} exceeds {max_value}")]
    BoundOverflow { value: u64, max_value: u64 },
    #[error("Decoding error: Malformed string - {0}")]
    MalformedString(String),
}

impl From<ReadError> for DecodeError {
    fn from(error: ReadError) -> Self {
        match error {
            ReadError::OutOfBounds { requested, available } => DecodeError::OutOfBounds { requested, available },
            ReadError::InvalidWidth { bits } => DecodeError::InvalidWidth { bits },
        }
    }
}
