use std::fmt::{Display, Formatter};

use crate::bit::BitCursor;
use crate::errors::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    Utf8,
    /// Bytes that were not valid UTF-8, mapped one byte per char.
    Latin1,
    Utf16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedString {
    pub text: String,
    pub encoding: StringEncoding,
}

impl DecodedString {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Display for DecodedString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Decodes a length-prefixed, null-terminated string.
///
/// The prefix is a signed 32-bit little-endian count. A negative count `n`
/// means `-2n` bytes of UTF-16; otherwise `n` bytes of UTF-8 (or Latin-1 when
/// the bytes are not valid UTF-8) including a single zero terminator.
pub fn decode_string(cursor: &mut BitCursor<'_>) -> Result<DecodedString, DecodeError> {
    let start = cursor.position();
    let length = cursor.read_uint_le(32)? as u32 as i32;

    let decoded = if length < 0 {
        let byte_len = usize::try_from(-2 * i64::from(length)).map_err(|_| DecodeError::OutOfBounds {
            requested: usize::MAX,
            available: cursor.remaining(),
        })?;
        let bytes = cursor.read_bytes(byte_len)?;
        DecodedString {
            text: decode_utf16(&bytes[..byte_len - 2])?,
            encoding: StringEncoding::Utf16,
        }
    } else {
        let bytes = cursor.read_bytes(length as usize)?;
        let (terminator, text) = match bytes.split_last() {
            Some((&terminator, text)) => (terminator, text),
            None => return Err(DecodeError::MalformedString("zero-length string has no terminator".to_string())),
        };
        if terminator != 0 {
            return Err(DecodeError::MalformedString(format!("string not zero terminated (last byte 0x{:02X})", terminator)));
        }

        match std::str::from_utf8(text) {
            Ok(text) => DecodedString {
                text: text.to_string(),
                encoding: StringEncoding::Utf8,
            },
            Err(err) => {
                tracing::debug!(start, error = %err, "string is not UTF-8, falling back to Latin-1");
                DecodedString {
                    text: text.iter().map(|&byte| byte as char).collect(),
                    encoding: StringEncoding::Latin1,
                }
            }
        }
    };

    tracing::trace!(start, length, text = %decoded.text, "string");
    Ok(decoded)
}

// Code units are little-endian unless a byte-order mark says otherwise.
fn decode_utf16(bytes: &[u8]) -> Result<String, DecodeError> {
    let big_endian = bytes.starts_with(&[0xFE, 0xFF]);
    let body = if big_endian || bytes.starts_with(&[0xFF, 0xFE]) {
        &bytes[2..]
    } else {
        bytes
    };

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            if big_endian {
                u16::from_be_bytes(pair)
            } else {
                u16::from_le_bytes(pair)
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|err| DecodeError::MalformedString(format!("invalid UTF-16: {}", err)))
}
