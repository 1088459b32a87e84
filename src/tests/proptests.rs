use super::writer::BitWriter;
use crate::bit::{reverse_bits, BitCursor};
use crate::{
    read_byte_vector, read_float, read_float_vector, read_int32_max, read_serialized_int, read_serialized_vector,
    read_string, ByteVector, SerializedVector, StringEncoding,
};
use proptest::prelude::*;

prop_compose! {
    /// A buffer together with a bit offset that lies inside it
    fn arb_buffer_and_offset()(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
    )(
        offset in 0..=bytes.len() * 8,
        bytes in Just(bytes),
    ) -> (Vec<u8>, usize) {
        (bytes, offset)
    }
}

prop_compose! {
    /// A bound and a value the bounded-int encoder can represent under it
    fn arb_serialized_int()(max_value in 1u64..=u64::MAX)(
        value in 0..=max_value,
        max_value in Just(max_value),
    ) -> (u64, u64) {
        // an exact power of two has one bit too few to reach itself
        if max_value.is_power_of_two() && value == max_value {
            (value - 1, max_value)
        } else {
            (value, max_value)
        }
    }
}

proptest! {
    /// Property: two reads advance the cursor by exactly the sum of their widths
    #[test]
    fn prop_chained_reads_advance_by_sum(
        (bytes, offset) in arb_buffer_and_offset(),
        n in 1u32..=64,
        m in 1u32..=64,
    ) {
        let available = bytes.len() * 8 - offset;
        prop_assume!((n + m) as usize <= available);

        let mut cursor = BitCursor::with_offset(&bytes, offset).unwrap();
        cursor.read_uint_le(n).unwrap();
        cursor.read_uint_le(m).unwrap();
        prop_assert_eq!(cursor.position(), offset + (n + m) as usize);

        if n + m <= 64 {
            let mut whole = BitCursor::with_offset(&bytes, offset).unwrap();
            whole.read_uint_be(n + m).unwrap();
            prop_assert_eq!(whole.position(), cursor.position());
        }
    }

    /// Property: a failed read never moves the cursor
    #[test]
    fn prop_failed_read_keeps_position(
        (bytes, offset) in arb_buffer_and_offset(),
        extra in 1usize..64,
    ) {
        let mut cursor = BitCursor::with_offset(&bytes, offset).unwrap();
        let requested = cursor.remaining() + extra;
        if requested <= 64 {
            prop_assert!(cursor.read_uint_be(requested as u32).is_err());
        }
        prop_assert!(cursor.read_bytes(cursor.remaining() / 8 + 1).is_err());
        prop_assert_eq!(cursor.position(), offset);
    }

    /// Property: bit reversal is its own inverse
    #[test]
    fn prop_reverse_bits_idempotent(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(reverse_bits(&reverse_bits(&bytes)), bytes);
    }

    /// Property: big-endian reads agree with the bytes when aligned
    #[test]
    fn prop_aligned_reads_match_bytes(bytes in prop::collection::vec(any::<u8>(), 8..16)) {
        let mut cursor = BitCursor::new(&bytes);
        let le = cursor.read_uint_le(64).unwrap();
        let mut le_bytes = [0u8; 8];
        le_bytes.copy_from_slice(&bytes[..8]);
        prop_assert_eq!(le, u64::from_le_bytes(le_bytes));

        let mut cursor = BitCursor::new(&bytes);
        prop_assert_eq!(cursor.read_uint_be(64).unwrap(), u64::from_be_bytes(le_bytes));
    }

    /// Property: encode then decode of a serialized int returns the value
    #[test]
    fn prop_serialized_int_roundtrip(
        (value, max_value) in arb_serialized_int(),
        lead in 0usize..8,
    ) {
        let mut writer = BitWriter::with_capacity(16);
        for _ in 0..lead {
            writer.write_bit(true);
        }
        writer.write_serialized_int(value, max_value).unwrap();
        let end = writer.bits_written();
        let bytes = writer.into_bytes();

        let (decoded, offset) = read_serialized_int(&bytes, lead, max_value).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert!(decoded <= max_value);
        prop_assert_eq!(offset, end);
    }

    /// Property: encode then decode of an int32-max value returns the value
    #[test]
    fn prop_int32_max_roundtrip(max_value in 1u64..1 << 40, value in any::<u64>()) {
        let value = value % max_value;
        let mut writer = BitWriter::with_capacity(8);
        writer.write_int32_max(value, max_value).unwrap();
        let end = writer.bits_written();
        let bytes = writer.into_bytes();

        let (decoded, offset) = read_int32_max(&bytes, 0, max_value).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(offset, end);
    }

    /// Property: decoded bounded ints never exceed their bound on arbitrary input
    #[test]
    fn prop_serialized_int_in_bounds(
        (bytes, offset) in arb_buffer_and_offset(),
        max_value in 1u64..=u64::MAX,
    ) {
        if let Ok((value, end)) = read_serialized_int(&bytes, offset, max_value) {
            prop_assert!(value <= max_value);
            prop_assert!(end - offset <= 64);
        }
        if let Ok((value, _)) = read_int32_max(&bytes, offset, max_value) {
            prop_assert!(value < max_value);
        }
    }

    /// Property: serialized vectors round trip for every prefix width
    #[test]
    fn prop_serialized_vector_roundtrip(numbits in 0u64..=19, raw in prop::array::uniform3(any::<u32>())) {
        let width = numbits as u8 + 2;
        let bias = 1i64 << (numbits + 1);
        let raw = raw.map(|component| u64::from(component) % (1 << width));

        let mut writer = BitWriter::with_capacity(16);
        writer.write_serialized_int(numbits, 19).unwrap();
        for component in raw {
            writer.write_reversed(component, width).unwrap();
        }
        let end = writer.bits_written();
        let bytes = writer.into_bytes();

        let (vector, offset) = read_serialized_vector(&bytes, 0).unwrap();
        prop_assert_eq!(vector, SerializedVector {
            x: (raw[0] as i64 - bias) as i32,
            y: (raw[1] as i64 - bias) as i32,
            z: (raw[2] as i64 - bias) as i32,
        });
        prop_assert_eq!(offset, end);
    }

    /// Property: byte vectors round trip, absent components decode as zero
    #[test]
    fn prop_byte_vector_roundtrip(components in prop::array::uniform3(prop::option::of(any::<u8>()))) {
        let mut writer = BitWriter::with_capacity(4);
        for component in components {
            writer.write_bit(component.is_some());
            if let Some(byte) = component {
                writer.write_reversed(u64::from(byte), 8).unwrap();
            }
        }
        let end = writer.bits_written();
        let bytes = writer.into_bytes();

        let (vector, offset) = read_byte_vector(&bytes, 0).unwrap();
        prop_assert_eq!(vector, ByteVector {
            x: components[0].unwrap_or(0),
            y: components[1].unwrap_or(0),
            z: components[2].unwrap_or(0),
        });
        prop_assert_eq!(offset, end);
    }

    /// Property: unit floats stay within one quantization step of [-1, 1]
    #[test]
    fn prop_unit_float_range(delta in 0u64..1 << 16) {
        let mut writer = BitWriter::with_capacity(2);
        writer.write_serialized_int(delta, 1 << 16).unwrap();
        let bytes = writer.into_bytes();

        let (value, offset) = read_float(&bytes, 0, 1, 16).unwrap();
        prop_assert_eq!(offset, 16);
        prop_assert!((-1.0 - 2.0 / 32767.0..=1.0 + 1e-9).contains(&value));
        prop_assert_eq!(value == 0.0, delta == 1 << 15);
    }

    /// Property: UTF-8 strings round trip through the byte-string path
    #[test]
    fn prop_utf8_string_roundtrip(text in any::<String>(), lead in 0usize..8) {
        let mut writer = BitWriter::with_capacity(text.len() + 8);
        for _ in 0..lead {
            writer.write_bit(false);
        }
        writer.write_string(&text);
        let end = writer.bits_written();
        let bytes = writer.into_bytes();

        let (decoded, offset) = read_string(&bytes, lead).unwrap();
        prop_assert_eq!(decoded.encoding, StringEncoding::Utf8);
        prop_assert_eq!(decoded.text, text);
        prop_assert_eq!(offset, end);
    }

    /// Property: UTF-16 strings round trip through the negative-length path
    #[test]
    fn prop_utf16_string_roundtrip(text in any::<String>()) {
        prop_assume!(!text.starts_with('\u{feff}') && !text.starts_with('\u{fffe}'));
        let mut writer = BitWriter::with_capacity(text.len() * 2 + 8);
        writer.write_utf16_string(&text);
        let bytes = writer.into_bytes();

        let (decoded, offset) = read_string(&bytes, 0).unwrap();
        prop_assert_eq!(decoded.encoding, StringEncoding::Utf16);
        prop_assert_eq!(decoded.text, text);
        prop_assert_eq!(offset, bytes.len() * 8);
    }

    /// Property: arbitrary bytes never panic any decoder, and success stays inside the buffer
    #[test]
    fn prop_decoders_total_on_garbage((bytes, offset) in arb_buffer_and_offset()) {
        let bits = bytes.len() * 8;
        if let Ok((_, end)) = read_string(&bytes, offset) {
            prop_assert!(end <= bits);
        }
        if let Ok((_, end)) = read_serialized_vector(&bytes, offset) {
            prop_assert!(end <= bits);
        }
        if let Ok((_, end)) = read_byte_vector(&bytes, offset) {
            prop_assert!(end <= bits);
        }
        if let Ok((_, end)) = read_float_vector(&bytes, offset) {
            prop_assert_eq!(end, offset + 48);
        }
    }
}
