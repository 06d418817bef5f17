pub mod utf16sequence;
pub mod utf32sequence;
pub mod utf8sequence;

use std::fmt;

use itertools::Itertools;

use crate::sequence::Buffer;

/// Result of decoding the code units found at a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codepoint {
    /// A Unicode scalar value.
    Scalar(char),
    /// The units at the cursor do not form a legal sequence.
    Faulty,
    /// The cursor was outside the buffer; nothing was read.
    Invalid,
}

impl Codepoint {
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Codepoint::Scalar(_))
    }

    #[inline]
    pub const fn to_char(&self) -> Option<char> {
        match *self {
            Codepoint::Scalar(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_u32(&self) -> Option<u32> {
        match *self {
            Codepoint::Scalar(c) => Some(c as u32),
            _ => None,
        }
    }

    /// Returns the scalar, or U+FFFD REPLACEMENT CHARACTER for either sentinel.
    #[inline]
    pub const fn to_char_lossy(&self) -> char {
        match *self {
            Codepoint::Scalar(c) => c,
            _ => char::REPLACEMENT_CHARACTER,
        }
    }

    #[inline]
    pub(crate) fn from_u32(value: u32) -> Self {
        char::from_u32(value).map_or(Codepoint::Faulty, Codepoint::Scalar)
    }
}

impl From<char> for Codepoint {
    fn from(value: char) -> Self {
        Codepoint::Scalar(value)
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codepoint::Scalar(c) => write!(f, "U+{:04X}", *c as u32),
            Codepoint::Faulty => f.write_str("faulty"),
            Codepoint::Invalid => f.write_str("invalid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16,
    Utf32,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16 => "UTF-16",
            Encoding::Utf32 => "UTF-32",
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

/// A fixed-width storage unit of one of the Unicode transfer encodings.
pub trait CodeUnit: Copy + Sized {
    const ENCODING: Encoding;

    /// Decodes the codepoint starting at `units[0]`, returning it together
    /// with the number of units consumed.
    fn decode(units: &[Self]) -> (Codepoint, usize);
    fn buffer(units: &[Self]) -> Buffer<'_>;
}

impl CodeUnit for u8 {
    const ENCODING: Encoding = Encoding::Utf8;

    #[inline]
    fn decode(units: &[Self]) -> (Codepoint, usize) {
        utf8sequence::decode(units)
    }
    fn buffer(units: &[Self]) -> Buffer<'_> {
        Buffer::Utf8(units)
    }
}

impl CodeUnit for u16 {
    const ENCODING: Encoding = Encoding::Utf16;

    #[inline]
    fn decode(units: &[Self]) -> (Codepoint, usize) {
        utf16sequence::decode(units)
    }
    fn buffer(units: &[Self]) -> Buffer<'_> {
        Buffer::Utf16(units)
    }
}

impl CodeUnit for u32 {
    const ENCODING: Encoding = Encoding::Utf32;

    #[inline]
    fn decode(units: &[Self]) -> (Codepoint, usize) {
        utf32sequence::decode(units)
    }
    fn buffer(units: &[Self]) -> Buffer<'_> {
        Buffer::Utf32(units)
    }
}

/// Assembles 16-bit units from raw bytes. The second value is the number of
/// trailing bytes that did not fill a whole unit.
pub fn utf16_units(bytes: &[u8], endianness: Endianness) -> (Vec<u16>, usize) {
    let from_bytes: fn([u8; 2]) -> u16 = match endianness {
        Endianness::BigEndian => u16::from_be_bytes,
        Endianness::LittleEndian => u16::from_le_bytes,
    };
    let units = bytes
        .iter()
        .copied()
        .tuples()
        .map(|(a, b)| from_bytes([a, b]))
        .collect();
    (units, bytes.len() % 2)
}

/// Assembles 32-bit units from raw bytes. See [`utf16_units`].
pub fn utf32_units(bytes: &[u8], endianness: Endianness) -> (Vec<u32>, usize) {
    let from_bytes: fn([u8; 4]) -> u32 = match endianness {
        Endianness::BigEndian => u32::from_be_bytes,
        Endianness::LittleEndian => u32::from_le_bytes,
    };
    let units = bytes
        .iter()
        .copied()
        .tuples()
        .map(|(a, b, c, d)| from_bytes([a, b, c, d]))
        .collect();
    (units, bytes.len() % 4)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display() {
        assert_eq!(Codepoint::Scalar('A').to_string(), "U+0041");
        assert_eq!(Codepoint::Scalar('\u{1F600}').to_string(), "U+1F600");
        assert_eq!(Codepoint::Faulty.to_string(), "faulty");
        assert_eq!(Codepoint::Invalid.to_string(), "invalid");
    }

    #[test]
    fn lossy() {
        assert_eq!(Codepoint::Scalar('é').to_char_lossy(), 'é');
        assert_eq!(Codepoint::Faulty.to_char_lossy(), '\u{FFFD}');
        assert_eq!(Codepoint::Invalid.to_char_lossy(), '\u{FFFD}');
        assert_eq!(Codepoint::Faulty.to_u32(), None);
        assert_eq!(Codepoint::Scalar('€').to_u32(), Some(0x20AC));
    }

    #[test]
    fn from_u32_rejects_surrogates_and_overflow() {
        assert_eq!(Codepoint::from_u32(0xD800), Codepoint::Faulty);
        assert_eq!(Codepoint::from_u32(0xDFFF), Codepoint::Faulty);
        assert_eq!(Codepoint::from_u32(0x110000), Codepoint::Faulty);
        assert_eq!(Codepoint::from_u32(0x10FFFF), Codepoint::Scalar('\u{10FFFF}'));
    }

    #[test]
    fn decoder_follows_unit_width() {
        assert_eq!(u8::ENCODING, Encoding::Utf8);
        assert_eq!(u16::ENCODING, Encoding::Utf16);
        assert_eq!(u32::ENCODING, Encoding::Utf32);
        assert_eq!(u8::decode(&[0xF0, 0x9F, 0xA6, 0x80]), (Codepoint::Scalar('🦀'), 4));
        assert_eq!(u16::decode(&[0xD83E, 0xDD80]), (Codepoint::Scalar('🦀'), 2));
        assert_eq!(u32::decode(&[0x1F980]), (Codepoint::Scalar('🦀'), 1));
        assert_eq!(u16::buffer(&[0x41]), Buffer::Utf16(&[0x41]));
    }

    #[test]
    fn assemble_units() {
        let bytes = [0xD8, 0x3D, 0xDE, 0x00, 0x41];
        assert_eq!(
            utf16_units(&bytes, Endianness::BigEndian),
            (vec![0xD83D, 0xDE00], 1)
        );
        assert_eq!(
            utf16_units(&bytes[..4], Endianness::LittleEndian),
            (vec![0x3DD8, 0x00DE], 0)
        );
        assert_eq!(
            utf32_units(&[0x00, 0x01, 0xF6, 0x00, 0xFF], Endianness::LittleEndian),
            (vec![0x00F6_0100], 1)
        );
        assert_eq!(
            utf32_units(&[0x00, 0x01, 0xF6, 0x00], Endianness::BigEndian),
            (vec![0x0001_F600], 0)
        );
    }
}
