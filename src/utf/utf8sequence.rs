use crate::utf::Codepoint;

// +------+---------+----------+-------+----------+----------+----------+----------+
// | Bits | First   | Last     | Bytes | Byte 1   | Byte 2   | Byte 3   | Byte 4   |
// +------+---------+----------+-------+----------+----------+----------+----------+
// |  7   | U+0000  | U+007F   |   1   | 0xxxxxxx |          |          |          |
// |  11  | U+0080  | U+07FF   |   2   | 110xxxxx | 10xxxxxx |          |          |
// |  16  | U+0800  | U+FFFF   |   3   | 1110xxxx | 10xxxxxx | 10xxxxxx |          |
// |  21  | U+10000 | U+10FFFF |   4   | 11110xxx | 10xxxxxx | 10xxxxxx | 10xxxxxx |
// +------+---------+----------+-------+----------+----------+----------+----------+

/// Decodes the UTF-8 sequence starting at `units[0]`.
///
/// A malformed sequence yields [`Codepoint::Faulty`] and consumes only the
/// lead byte, so the caller resynchronizes on the next one. An empty slice
/// yields [`Codepoint::Invalid`] and consumes nothing.
#[inline]
pub fn decode(units: &[u8]) -> (Codepoint, usize) {
    let Some(&lead) = units.first() else {
        return (Codepoint::Invalid, 0);
    };
    // 0xC0 and 0xC1 could only start overlong two-byte forms.
    let (full_length, payload) = match lead {
        0x00..=0x7F => return (Codepoint::Scalar(lead as char), 1),
        0xC2..=0xDF => (2, lead & 0b0001_1111),
        0xE0..=0xEF => (3, lead & 0b0000_1111),
        0xF0..=0xF4 => (4, lead & 0b0000_0111),
        _ => return (Codepoint::Faulty, 1),
    };
    let Some(codepoint) = compose(units, full_length, payload) else {
        return (Codepoint::Faulty, 1);
    };
    let accepted = match full_length {
        3 => codepoint > 0x0800 && !matches!(codepoint, 0xD800..=0xDFFF),
        4 => matches!(codepoint, 0x10000..=0x10FFFF),
        _ => true,
    };
    if !accepted {
        return (Codepoint::Faulty, 1);
    }
    (Codepoint::from_u32(codepoint), full_length)
}

#[inline]
fn compose(units: &[u8], full_length: usize, payload: u8) -> Option<u32> {
    units
        .get(1..full_length)?
        .iter()
        .try_fold(payload as u32, |codepoint, &byte| {
            Some((codepoint << 6) | continuation(byte)?)
        })
}

#[inline]
const fn continuation(byte: u8) -> Option<u32> {
    let bits = byte.wrapping_sub(0x80);
    if bits <= 0x3F {
        Some(bits as u32)
    } else {
        None
    }
}
