use crate::utf::Codepoint;

/// Decodes the UTF-16 unit or surrogate pair starting at `units[0]`.
#[inline]
pub fn decode(units: &[u16]) -> (Codepoint, usize) {
    let Some(&lead) = units.first() else {
        return (Codepoint::Invalid, 0);
    };
    match lead {
        0xD800..=0xDBFF => match units.get(1) {
            Some(&low @ 0xDC00..=0xDFFF) => {
                let high = lead as u32;
                let low = low as u32;
                let codepoint = ((high - 0xD800) * 0x400) + (low - 0xDC00) + 0x10000;
                (Codepoint::from_u32(codepoint), 2)
            }
            _ => (Codepoint::Faulty, 1),
        },
        // a low surrogate never leads
        0xDC00..=0xDFFF => (Codepoint::Faulty, 1),
        _ => (Codepoint::from_u32(lead as u32), 1),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn bmp() {
        assert_eq!(decode(&[0x0041]), (Codepoint::Scalar('A'), 1));
        assert_eq!(decode(&[0xD7FF, 0xDC00]), (Codepoint::Scalar('\u{D7FF}'), 1));
        assert_eq!(decode(&[0xE000]), (Codepoint::Scalar('\u{E000}'), 1));
        assert_eq!(decode(&[0xFFFF]), (Codepoint::Scalar('\u{FFFF}'), 1));
    }

    #[test]
    fn surrogate_pair() {
        assert_eq!(decode(&[0xD83D, 0xDE00]), (Codepoint::Scalar('\u{1F600}'), 2));
        assert_eq!(decode(&[0xD800, 0xDC00]), (Codepoint::Scalar('\u{10000}'), 2));
        assert_eq!(decode(&[0xDBFF, 0xDFFF]), (Codepoint::Scalar('\u{10FFFF}'), 2));
    }

    #[test]
    fn unpaired_high() {
        assert_eq!(decode(&[0xD83D]), (Codepoint::Faulty, 1));
        assert_eq!(decode(&[0xD83D, 0x0041]), (Codepoint::Faulty, 1));
        assert_eq!(decode(&[0xD83D, 0xD83D, 0xDE00]), (Codepoint::Faulty, 1));
    }

    #[test]
    fn lone_low() {
        assert_eq!(decode(&[0xDC00]), (Codepoint::Faulty, 1));
        assert_eq!(decode(&[0xDFFF, 0xDC00]), (Codepoint::Faulty, 1));
    }

    #[test]
    fn empty() {
        assert_eq!(decode(&[]), (Codepoint::Invalid, 0));
    }

    proptest! {
        #[test]
        fn round_trip(c in any::<char>()) {
            let mut buffer = [0; 2];
            let encoded = c.encode_utf16(&mut buffer);
            prop_assert_eq!(decode(encoded), (Codepoint::Scalar(c), c.len_utf16()));
        }

        #[test]
        fn agrees_with_std(units in proptest::collection::vec(any::<u16>(), 1..4)) {
            let expected = char::decode_utf16(units.iter().copied())
                .next()
                .map(|decoded| decoded.map_or((Codepoint::Faulty, 1), |c| (Codepoint::Scalar(c), c.len_utf16())));
            prop_assert_eq!(Some(decode(&units)), expected);
        }
    }
}
