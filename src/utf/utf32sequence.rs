use crate::utf::Codepoint;

#[inline]
pub fn decode(units: &[u32]) -> (Codepoint, usize) {
    match units.first() {
        Some(&unit) => (Codepoint::from_u32(unit), 1),
        None => (Codepoint::Invalid, 0),
    }
}
