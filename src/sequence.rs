//! A borrowed buffer of code units that can be decoded at any cursor.

use std::iter::FusedIterator;

use thiserror::Error;
use tracing::{debug, trace};

use crate::utf::{utf16sequence, utf32sequence, utf8sequence, CodeUnit, Codepoint, Encoding};

/// A typed view over the code units of one encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer<'a> {
    Utf8(&'a [u8]),
    Utf16(&'a [u16]),
    Utf32(&'a [u32]),
}

impl Buffer<'_> {
    pub const fn encoding(&self) -> Encoding {
        match self {
            Buffer::Utf8(_) => Encoding::Utf8,
            Buffer::Utf16(_) => Encoding::Utf16,
            Buffer::Utf32(_) => Encoding::Utf32,
        }
    }

    /// Length in code units.
    pub const fn len(&self) -> usize {
        match self {
            Buffer::Utf8(units) => units.len(),
            Buffer::Utf16(units) => units.len(),
            Buffer::Utf32(units) => units.len(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    #[error("cannot create a {encoding} sequence from an empty buffer")]
    Empty { encoding: Encoding },
}

/// Pairs an encoding with a non-empty borrowed buffer.
///
/// The sequence never owns the text; dropping it leaves the buffer alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointSequence<'a> {
    buffer: Buffer<'a>,
}

impl<'a> CodepointSequence<'a> {
    /// Returns `None` when `units` is empty.
    pub fn new<U: CodeUnit>(units: &'a [U]) -> Option<Self> {
        Self::try_new(units).ok()
    }

    pub fn try_new<U: CodeUnit>(units: &'a [U]) -> Result<Self, SequenceError> {
        Self::from_buffer(U::buffer(units))
    }

    /// An absent buffer produces no sequence, the same as an empty one.
    pub fn from_option<U: CodeUnit>(units: Option<&'a [U]>) -> Option<Self> {
        units.and_then(Self::new)
    }

    pub fn from_buffer(buffer: Buffer<'a>) -> Result<Self, SequenceError> {
        if buffer.is_empty() {
            debug!(encoding = %buffer.encoding(), "refusing to create sequence over empty buffer");
            return Err(SequenceError::Empty {
                encoding: buffer.encoding(),
            });
        }
        Ok(Self { buffer })
    }

    pub fn utf8(units: &'a [u8]) -> Option<Self> {
        Self::new(units)
    }

    /// UTF-16 in native unit order.
    pub fn utf16(units: &'a [u16]) -> Option<Self> {
        Self::new(units)
    }

    /// UTF-32 in native unit order.
    pub fn utf32(units: &'a [u32]) -> Option<Self> {
        Self::new(units)
    }

    pub fn try_utf8(units: &'a [u8]) -> Result<Self, SequenceError> {
        Self::try_new(units)
    }

    pub fn try_utf16(units: &'a [u16]) -> Result<Self, SequenceError> {
        Self::try_new(units)
    }

    pub fn try_utf32(units: &'a [u32]) -> Result<Self, SequenceError> {
        Self::try_new(units)
    }

    #[inline]
    pub const fn encoding(&self) -> Encoding {
        self.buffer.encoding()
    }

    /// Length in code units. Never zero.
    #[inline]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub const fn buffer(&self) -> Buffer<'a> {
        self.buffer
    }

    /// Decodes the codepoint at `cursor` and returns it with the number of
    /// code units it occupies.
    ///
    /// A cursor at or past the end yields `(Codepoint::Invalid, 0)` without
    /// reading the buffer. A malformed sequence yields `Codepoint::Faulty`
    /// and always consumes one unit.
    pub fn decode_at(&self, cursor: usize) -> (Codepoint, usize) {
        if cursor >= self.len() {
            return (Codepoint::Invalid, 0);
        }
        let decoded = match self.buffer {
            Buffer::Utf8(units) => utf8sequence::decode(&units[cursor..]),
            Buffer::Utf16(units) => utf16sequence::decode(&units[cursor..]),
            Buffer::Utf32(units) => utf32sequence::decode(&units[cursor..]),
        };
        if decoded.0 == Codepoint::Faulty {
            trace!(cursor, encoding = %self.encoding(), "faulty sequence");
        }
        decoded
    }

    /// Decodes at `*cursor` and moves the cursor past the consumed units.
    /// On `Codepoint::Invalid` the cursor is left where it was.
    #[inline]
    pub fn codepoint_at(&self, cursor: &mut usize) -> Codepoint {
        let (codepoint, consumed) = self.decode_at(*cursor);
        *cursor += consumed;
        codepoint
    }

    pub fn codepoints(&self) -> Codepoints<'_, 'a> {
        Codepoints {
            sequence: self,
            cursor: 0,
        }
    }
}

impl<'s, 'a> IntoIterator for &'s CodepointSequence<'a> {
    type Item = (usize, Codepoint);
    type IntoIter = Codepoints<'s, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.codepoints()
    }
}

/// Yields each codepoint of a sequence with the cursor it was decoded at.
#[derive(Debug, Clone)]
pub struct Codepoints<'s, 'a> {
    sequence: &'s CodepointSequence<'a>,
    cursor: usize,
}

impl Codepoints<'_, '_> {
    pub const fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Codepoints<'_, '_> {
    type Item = (usize, Codepoint);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let start = self.cursor;
        match self.sequence.codepoint_at(&mut self.cursor) {
            Codepoint::Invalid => None,
            codepoint => Some((start, codepoint)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.len().saturating_sub(self.cursor);
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Codepoints<'_, '_> {}
