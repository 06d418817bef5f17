use std::{ops::Deref, sync::Arc};

use tracing::debug;

use crate::sequence::CodepointSequence;

/// A reference-counted [`CodepointSequence`].
///
/// Every holder owns one reference: `retain` hands out another, `release`
/// gives one back, and the last release frees the handle. The text buffer
/// is borrowed, so releasing never affects it.
#[derive(Debug)]
pub struct SharedSequence<'a>(Arc<CodepointSequence<'a>>);

impl<'a> SharedSequence<'a> {
    pub fn new(sequence: CodepointSequence<'a>) -> Self {
        Self(Arc::new(sequence))
    }

    #[must_use]
    pub fn retain(&self) -> Self {
        Self(Arc::clone(&self.0))
    }

    pub fn release(self) {
        if Arc::strong_count(&self.0) == 1 {
            debug!(encoding = %self.0.encoding(), length = self.0.len(), "releasing last reference");
        }
    }

    pub fn retain_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<'a> From<CodepointSequence<'a>> for SharedSequence<'a> {
    fn from(sequence: CodepointSequence<'a>) -> Self {
        Self::new(sequence)
    }
}

impl<'a> Deref for SharedSequence<'a> {
    type Target = CodepointSequence<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Retains an optional handle; an absent handle stays absent.
pub fn retain<'a>(sequence: Option<&SharedSequence<'a>>) -> Option<SharedSequence<'a>> {
    sequence.map(SharedSequence::retain)
}

/// Releases an optional handle; an absent handle is a no-op.
pub fn release(sequence: Option<SharedSequence<'_>>) {
    if let Some(sequence) = sequence {
        sequence.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utf::Codepoint;

    #[test]
    fn starts_with_one_reference() {
        let bytes = [0x41];
        let shared = SharedSequence::new(CodepointSequence::utf8(&bytes).unwrap());
        assert_eq!(shared.retain_count(), 1);
    }

    #[test]
    fn retain_release_balance() {
        let bytes = b"retain".to_vec();
        let shared: SharedSequence = CodepointSequence::utf8(&bytes).unwrap().into();
        let weak = Arc::downgrade(&shared.0);
        let retained: Vec<_> = (0..3).map(|_| shared.retain()).collect();
        assert_eq!(shared.retain_count(), 4);
        assert!(retained.iter().all(|other| other.ptr_eq(&shared)));

        for (released, handle) in retained.into_iter().enumerate() {
            handle.release();
            assert_eq!(weak.strong_count(), 3 - released);
        }
        assert_eq!(weak.strong_count(), 1);
        shared.release();
        assert_eq!(weak.strong_count(), 0);
        assert_eq!(bytes, b"retain");
    }

    #[test]
    fn absent_handle() {
        assert!(retain(None).is_none());
        release(None);
    }

    #[test]
    fn optional_handle() {
        let units = [0xD83D, 0xDE00];
        let shared = SharedSequence::new(CodepointSequence::utf16(&units).unwrap());
        let other = retain(Some(&shared));
        assert_eq!(shared.retain_count(), 2);
        release(other);
        assert_eq!(shared.retain_count(), 1);
    }

    #[test]
    fn decodes_through_handle() {
        let units = [0x1F600];
        let shared = SharedSequence::new(CodepointSequence::utf32(&units).unwrap());
        let retained = shared.retain();
        shared.release();
        let mut cursor = 0;
        assert_eq!(retained.codepoint_at(&mut cursor), Codepoint::Scalar('😀'));
        assert_eq!(cursor, 1);
    }
}
