//! Sequence abstractions.
//!
//! The engine does not know anything about strings or files.  It operates
//! on anything implementing [`Sequence`]: an immutable, indexable run of
//! mutually comparable elements.  Slices and vectors implement the trait
//! directly so arbitrary token streams can be diffed without an adapter;
//! [`CharSequence`] and [`LineSequence`] are the two text-facing adapters.

mod chars;
mod lines;

pub use self::chars::CharSequence;
pub use self::lines::{Line, LineOptions, LineSequence};

use crate::DiffError;

/// An immutable, indexable sequence of comparable elements.
///
/// Implementations are read-only views: once constructed they never
/// change, which is what allows the engine to share them freely across
/// sub-ranges of a run.
pub trait Sequence {
    /// The element type.
    type Item: PartialEq;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the element at `index`, or `None` when out of range.
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Returns `true` if the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checked element access.
    ///
    /// Like [`Sequence::get`] but failing with
    /// [`DiffError::IndexOutOfBounds`] instead of returning `None`.
    fn item(&self, index: usize) -> Result<&Self::Item, DiffError> {
        self.get(index).ok_or(DiffError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }
}

impl<T: PartialEq> Sequence for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T: PartialEq> Sequence for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

#[test]
fn test_slice_sequence() {
    let tokens = [1u32, 2, 3];
    let seq: &[u32] = &tokens;
    assert_eq!(Sequence::len(seq), 3);
    assert_eq!(seq.get(1), Some(&2));
    assert_eq!(Sequence::get(seq, 3), None);
    assert!(matches!(
        seq.item(3),
        Err(DiffError::IndexOutOfBounds { index: 3, len: 3 })
    ));
}
