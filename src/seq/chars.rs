use crate::seq::Sequence;

/// A [`Sequence`] over the characters of a string.
///
/// Characters are collected up front so that indexed access is O(1); the
/// engine addresses elements by index heavily and `str` does not support
/// that directly.
#[derive(Debug, Clone)]
pub struct CharSequence {
    chars: Vec<char>,
}

impl CharSequence {
    /// Creates a character sequence from a string.
    pub fn new(text: &str) -> CharSequence {
        CharSequence {
            chars: text.chars().collect(),
        }
    }

    /// Returns the characters as a slice.
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl<'a> From<&'a str> for CharSequence {
    fn from(text: &'a str) -> CharSequence {
        CharSequence::new(text)
    }
}

impl Sequence for CharSequence {
    type Item = char;

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn get(&self, index: usize) -> Option<&char> {
        self.chars.get(index)
    }
}

#[test]
fn test_char_sequence() {
    let seq = CharSequence::new("abc");
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.get(0), Some(&'a'));
    assert_eq!(seq.get(3), None);
    assert!(CharSequence::new("").is_empty());
}
