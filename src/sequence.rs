use core::fmt;

use crate::DataError;

/// A non-empty sequence of Unicode scalar values, treated as one matchable
/// unit.
///
/// The sequence is stored in its UTF-8 encoding. Because UTF-8 preserves code
/// point order under bytewise comparison, the derived ordering is the
/// lexicographic order of the code points.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePointSequence {
    text: Box<str>,
}

impl CodePointSequence {
    /// Returns the sequence of the characters in `s`, or `None` if `s` is
    /// empty.
    pub fn new(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        Some(Self { text: s.into() })
    }

    /// Collects the given characters into a sequence, or returns `None` if
    /// there are none.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Option<Self> {
        let text: String = chars.into_iter().collect();
        Self::new(&text)
    }

    /// Builds a sequence from raw code point values, as they appear in the
    /// Unicode data files.
    pub fn from_code_points(code_points: &[u32]) -> Result<Self, DataError> {
        let mut text = String::with_capacity(code_points.len() * 4);
        for &cp in code_points {
            let c = char::from_u32(cp).ok_or(DataError::InvalidCodePoint(cp))?;
            text.push(c);
        }
        Self::new(&text).ok_or(DataError::EmptySequence)
    }

    /// The sequence in UTF-8 form.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> core::str::Chars<'_> {
        self.text.chars()
    }

    /// Number of code points in the sequence. Never zero.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Length of the UTF-8 encoding in bytes.
    pub fn utf8_len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the sequence is a single code point, and so is
    /// interchangeable with a one-character class member.
    pub fn is_single(&self) -> bool {
        let mut chars = self.text.chars();
        chars.next().is_some() && chars.next().is_none()
    }

    /// The first code point of the sequence.
    pub fn first(&self) -> char {
        self.text.chars().next().unwrap_or_default()
    }

    /// Returns `true` if `self` is a prefix of `other` and shorter than it.
    pub fn is_strict_prefix_of(&self, other: &Self) -> bool {
        self.text.len() < other.text.len() && other.text.starts_with(&*self.text)
    }
}

impl fmt::Debug for CodePointSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.text.chars().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:04X}", c as u32)?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for CodePointSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<char> for CodePointSequence {
    fn from(c: char) -> Self {
        Self {
            text: c.to_string().into_boxed_str(),
        }
    }
}

#[cfg(test)]
mod tests;
