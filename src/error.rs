use core::ops::Range;

use crate::UnicodeVersion;

/// A user-facing problem with a `\p{...}` or `\P{...}` escape, detected while
/// a pattern is being compiled.
///
/// Every variant carries the property name as written and the byte range of
/// the escape in the pattern source, so that the host can report it exactly
/// like any other syntax error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The name is not recognized as either a property of strings or a
    /// property of code points.
    #[error("unknown Unicode property name `{name}` at {}..{}", .span.start, .span.end)]
    UnknownProperty { name: String, span: Range<usize> },

    /// A property of strings was used with `\P{...}` or inside a negated
    /// character class.
    #[error(
        "property of strings `{name}` cannot be negated (at {}..{})",
        .span.start,
        .span.end
    )]
    NegationNotSupported { name: String, span: Range<usize> },

    /// A property of strings was used inside a character class. Use an
    /// alternation such as `\p{Name}|[...]` instead.
    #[error(
        "property of strings `{name}` is not allowed in a character class (at {}..{})",
        .span.start,
        .span.end
    )]
    NotAllowedInCharacterClass { name: String, span: Range<usize> },
}

impl PropertyError {
    /// The property name the error refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownProperty { name, .. }
            | Self::NegationNotSupported { name, .. }
            | Self::NotAllowedInCharacterClass { name, .. } => name,
        }
    }

    /// The byte range of the offending escape in the pattern source.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::UnknownProperty { span, .. }
            | Self::NegationNotSupported { span, .. }
            | Self::NotAllowedInCharacterClass { span, .. } => span.clone(),
        }
    }
}

/// Malformed property-of-strings data.
///
/// These indicate a defect in the data being loaded rather than in a user's
/// pattern. A table is never produced when any of them occur.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("property `{name}` has no sequences")]
    EmptySet { name: String },

    #[error("property `{name}` lists the sequence {sequence} more than once")]
    DuplicateSequence { name: String, sequence: String },

    #[error("empty code point sequence")]
    EmptySequence,

    #[error("U+{0:04X} is not a Unicode scalar value")]
    InvalidCodePoint(u32),

    #[error("`{name}` is not a supported property of strings")]
    UnsupportedProperty { name: String },

    #[error("data is for Unicode {found}, but the table is pinned to Unicode {expected}")]
    VersionMismatch {
        expected: UnicodeVersion,
        found: UnicodeVersion,
    },

    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },
}
