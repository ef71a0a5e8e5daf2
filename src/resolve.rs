use core::fmt;
use core::ops::Range;

use crate::{
    CompileOptions, MatcherFragment, PropertyError, SequencePropertyTable, compile, validate,
};

/// Where a `\p{...}` escape appeared in the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosingContext {
    /// Anywhere outside of a character class.
    TopLevel,
    /// Inside `[...]`, or inside `[^...]` when `negated` is set.
    CharacterClass { negated: bool },
}

/// A parsed `\p{Name}` or `\P{Name}` escape, as produced by the host's
/// pattern scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyReference {
    /// The property name between the braces, exactly as written.
    pub name: String,
    /// `true` for the `\P{...}` spelling.
    pub negated: bool,
    pub context: EnclosingContext,
    /// Byte range of the whole escape in the pattern source.
    pub span: Range<usize>,
}

impl PropertyReference {
    /// A non-negated reference outside of any character class.
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            negated: false,
            context: EnclosingContext::TopLevel,
            span,
        }
    }

    pub fn negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn in_context(mut self, context: EnclosingContext) -> Self {
        self.context = context;
        self
    }
}

/// The ordinary, code-point-valued property mechanism of the host engine.
///
/// Names that are not properties of strings are handed to this. Returning
/// `None` makes the escape an unknown property.
pub trait CodePointProperties {
    fn lookup(&self, name: &str) -> Option<fn(char) -> bool>;
}

/// A small set of binary code point properties that can be answered from
/// the standard library's character predicates and a few fixed ranges.
///
/// Hosts with full Unicode Character Database support should provide their
/// own [`CodePointProperties`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCodePointProperties;

impl CodePointProperties for BuiltinCodePointProperties {
    fn lookup(&self, name: &str) -> Option<fn(char) -> bool> {
        let predicate: fn(char) -> bool = match name {
            "Any" => |_: char| true,
            "ASCII" => |c: char| c.is_ascii(),
            "Alphabetic" | "Alpha" => char::is_alphabetic,
            "White_Space" | "space" => char::is_whitespace,
            "Lowercase" | "Lower" => char::is_lowercase,
            "Uppercase" | "Upper" => char::is_uppercase,
            "ASCII_Hex_Digit" | "AHex" => |c: char| c.is_ascii_hexdigit(),
            "Regional_Indicator" | "RI" => |c: char| matches!(c, '\u{1F1E6}'..='\u{1F1FF}'),
            "Emoji_Modifier" | "EMod" => |c: char| matches!(c, '\u{1F3FB}'..='\u{1F3FF}'),
            "Variation_Selector" | "VS" => |c: char| {
                matches!(
                    c,
                    '\u{180B}'..='\u{180D}'
                        | '\u{180F}'
                        | '\u{FE00}'..='\u{FE0F}'
                        | '\u{E0100}'..='\u{E01EF}'
                )
            },
            _ => return None,
        };
        Some(predicate)
    }
}

/// What a property escape turned out to denote.
#[derive(Clone)]
pub enum ResolvedEscape {
    /// A property of strings, already validated for its context and compiled.
    StringProperty {
        name: String,
        fragment: MatcherFragment,
    },
    /// An ordinary property, to be handled by the host's existing mechanism.
    CodePointProperty {
        name: String,
        predicate: fn(char) -> bool,
    },
    /// Neither kind of property recognizes the name.
    Unknown { name: String },
}

impl fmt::Debug for ResolvedEscape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringProperty { name, fragment } => f
                .debug_struct("StringProperty")
                .field("name", name)
                .field("alternatives", &fragment.alternatives().len())
                .finish(),
            Self::CodePointProperty { name, .. } => f
                .debug_struct("CodePointProperty")
                .field("name", name)
                .finish_non_exhaustive(),
            Self::Unknown { name } => f.debug_struct("Unknown").field("name", name).finish(),
        }
    }
}

/// Decides what each `\p{...}` escape of a pattern refers to.
///
/// A resolver only borrows its table, so any number of resolvers on any
/// number of threads can share one [`SequencePropertyTable`]. Each resolved
/// string property gets its own freshly compiled [`MatcherFragment`].
pub struct PropertyEscapeResolver<'a> {
    table: &'a SequencePropertyTable,
    code_points: &'a (dyn CodePointProperties + Sync),
    options: CompileOptions,
}

impl<'a> PropertyEscapeResolver<'a> {
    /// A resolver using [`BuiltinCodePointProperties`] for ordinary
    /// properties and the default [`CompileOptions`].
    pub fn new(table: &'a SequencePropertyTable) -> Self {
        Self::with_code_points(table, &BuiltinCodePointProperties)
    }

    pub fn with_code_points(
        table: &'a SequencePropertyTable,
        code_points: &'a (dyn CodePointProperties + Sync),
    ) -> Self {
        Self {
            table,
            code_points,
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn table(&self) -> &'a SequencePropertyTable {
        self.table
    }

    /// Resolves one escape.
    ///
    /// When the name is a property of strings, the reference is checked with
    /// [`validate`] before anything is compiled, and a rejection is returned
    /// as the error. Otherwise the name is handed to the code point property
    /// mechanism, and if that does not know it either the result is
    /// [`ResolvedEscape::Unknown`].
    pub fn resolve(&self, reference: &PropertyReference) -> Result<ResolvedEscape, PropertyError> {
        if let Some(set) = self.table.lookup(&reference.name) {
            validate(reference)?;
            return Ok(ResolvedEscape::StringProperty {
                name: reference.name.clone(),
                fragment: compile(set, &self.options),
            });
        }

        if let Some(predicate) = self.code_points.lookup(&reference.name) {
            return Ok(ResolvedEscape::CodePointProperty {
                name: reference.name.clone(),
                predicate,
            });
        }

        Ok(ResolvedEscape::Unknown {
            name: reference.name.clone(),
        })
    }

    /// Like [`Self::resolve`], but reports unknown names as
    /// [`PropertyError::UnknownProperty`] the way hosts normally treat them.
    pub fn resolve_or_reject(
        &self,
        reference: &PropertyReference,
    ) -> Result<ResolvedEscape, PropertyError> {
        match self.resolve(reference)? {
            ResolvedEscape::Unknown { name } => Err(PropertyError::UnknownProperty {
                name,
                span: reference.span.clone(),
            }),
            resolved => Ok(resolved),
        }
    }
}

#[cfg(test)]
mod tests;
