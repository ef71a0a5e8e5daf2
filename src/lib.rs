//! Support for Unicode *properties of strings* in regular expression engines.
//!
//! Most Unicode properties used in `\p{...}` escapes classify single code
//! points. A property of strings instead stands for a finite set of code point
//! *sequences*, such as the emoji keycap, flag, modifier, tag and ZWJ
//! sequences listed by
//! [UTS #51](https://www.unicode.org/reports/tr51/#Emoji_Sets). Matching
//! `\p{RGI_Emoji}` therefore means matching one of a few thousand strings of
//! varying length, not one character.
//!
//! This library implements the pieces an engine needs for that, as of
//! Unicode 15.1:
//!
//! - [`SequencePropertyTable`] maps each supported property name to its
//!   [`StringPropertySet`]. It is built once, from data such as the UTS #51
//!   data files parsed by [`EmojiSequenceData`], and is immutable and freely
//!   shareable between threads afterwards.
//!
//! - [`compile`] turns a set into a [`MatcherFragment`], an ordered
//!   alternation in which a longer sequence is always tried before any
//!   shorter sequence. Matching `\p{P}` where `P` contains both `a` and `ab`
//!   against `abc` therefore consumes `ab`.
//!
//! - [`PropertyEscapeResolver`] decides what a `\p{Name}` escape means. Names
//!   of properties of strings are checked by [`validate`] and compiled, and
//!   all other names are handed to the host's ordinary code point property
//!   mechanism through [`CodePointProperties`].
//!
//! - [`validate`] rejects a property of strings used with `\P{...}`, inside
//!   a character class, or inside a negated character class. A character
//!   class matches exactly one character, and a property of strings may
//!   match several, so these combinations are errors rather than having some
//!   surprising meaning. Write `\p{RGI_Emoji}|[a-z]` instead of
//!   `[\p{RGI_Emoji}a-z]`, and use a negative lookahead such as
//!   `(?!\p{RGI_Emoji})` in place of negation.
//!
//! All rejections happen while a pattern is being compiled and carry the
//! byte range of the offending escape, so a host can report them the same
//! way as any other syntax error.
//!
//! [`Pattern`] is a small backtracking engine built on the above. It serves
//! as the reference for how a host splices fragments into its own pattern
//! tree, and is useful on its own for simple emoji-aware matching:
//!
//! ```
//! use string_properties::{
//!     EmojiSequenceData, Pattern, PatternError, PropertyError, PropertyEscapeResolver,
//!     SequencePropertyTable, UnicodeVersion,
//! };
//!
//! let data = EmojiSequenceData::parse(
//!     "# Version: 15.1\n\
//!      0023 FE0F 20E3 ; Emoji_Keycap_Sequence ; keycap: #\n\
//!      1F1FA 1F1F8    ; RGI_Emoji_Flag_Sequence ; flag: United States\n",
//! )?;
//! let table = SequencePropertyTable::load(&data, UnicodeVersion::PINNED)?;
//! let resolver = PropertyEscapeResolver::new(&table);
//!
//! let pattern = Pattern::new(r"\p{RGI_Emoji}|[a-z]+", &resolver).unwrap();
//! assert_eq!(pattern.find("go \u{1F1FA}\u{1F1F8}!"), Some(0..2));
//!
//! let err = Pattern::new(r"[\p{RGI_Emoji}a-z]+", &resolver).unwrap_err();
//! assert!(matches!(
//!     err,
//!     PatternError::Property(PropertyError::NotAllowedInCharacterClass { .. })
//! ));
//! assert_eq!(err.span(), 1..14);
//! # Ok::<(), string_properties::DataError>(())
//! ```
//!
//! The library logs through the [`log`](https://docs.rs/log) facade but never
//! installs a logger of its own.

mod compile;
mod error;
mod pattern;
mod resolve;
mod sequence;
mod table;
mod ucd;
mod validate;

pub use compile::*;
pub use error::*;
pub use pattern::{Pattern, PatternError};
pub use resolve::*;
pub use sequence::*;
pub use table::*;
pub use ucd::*;
pub use validate::*;

#[cfg(test)]
pub(crate) mod test_data;
