use core::fmt;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{CodePointSequence, DataError};

/// A Unicode version, as used to pin the property data a table was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnicodeVersion {
    pub major: u8,
    pub minor: u8,
}

impl UnicodeVersion {
    /// The version whose emoji data and property name list this library
    /// implements.
    pub const PINNED: Self = Self::new(15, 1);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for UnicodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The supported properties of strings.
///
/// Names from earlier drafts of the emoji regular expression proposals, such
/// as `Emoji_ZWJ_Sequence` without the `RGI_` prefix, are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StringProperty {
    BasicEmoji,
    EmojiKeycapSequence,
    RgiEmojiModifierSequence,
    RgiEmojiFlagSequence,
    RgiEmojiTagSequence,
    RgiEmojiZwjSequence,
    /// The union of all of the other properties.
    RgiEmoji,
}

impl StringProperty {
    pub const ALL: [Self; 7] = [
        Self::BasicEmoji,
        Self::EmojiKeycapSequence,
        Self::RgiEmojiModifierSequence,
        Self::RgiEmojiFlagSequence,
        Self::RgiEmojiTagSequence,
        Self::RgiEmojiZwjSequence,
        Self::RgiEmoji,
    ];

    /// Looks up a property by its exact name. Matching is case-sensitive and
    /// does not ignore underscores.
    pub fn from_name(name: &str) -> Option<Self> {
        let prop = match name {
            "Basic_Emoji" => Self::BasicEmoji,
            "Emoji_Keycap_Sequence" => Self::EmojiKeycapSequence,
            "RGI_Emoji_Modifier_Sequence" => Self::RgiEmojiModifierSequence,
            "RGI_Emoji_Flag_Sequence" => Self::RgiEmojiFlagSequence,
            "RGI_Emoji_Tag_Sequence" => Self::RgiEmojiTagSequence,
            "RGI_Emoji_ZWJ_Sequence" => Self::RgiEmojiZwjSequence,
            "RGI_Emoji" => Self::RgiEmoji,
            _ => return None,
        };
        Some(prop)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::BasicEmoji => "Basic_Emoji",
            Self::EmojiKeycapSequence => "Emoji_Keycap_Sequence",
            Self::RgiEmojiModifierSequence => "RGI_Emoji_Modifier_Sequence",
            Self::RgiEmojiFlagSequence => "RGI_Emoji_Flag_Sequence",
            Self::RgiEmojiTagSequence => "RGI_Emoji_Tag_Sequence",
            Self::RgiEmojiZwjSequence => "RGI_Emoji_ZWJ_Sequence",
            Self::RgiEmoji => "RGI_Emoji",
        }
    }

    /// Returns `true` for properties that are defined as a union of others
    /// rather than listed directly in the data files.
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::RgiEmoji)
    }
}

impl fmt::Display for StringProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, finite, non-empty set of code point sequences.
///
/// The sequences are kept in ascending code point order with no duplicates,
/// so two sets with the same members always compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringPropertySet {
    name: Box<str>,
    sequences: Box<[CodePointSequence]>,
}

impl StringPropertySet {
    /// Builds a set, failing if `sequences` is empty or lists any sequence
    /// more than once.
    pub fn new(
        name: impl Into<String>,
        sequences: impl IntoIterator<Item = CodePointSequence>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        let mut sequences: Vec<_> = sequences.into_iter().collect();
        if sequences.is_empty() {
            return Err(DataError::EmptySet { name });
        }
        sequences.sort_unstable();
        if let Some(pair) = sequences.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DataError::DuplicateSequence {
                name,
                sequence: pair[0].to_string(),
            });
        }
        Ok(Self {
            name: name.into_boxed_str(),
            sequences: sequences.into_boxed_slice(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of sequences in the set. Never zero.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// The sequences in ascending code point order.
    pub fn iter(&self) -> core::slice::Iter<'_, CodePointSequence> {
        self.sequences.iter()
    }

    pub fn contains(&self, sequence: &CodePointSequence) -> bool {
        self.sequences.binary_search(sequence).is_ok()
    }

    /// Length in code points of the longest sequence.
    pub fn max_len(&self) -> usize {
        self.sequences.iter().map(|seq| seq.len()).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a StringPropertySet {
    type Item = &'a CodePointSequence;
    type IntoIter = core::slice::Iter<'a, CodePointSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Something that can produce the raw sequence lists for the properties of
/// strings, such as a parsed copy of the Unicode emoji data files.
pub trait StringPropertySource {
    /// Returns each property name present in the data with its sequences.
    ///
    /// Implementations should fail if their data is not for `version`.
    fn load_string_property_data(
        &self,
        version: UnicodeVersion,
    ) -> Result<BTreeMap<String, Vec<CodePointSequence>>, DataError>;
}

impl StringPropertySource for BTreeMap<String, Vec<CodePointSequence>> {
    fn load_string_property_data(
        &self,
        _version: UnicodeVersion,
    ) -> Result<BTreeMap<String, Vec<CodePointSequence>>, DataError> {
        Ok(self.clone())
    }
}

/// Accumulates sequence lists and validates them into a [`SequencePropertyTable`].
#[derive(Debug)]
pub struct TableBuilder {
    version: UnicodeVersion,
    pending: HashMap<StringProperty, Vec<CodePointSequence>>,
}

impl TableBuilder {
    pub fn new(version: UnicodeVersion) -> Self {
        Self {
            version,
            pending: HashMap::new(),
        }
    }

    /// Adds sequences to a property. Calling this more than once for the
    /// same property extends its list.
    pub fn insert(
        &mut self,
        property: StringProperty,
        sequences: impl IntoIterator<Item = CodePointSequence>,
    ) -> &mut Self {
        self.pending.entry(property).or_default().extend(sequences);
        self
    }

    /// Like [`Self::insert`], but takes the property by name and fails for
    /// names that are not supported properties of strings.
    pub fn insert_named(
        &mut self,
        name: &str,
        sequences: impl IntoIterator<Item = CodePointSequence>,
    ) -> Result<&mut Self, DataError> {
        let property = StringProperty::from_name(name).ok_or_else(|| {
            DataError::UnsupportedProperty {
                name: name.to_string(),
            }
        })?;
        Ok(self.insert(property, sequences))
    }

    /// Validates every set and produces the immutable table.
    ///
    /// If `RGI_Emoji` was not supplied it is derived as the union of the
    /// other properties that were.
    pub fn build(self) -> Result<SequencePropertyTable, DataError> {
        let Self {
            version,
            mut pending,
        } = self;

        let derive_rgi = !pending.contains_key(&StringProperty::RgiEmoji);

        let mut sets = HashMap::with_capacity(StringProperty::ALL.len());
        for (property, sequences) in pending.drain() {
            let set = StringPropertySet::new(property.name(), sequences)?;
            log::debug!("loaded {} sequences for {property}", set.len());
            sets.insert(property, set);
        }

        if derive_rgi && !sets.is_empty() {
            let union: BTreeSet<_> = StringProperty::ALL
                .iter()
                .filter_map(|property| sets.get(property))
                .flat_map(|set| set.iter().cloned())
                .collect();
            let set = StringPropertySet::new(StringProperty::RgiEmoji.name(), union)?;
            log::debug!(
                "derived {} with {} sequences from {} properties",
                StringProperty::RgiEmoji,
                set.len(),
                sets.len(),
            );
            sets.insert(StringProperty::RgiEmoji, set);
        }

        Ok(SequencePropertyTable { version, sets })
    }
}

/// The immutable mapping from property name to [`StringPropertySet`].
///
/// A table is built once, typically at startup, and is only ever read
/// afterwards. It is `Send + Sync` and can be shared between any number of
/// threads compiling patterns.
#[derive(Debug, Clone)]
pub struct SequencePropertyTable {
    version: UnicodeVersion,
    sets: HashMap<StringProperty, StringPropertySet>,
}

impl SequencePropertyTable {
    /// Builds a table from everything `source` provides for `version`.
    pub fn load(
        source: &impl StringPropertySource,
        version: UnicodeVersion,
    ) -> Result<Self, DataError> {
        let data = source.load_string_property_data(version)?;
        let mut builder = TableBuilder::new(version);
        for (name, sequences) in data {
            builder.insert_named(&name, sequences)?;
        }
        builder.build()
    }

    /// Returns the set for `name`, or `None` if `name` is not a supported
    /// property of strings or the data did not include it.
    pub fn lookup(&self, name: &str) -> Option<&StringPropertySet> {
        self.get(StringProperty::from_name(name)?)
    }

    pub fn get(&self, property: StringProperty) -> Option<&StringPropertySet> {
        self.sets.get(&property)
    }

    /// The Unicode version the table's data was loaded for.
    pub fn version(&self) -> UnicodeVersion {
        self.version
    }

    /// The properties present in this table, in [`StringProperty::ALL`] order.
    pub fn properties(&self) -> impl Iterator<Item = StringProperty> + '_ {
        StringProperty::ALL
            .into_iter()
            .filter(|property| self.sets.contains_key(property))
    }
}
