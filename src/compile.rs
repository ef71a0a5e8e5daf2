use std::collections::BTreeSet;

use crate::{CodePointSequence, DataError, StringPropertySet};

/// Options for [`compile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Collect all of the single-code-point members of a set into one
    /// trailing [`CharClass`] leaf instead of one [`MatcherFragment::Sequence`]
    /// leaf each. Both forms match exactly the same inputs.
    pub merge_single_code_points: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            merge_single_code_points: true,
        }
    }
}

/// A set of characters, stored as sorted, non-overlapping, non-adjacent
/// inclusive ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CharClass {
    ranges: Vec<(char, char)>,
}

impl CharClass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self::from_ranges(chars.into_iter().map(|c| (c, c)))
    }

    /// Builds a class from arbitrary inclusive ranges. Empty ranges (where
    /// the start is after the end) are ignored.
    pub fn from_ranges(ranges: impl IntoIterator<Item = (char, char)>) -> Self {
        let mut sorted: Vec<(char, char)> = ranges
            .into_iter()
            .filter(|(lo, hi)| lo <= hi)
            .collect();
        sorted.sort_unstable();

        let mut merged: Vec<(char, char)> = Vec::with_capacity(sorted.len());
        for (lo, hi) in sorted {
            match merged.last_mut() {
                Some(last) if touches(last.1, lo) => last.1 = last.1.max(hi),
                _ => merged.push((lo, hi)),
            }
        }
        Self { ranges: merged }
    }

    /// Adds the inclusive range `lo..=hi` to the class.
    pub fn push_range(&mut self, mut lo: char, mut hi: char) {
        if lo > hi {
            return;
        }
        let mut at = self.ranges.partition_point(|&(start, _)| start < lo);
        if at > 0 && touches(self.ranges[at - 1].1, lo) {
            at -= 1;
            lo = self.ranges[at].0;
            hi = hi.max(self.ranges[at].1);
        }
        let mut end = at;
        while end < self.ranges.len() && touches(hi, self.ranges[end].0) {
            hi = hi.max(self.ranges[end].1);
            end += 1;
        }
        self.ranges.drain(at..end);
        self.ranges.insert(at, (lo, hi));
    }

    pub fn contains(&self, c: char) -> bool {
        let idx = self.ranges.partition_point(|&(_, hi)| hi < c);
        self.ranges.get(idx).is_some_and(|&(lo, _)| lo <= c)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    /// Every character in the class, in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.ranges.iter().flat_map(|&(lo, hi)| lo..=hi)
    }
}

/// Returns `true` if a range starting at `lo` overlaps or directly follows
/// a range ending at `hi`.
fn touches(hi: char, lo: char) -> bool {
    lo <= hi || Some(lo) == next_char(hi)
}

/// The successor of `c` as a Unicode scalar value, skipping the surrogates.
fn next_char(c: char) -> Option<char> {
    match c {
        '\u{D7FF}' => Some('\u{E000}'),
        _ => char::from_u32(c as u32 + 1),
    }
}

/// A compiled property of strings, ready to be spliced into a pattern at the
/// position of its `\p{...}` escape.
///
/// A fragment behaves as an ordered alternation: alternatives are tried in
/// order and the first that matches wins. The compiler orders them so that
/// a sequence is always tried before any shorter sequence, which guarantees
/// that a member which is a prefix of another member can never mask it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherFragment {
    /// Matches exactly this sequence of code points.
    Sequence(CodePointSequence),
    /// Matches any one character from the class.
    CharClass(CharClass),
    /// Tries each child in order.
    Alternation(Vec<MatcherFragment>),
}

impl MatcherFragment {
    /// Returns the number of bytes of `input` matched by the
    /// highest-priority alternative, or `None` if nothing matches at the
    /// start of `input`.
    pub fn match_prefix(&self, input: &str) -> Option<usize> {
        self.first_end(input, 0)
    }

    /// Appends to `out` the end offset of every alternative matching `input`
    /// at byte offset `at`, in priority order.
    ///
    /// A backtracking host tries these ends in turn when the rest of its
    /// pattern fails to match after the first.
    pub fn match_ends(&self, input: &str, at: usize, out: &mut Vec<usize>) {
        let Some(rest) = input.get(at..) else {
            return;
        };
        match self {
            Self::Sequence(seq) => {
                if rest.starts_with(seq.as_str()) {
                    out.push(at + seq.utf8_len());
                }
            }
            Self::CharClass(class) => {
                if let Some(c) = rest.chars().next()
                    && class.contains(c)
                {
                    out.push(at + c.len_utf8());
                }
            }
            Self::Alternation(children) => {
                for child in children {
                    child.match_ends(input, at, out);
                }
            }
        }
    }

    fn first_end(&self, input: &str, at: usize) -> Option<usize> {
        let rest = input.get(at..)?;
        match self {
            Self::Sequence(seq) => rest
                .starts_with(seq.as_str())
                .then(|| at + seq.utf8_len()),
            Self::CharClass(class) => {
                let c = rest.chars().next()?;
                class.contains(c).then(|| at + c.len_utf8())
            }
            Self::Alternation(children) => {
                children.iter().find_map(|child| child.first_end(input, at))
            }
        }
    }

    /// Returns `true` if some alternative matches all of `s`.
    pub fn accepts(&self, s: &str) -> bool {
        let mut ends = Vec::new();
        self.match_ends(s, 0, &mut ends);
        ends.contains(&s.len())
    }

    /// If every alternative matches exactly one character, returns the set
    /// of those characters. Otherwise returns `None`.
    pub fn single_code_points(&self) -> Option<BTreeSet<char>> {
        match self {
            Self::Sequence(seq) if seq.is_single() => Some(BTreeSet::from([seq.first()])),
            Self::Sequence(_) => None,
            Self::CharClass(class) => Some(class.chars().collect()),
            Self::Alternation(children) => {
                let mut all = BTreeSet::new();
                for child in children {
                    all.append(&mut child.single_code_points()?);
                }
                Some(all)
            }
        }
    }

    /// The top-level alternatives in the order they are tried. A leaf is its
    /// own single alternative.
    pub fn alternatives(&self) -> &[MatcherFragment] {
        match self {
            Self::Alternation(children) => children,
            _ => core::slice::from_ref(self),
        }
    }
}

/// Compiles a property of strings into a matcher fragment.
///
/// Multi-code-point sequences come first, ordered by descending length and
/// then ascending code point order. Single code points follow, either merged
/// into a [`CharClass`] or as individual sequences depending on `options`.
/// A set with only single code points compiles to a bare class, and a set
/// with only one alternative compiles to that alternative alone.
pub fn compile(set: &StringPropertySet, options: &CompileOptions) -> MatcherFragment {
    let (singles, mut multi): (Vec<_>, Vec<_>) = set.iter().partition(|seq| seq.is_single());
    multi.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut alternatives: Vec<MatcherFragment> = multi
        .into_iter()
        .cloned()
        .map(MatcherFragment::Sequence)
        .collect();

    if !singles.is_empty() {
        if options.merge_single_code_points {
            let class = CharClass::from_chars(singles.iter().map(|seq| seq.first()));
            alternatives.push(MatcherFragment::CharClass(class));
        } else {
            alternatives.extend(singles.into_iter().cloned().map(MatcherFragment::Sequence));
        }
    }

    log::trace!(
        "compiled {} ({} sequences) into {} alternatives",
        set.name(),
        set.len(),
        alternatives.len(),
    );

    if alternatives.len() == 1 {
        if let Some(only) = alternatives.pop() {
            return only;
        }
    }
    MatcherFragment::Alternation(alternatives)
}

/// Validates `sequences` as a set and compiles it. Fails if there are no
/// sequences or any sequence is repeated.
pub fn compile_sequences(
    name: &str,
    sequences: impl IntoIterator<Item = CodePointSequence>,
    options: &CompileOptions,
) -> Result<MatcherFragment, DataError> {
    let set = StringPropertySet::new(name, sequences)?;
    Ok(compile(&set, options))
}
