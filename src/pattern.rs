//! A small backtracking pattern engine that hosts property escapes.
//!
//! This is the reference integration for the rest of the crate: it scans
//! `\p{...}` escapes, asks a [`PropertyEscapeResolver`] what they mean, and
//! splices the resulting [`MatcherFragment`]s into its own node tree. It
//! supports literals, `.`, classes, groups, lookahead, the greedy `*`, `+`
//! and `?` quantifiers, `^`, `$` and alternation. Captures, backreferences,
//! counted repetition and case folding are not supported.

use core::cell::RefCell;
use core::ops::Range;

use u8char::u8char;

use crate::{
    CharClass, EnclosingContext, MatcherFragment, PropertyError, PropertyEscapeResolver,
    PropertyReference, ResolvedEscape,
};

/// Failure to compile a [`Pattern`].
///
/// Rejected property escapes come through the same channel as every other
/// syntax error, and always before any matching is attempted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("{msg} at {}..{}", .span.start, .span.end)]
    Syntax { msg: String, span: Range<usize> },
    #[error(transparent)]
    Property(#[from] PropertyError),
}

impl PatternError {
    /// Byte range in the pattern source that the error refers to.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Syntax { span, .. } => span.clone(),
            Self::Property(err) => err.span(),
        }
    }

    fn syntax(msg: impl Into<String>, span: Range<usize>) -> Self {
        Self::Syntax {
            msg: msg.into(),
            span,
        }
    }
}

#[derive(Debug, Clone)]
struct ClassSet {
    negated: bool,
    chars: CharClass,
    /// Code point property predicates, each with whether it was negated.
    properties: Vec<(fn(char) -> bool, bool)>,
}

impl ClassSet {
    fn new(negated: bool) -> Self {
        Self {
            negated,
            chars: CharClass::new(),
            properties: Vec::new(),
        }
    }

    fn matches(&self, c: char) -> bool {
        let found = self.chars.contains(c)
            || self
                .properties
                .iter()
                .any(|&(predicate, negated)| predicate(c) != negated);
        found != self.negated
    }
}

#[derive(Debug, Clone)]
enum Node {
    Empty,
    Literal(char),
    Any,
    Class(ClassSet),
    Strings(MatcherFragment),
    Concat(Vec<Node>),
    Alternation(Vec<Node>),
    Repeat {
        node: Box<Node>,
        min: u32,
        max: Option<u32>,
    },
    Lookahead {
        node: Box<Node>,
        negated: bool,
    },
    Start,
    End,
}

impl Node {
    fn allow_repetition(&self) -> bool {
        !matches!(self, Self::Start | Self::End | Self::Lookahead { .. })
    }
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    root: Node,
}

impl Pattern {
    /// Compiles `source`, resolving its property escapes with `resolver`.
    pub fn new(source: &str, resolver: &PropertyEscapeResolver<'_>) -> Result<Self, PatternError> {
        let mut parser = Parser {
            src: source,
            idx: 0,
            resolver,
        };
        let root = parser.parse_alternation()?;
        if parser.idx < source.len() {
            // Only an unbalanced `)` stops the top-level alternation early.
            return Err(PatternError::syntax(
                "unmatched ')'",
                parser.idx..parser.idx + 1,
            ));
        }
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Matches the pattern at byte offset `at` of `input`, returning the end
    /// offset of the match.
    pub fn match_at(&self, input: &str, at: usize) -> Option<usize> {
        if !input.is_char_boundary(at) {
            return None;
        }
        match_node(&self.root, input, at, &|end| Some(end))
    }

    /// Finds the leftmost match in `input`.
    pub fn find(&self, input: &str) -> Option<Range<usize>> {
        input
            .char_indices()
            .map(|(idx, _)| idx)
            .chain([input.len()])
            .find_map(|at| self.match_at(input, at).map(|end| at..end))
    }

    /// Returns `true` if the pattern can match all of `input`.
    pub fn is_full_match(&self, input: &str) -> bool {
        match_node(&self.root, input, 0, &|end| (end == input.len()).then_some(end)).is_some()
    }
}

struct Parser<'s, 'r> {
    src: &'s str,
    idx: usize,
    resolver: &'r PropertyEscapeResolver<'r>,
}

impl<'s> Parser<'s, '_> {
    fn rest(&self) -> &'s str {
        &self.src[self.idx..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.idx += c.len_utf8();
        Some(c)
    }

    fn try_consume(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.idx += s.len();
            true
        } else {
            false
        }
    }

    fn parse_alternation(&mut self) -> Result<Node, PatternError> {
        let mut branches = vec![self.parse_concat()?];
        while self.try_consume("|") {
            branches.push(self.parse_concat()?);
        }
        Ok(if branches.len() == 1 {
            branches.pop().unwrap_or(Node::Empty)
        } else {
            Node::Alternation(branches)
        })
    }

    fn parse_concat(&mut self) -> Result<Node, PatternError> {
        let mut nodes = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            nodes.push(self.parse_quantified()?);
        }
        Ok(match nodes.len() {
            0 => Node::Empty,
            1 => nodes.pop().unwrap_or(Node::Empty),
            _ => Node::Concat(nodes),
        })
    }

    fn parse_quantified(&mut self) -> Result<Node, PatternError> {
        let begin = self.idx;
        let mut node = self.parse_atom()?;
        while let Some(c @ ('*' | '+' | '?')) = self.peek() {
            if !node.allow_repetition() {
                return Err(PatternError::syntax(
                    "nothing to repeat",
                    begin..self.idx + 1,
                ));
            }
            self.bump();
            let (min, max) = match c {
                '*' => (0, None),
                '+' => (1, None),
                _ => (0, Some(1)),
            };
            node = Node::Repeat {
                node: Box::new(node),
                min,
                max,
            };
        }
        Ok(node)
    }

    fn parse_atom(&mut self) -> Result<Node, PatternError> {
        let begin = self.idx;
        let Some(c) = self.bump() else {
            return Err(PatternError::syntax("unexpected end of pattern", begin..begin));
        };
        match c {
            '.' => Ok(Node::Any),
            '^' => Ok(Node::Start),
            '$' => Ok(Node::End),
            '(' => self.parse_group(begin),
            '[' => self.parse_class(begin),
            '\\' => self.parse_escape(begin),
            '*' | '+' | '?' => Err(PatternError::syntax(
                "nothing to repeat",
                begin..self.idx,
            )),
            _ => Ok(Node::Literal(c)),
        }
    }

    fn parse_group(&mut self, begin: usize) -> Result<Node, PatternError> {
        let lookahead = if self.try_consume("?:") {
            None
        } else if self.try_consume("?=") {
            Some(false)
        } else if self.try_consume("?!") {
            Some(true)
        } else if self.peek() == Some('?') {
            return Err(PatternError::syntax(
                "unsupported group syntax",
                begin..self.idx + 1,
            ));
        } else {
            None
        };

        let inner = self.parse_alternation()?;
        if !self.try_consume(")") {
            return Err(PatternError::syntax("unclosed group", begin..self.idx));
        }
        Ok(match lookahead {
            Some(negated) => Node::Lookahead {
                node: Box::new(inner),
                negated,
            },
            None => inner,
        })
    }

    /// Parses what follows a backslash outside of a class.
    fn parse_escape(&mut self, begin: usize) -> Result<Node, PatternError> {
        match self.peek() {
            Some(p @ ('p' | 'P')) => {
                self.bump();
                self.parse_property_escape(begin, p == 'P', EnclosingContext::TopLevel)
            }
            _ => self.parse_char_escape(begin).map(Node::Literal),
        }
    }

    /// Parses and resolves the rest of a `\p{...}` or `\P{...}` escape.
    ///
    /// The resolver rejects properties of strings wherever `context` does not
    /// allow them, so inside a class the result is always a [`Node::Class`].
    fn parse_property_escape(
        &mut self,
        begin: usize,
        negated: bool,
        context: EnclosingContext,
    ) -> Result<Node, PatternError> {
        let reference = self.parse_property_reference(begin, negated, context)?;
        match self.resolver.resolve(&reference)? {
            ResolvedEscape::StringProperty { fragment, .. } => Ok(Node::Strings(fragment)),
            ResolvedEscape::CodePointProperty { predicate, .. } => {
                let mut class = ClassSet::new(false);
                class.properties.push((predicate, reference.negated));
                Ok(Node::Class(class))
            }
            ResolvedEscape::Unknown { name } => Err(PropertyError::UnknownProperty {
                name,
                span: reference.span,
            }
            .into()),
        }
    }

    /// Parses `{Name}` after `\p` or `\P`. The span covers the whole escape.
    fn parse_property_reference(
        &mut self,
        begin: usize,
        negated: bool,
        context: EnclosingContext,
    ) -> Result<PropertyReference, PatternError> {
        if !self.try_consume("{") {
            return Err(PatternError::syntax(
                "expected '{' after property escape",
                begin..self.idx,
            ));
        }
        let Some(len) = self.rest().find('}') else {
            return Err(PatternError::syntax(
                "unclosed property escape",
                begin..self.src.len(),
            ));
        };
        let name = &self.rest()[..len];
        if name.is_empty() {
            return Err(PatternError::syntax(
                "empty property name",
                begin..self.idx + 1,
            ));
        }
        let name = name.to_string();
        self.idx += len + 1;
        Ok(PropertyReference {
            name,
            negated,
            context,
            span: begin..self.idx,
        })
    }

    /// Parses an escape that stands for a single character.
    fn parse_char_escape(&mut self, begin: usize) -> Result<char, PatternError> {
        let Some(c) = self.bump() else {
            return Err(PatternError::syntax("trailing backslash", begin..self.idx));
        };
        match c {
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => {
                if !self.try_consume("{") {
                    return Err(PatternError::syntax("expected '{' after \\u", begin..self.idx));
                }
                let Some(len) = self.rest().find('}') else {
                    return Err(PatternError::syntax("unclosed \\u{...}", begin..self.src.len()));
                };
                let hex = &self.rest()[..len];
                self.idx += len + 1;
                u32::from_str_radix(hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| PatternError::syntax("invalid code point", begin..self.idx))
            }
            c if c.is_ascii_punctuation() => Ok(c),
            _ => Err(PatternError::syntax(
                format!("unknown escape '\\{c}'"),
                begin..self.idx,
            )),
        }
    }

    fn parse_class(&mut self, begin: usize) -> Result<Node, PatternError> {
        let negated = self.try_consume("^");
        let context = EnclosingContext::CharacterClass { negated };
        let mut class = ClassSet::new(negated);

        loop {
            let item_begin = self.idx;
            let Some(c) = self.bump() else {
                return Err(PatternError::syntax("unclosed character class", begin..self.idx));
            };
            let lo = match c {
                ']' => break,
                '\\' => match self.peek() {
                    Some(p @ ('p' | 'P')) => {
                        self.bump();
                        match self.parse_property_escape(item_begin, p == 'P', context)? {
                            Node::Class(inner) => class.properties.extend(inner.properties),
                            node => unreachable!("class item resolved to {node:?}"),
                        }
                        continue;
                    }
                    _ => self.parse_char_escape(item_begin)?,
                },
                c => c,
            };

            let hi = if self.rest().starts_with('-') && !self.rest().starts_with("-]") {
                self.bump();
                let hi_begin = self.idx;
                match self.bump() {
                    Some('\\') => match self.peek() {
                        Some(p @ ('p' | 'P')) => {
                            self.bump();
                            // Reports properties of strings and unknown names
                            // by name before the range itself is rejected.
                            self.parse_property_escape(hi_begin, p == 'P', context)?;
                            return Err(PatternError::syntax(
                                "character class range cannot end in a property escape",
                                item_begin..self.idx,
                            ));
                        }
                        _ => self.parse_char_escape(hi_begin)?,
                    },
                    Some(c) => c,
                    None => {
                        return Err(PatternError::syntax(
                            "unclosed character class",
                            begin..self.idx,
                        ));
                    }
                }
            } else {
                lo
            };
            if lo > hi {
                return Err(PatternError::syntax(
                    "character class range out of order",
                    item_begin..self.idx,
                ));
            }
            class.chars.push_range(lo, hi);
        }

        Ok(Node::Class(class))
    }
}

/// Steps over the character at `pos`, returning it and the offset after it.
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    let rest = input.get(pos..)?;
    let (Some(c), _) = u8char::from_string_prefix(rest) else {
        return None;
    };
    let s = c.as_str();
    Some((s.chars().next()?, pos + s.len()))
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

type Cont<'k> = &'k dyn Fn(usize) -> Option<usize>;

/// Matches `node` at `pos` and then calls `k` with the position after it,
/// backtracking into `node` whenever `k` fails.
fn match_node(node: &Node, input: &str, pos: usize, k: Cont<'_>) -> Option<usize> {
    match node {
        Node::Empty => k(pos),
        Node::Literal(expected) => match next_char(input, pos) {
            Some((c, next)) if c == *expected => k(next),
            _ => None,
        },
        Node::Any => match next_char(input, pos) {
            Some((c, next)) if !is_line_terminator(c) => k(next),
            _ => None,
        },
        Node::Class(class) => match next_char(input, pos) {
            Some((c, next)) if class.matches(c) => k(next),
            _ => None,
        },
        Node::Strings(fragment) => {
            let mut ends = Vec::new();
            fragment.match_ends(input, pos, &mut ends);
            ends.into_iter().find_map(k)
        }
        Node::Concat(nodes) => match_concat(nodes, input, pos, k),
        Node::Alternation(branches) => branches
            .iter()
            .find_map(|branch| match_node(branch, input, pos, k)),
        Node::Repeat { node, min, max } => match_repeat(node, *min, *max, input, pos, k),
        Node::Lookahead { node, negated } => {
            let found = match_node(node, input, pos, &|end| Some(end)).is_some();
            if found != *negated { k(pos) } else { None }
        }
        Node::Start => (pos == 0).then(|| k(pos)).flatten(),
        Node::End => (pos == input.len()).then(|| k(pos)).flatten(),
    }
}

fn match_concat(nodes: &[Node], input: &str, pos: usize, k: Cont<'_>) -> Option<usize> {
    match nodes.split_first() {
        None => k(pos),
        Some((first, rest)) => {
            match_node(first, input, pos, &|next| match_concat(rest, input, next, k))
        }
    }
}

/// One level of a repetition: where the iteration started and which of its
/// candidate ends in the shared stack are still untried.
struct RepeatFrame {
    pos: usize,
    start: usize,
    next: usize,
}

/// Matches `node` greedily between `min` and `max` times.
///
/// Iterations are tracked on an explicit stack rather than by recursion, so
/// the depth of the call stack does not grow with the length of the input.
fn match_repeat(
    node: &Node,
    min: u32,
    max: Option<u32>,
    input: &str,
    pos: usize,
    k: Cont<'_>,
) -> Option<usize> {
    let min = min as usize;
    let max = max.map(|max| max as usize);

    // Candidate ends of every frame, each frame owning the tail that was
    // pushed when it was created.
    let mut ends: Vec<usize> = Vec::new();
    let step = |count: usize, pos: usize, ends: &mut Vec<usize>| -> RepeatFrame {
        let start = ends.len();
        if max.is_none_or(|max| count < max) {
            let found = RefCell::new(Vec::new());
            match_node(node, input, pos, &|end| {
                found.borrow_mut().push(end);
                None
            });
            for end in found.into_inner() {
                // An iteration that consumed nothing cannot make progress.
                if (end == pos && count >= min) || ends[start..].contains(&end) {
                    continue;
                }
                ends.push(end);
            }
        }
        RepeatFrame {
            pos,
            start,
            next: start,
        }
    };

    let mut frames = vec![step(0, pos, &mut ends)];
    loop {
        let depth = frames.len();
        let frame = frames.last_mut()?;
        if frame.next < ends.len() {
            let next = ends[frame.next];
            frame.next += 1;
            let child = step(depth, next, &mut ends);
            frames.push(child);
            continue;
        }

        let (pos, start) = (frame.pos, frame.start);
        frames.pop();
        ends.truncate(start);
        // The frame at `depth` was reached after `depth - 1` iterations.
        if depth > min
            && let Some(found) = k(pos)
        {
            return Some(found);
        }
    }
}
