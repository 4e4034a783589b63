// api.rs - Compiled patterns, match snapshots and capture access.
//
// `Regex` wraps an engine handle plus the metadata read once at compile time.
// `Captures` is an immutable snapshot of one match that borrows both the
// regex and the subject it was matched against.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use log::debug;

use crate::engine::{self, Engine, Limits, Slots};
use crate::error::{Error, Result};
use crate::flags::Flags;
use crate::iter::{FindIter, Matches};

/// A compiled regular expression.
///
/// Patterns are compiled with [`Flags::default`], which turns on extended
/// mode: whitespace is insignificant and `#` starts a comment. Use
/// [`Regex::with_flags`] with `"-x"` or [`RegexBuilder::extended`] to match
/// whitespace literally.
///
/// # Examples
///
/// ```
/// use rextra::Regex;
///
/// let re = Regex::new(r"(?<year> \d{4}) - (?<month> \d{2})").unwrap();
/// let caps = re.captures("due 2026-02").unwrap();
/// assert_eq!(caps.text("year").unwrap(), Some("2026"));
/// assert_eq!(caps.bounds(1).unwrap(), Some((4, 8)));
/// ```
#[derive(Clone)]
pub struct Regex {
    source: String,
    flags: Flags,
    pub(crate) engine: Engine,
    captures_len: usize,
}

impl Regex {
    /// Compile a pattern with the default flags.
    pub fn new(pattern: &str) -> Result<Regex> {
        RegexBuilder::new(pattern).build()
    }

    /// Compile a pattern with a flag string applied on top of the defaults.
    ///
    /// ```
    /// use rextra::{Error, Regex};
    ///
    /// let re = Regex::with_flags("hello world", "i-x").unwrap();
    /// assert!(re.is_match("Hello World"));
    ///
    /// let err = Regex::with_flags("hello", "q").unwrap_err();
    /// assert!(matches!(err, Error::UnsupportedFlag { .. }));
    /// ```
    pub fn with_flags(pattern: &str, flags: &str) -> Result<Regex> {
        RegexBuilder::new(pattern).flags(flags).build()
    }

    /// Create a [`RegexBuilder`] for fine-grained control over compilation.
    pub fn builder(pattern: &str) -> RegexBuilder {
        RegexBuilder::new(pattern)
    }

    /// The pattern text as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The effective flag set.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Return the number of capture groups in the pattern (excluding group 0).
    pub fn captures_len(&self) -> usize {
        self.captures_len
    }

    /// Capture names in index order, starting with group 0 (always `None`).
    pub fn capture_names(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.engine.group_names()
    }

    /// The 1-based index of the group called `name`.
    pub fn capture_index(&self, name: &str) -> Option<usize> {
        self.engine.group_index(name)
    }

    /// Resolve a group reference to a slot index.
    ///
    /// Names are looked up first; an unknown name is
    /// [`Error::NoSuchCaptureName`] and an index past the capture count is
    /// [`Error::NoSuchCaptureIndex`].
    pub fn resolve(&self, group: Group<'_>) -> Result<usize> {
        match group {
            Group::Whole => Ok(0),
            Group::Index(index) if index <= self.captures_len => Ok(index),
            Group::Index(index) => Err(Error::NoSuchCaptureIndex { index }),
            Group::Name(name) => {
                self.capture_index(name)
                    .ok_or_else(|| Error::NoSuchCaptureName {
                        name: name.to_string(),
                    })
            }
        }
    }

    /// Check whether `subject` matches the pattern anywhere.
    pub fn is_match(&self, subject: &str) -> bool {
        self.engine.is_match(subject, 0, subject.len())
    }

    /// Return the first match in `subject`, or `None` if no match.
    pub fn find<'s>(&self, subject: &'s str) -> Option<Match<'s>> {
        self.captures(subject).map(|caps| caps.whole())
    }

    /// Iterate over the whole-match spans of all non-overlapping matches.
    pub fn find_iter<'r, 's>(&'r self, subject: &'s str) -> FindIter<'r, 's> {
        FindIter::new(self.matches(subject))
    }

    /// Return the first match with all capture groups, or `None`.
    pub fn captures<'r, 's>(&'r self, subject: &'s str) -> Option<Captures<'r, 's>> {
        let slots = self.engine.execute_once(subject, 0, subject.len())?;
        Captures::new(self, subject, slots)
    }

    /// Return the first match inside `subject[start..end]`.
    ///
    /// Look-around assertions still see the whole subject. `start > end` is
    /// an empty range and yields `Ok(None)`.
    pub fn captures_at<'r, 's>(
        &'r self,
        subject: &'s str,
        start: usize,
        end: usize,
    ) -> Result<Option<Captures<'r, 's>>> {
        check_range(subject, start, end)?;
        if start > end {
            return Ok(None);
        }
        Ok(self
            .engine
            .execute_once(subject, start, end)
            .and_then(|slots| Captures::new(self, subject, slots)))
    }

    /// Iterate over all non-overlapping matches in `subject`.
    pub fn matches<'r, 's>(&'r self, subject: &'s str) -> Matches<'r, 's> {
        Matches::new(self, subject, 0, subject.len())
    }

    /// Iterate over all non-overlapping matches in `subject[start..end]`.
    ///
    /// ```
    /// use rextra::{Error, Regex};
    ///
    /// let re = Regex::new(r"\d").unwrap();
    /// let found: Vec<_> = re.matches_in("1a2b3", 1, 4).unwrap().map(|c| c.start()).collect();
    /// assert_eq!(found, vec![2]);
    ///
    /// assert!(re.matches_in("1a2", 3, 1).unwrap().next().is_none());
    /// assert!(matches!(re.matches_in("1a2", 0, 9), Err(Error::InvalidRange { .. })));
    /// ```
    pub fn matches_in<'r, 's>(
        &'r self,
        subject: &'s str,
        start: usize,
        end: usize,
    ) -> Result<Matches<'r, 's>> {
        check_range(subject, start, end)?;
        Ok(Matches::new(self, subject, start, end))
    }
}

/// `end` must lie inside the subject and both offsets on character
/// boundaries; `start > end` is valid and means "nothing to search".
fn check_range(subject: &str, start: usize, end: usize) -> Result<()> {
    let valid = end <= subject.len()
        && subject.is_char_boundary(end)
        && (start > end || subject.is_char_boundary(start));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidRange {
            start,
            end,
            len: subject.len(),
        })
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Regex")
            .field("source", &self.source)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Quote `text` so that it matches literally, in extended mode or not.
///
/// ```
/// use rextra::{escape, Regex};
///
/// let re = Regex::new(&escape("1 + 1 = 2?")).unwrap();
/// assert!(re.is_match("is 1 + 1 = 2?"));
/// ```
pub fn escape(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() {
            quoted.push_str(&format!("\\x{{{:X}}}", u32::from(c)));
        } else {
            if regex_syntax::is_meta_character(c) {
                quoted.push('\\');
            }
            quoted.push(c);
        }
    }
    quoted
}

// === RegexBuilder ===

/// Builder for compiling a [`Regex`] with custom options.
///
/// Starts from [`Flags::default`], so extended mode is on until
/// [`extended(false)`](Self::extended) or a `"-x"` flag string turns it off.
///
/// # Examples
///
/// ```
/// use rextra::Regex;
///
/// let re = Regex::builder(r"hello world")
///     .case_insensitive(true)
///     .extended(false)
///     .build()
///     .unwrap();
/// assert!(re.is_match("Hello World"));
/// ```
#[derive(Debug, Clone)]
pub struct RegexBuilder {
    pattern: String,
    flags: Flags,
    limits: Limits,
    flag_error: Option<Error>,
}

impl RegexBuilder {
    /// Create a new builder for the given pattern.
    pub fn new(pattern: &str) -> Self {
        RegexBuilder {
            pattern: pattern.to_string(),
            flags: Flags::default(),
            limits: Limits::default(),
            flag_error: None,
        }
    }

    /// Apply a flag string such as `"im"` or `"i-x<crlf>"`.
    ///
    /// An unsupported token is reported by [`build`](Self::build).
    pub fn flags(mut self, spec: &str) -> Self {
        match self.flags.apply(spec) {
            Ok(flags) => self.flags = flags,
            Err(err) => {
                self.flag_error.get_or_insert(err);
            }
        }
        self
    }

    fn toggle(mut self, flag: Flags, yes: bool) -> Self {
        self.flags.set(flag, yes);
        self
    }

    /// Enable or disable case-insensitive matching.
    pub fn case_insensitive(self, yes: bool) -> Self {
        self.toggle(Flags::CASE_INSENSITIVE, yes)
    }

    /// Enable or disable `^`/`$` matching at every line boundary.
    pub fn multi_line(self, yes: bool) -> Self {
        self.toggle(Flags::MULTI_LINE, yes)
    }

    /// Enable or disable `.` matching `\n`.
    pub fn dot_matches_newline(self, yes: bool) -> Self {
        self.toggle(Flags::DOT_MATCHES_NEW_LINE, yes)
    }

    /// Enable or disable extended mode (whitespace and `#` comments ignored).
    /// On by default.
    pub fn extended(self, yes: bool) -> Self {
        self.toggle(Flags::EXTENDED, yes)
    }

    /// Swap the meaning of greedy and lazy quantifiers.
    pub fn swap_greed(self, yes: bool) -> Self {
        self.toggle(Flags::SWAP_GREED, yes)
    }

    /// Enable or disable Unicode-aware classes. On by default.
    pub fn unicode(self, yes: bool) -> Self {
        self.toggle(Flags::UNICODE, yes)
    }

    /// Treat `\r\n` as a line terminator for `^`/`$` in multi-line mode.
    pub fn crlf(self, yes: bool) -> Self {
        self.toggle(Flags::CRLF, yes)
    }

    /// Allow octal escapes such as `\141`.
    pub fn octal(self, yes: bool) -> Self {
        self.toggle(Flags::OCTAL, yes)
    }

    /// Require every search to match at its start offset.
    pub fn anchored(self, yes: bool) -> Self {
        self.toggle(Flags::ANCHORED, yes)
    }

    /// Set raw option flags. See [`Flags`].
    pub fn option(mut self, flags: Flags) -> Self {
        self.flags |= flags;
        self
    }

    /// Approximate heap limit, in bytes, for the engine's compiled program.
    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.limits.size_limit = Some(bytes);
        self
    }

    /// Maximum nesting depth of the pattern syntax.
    pub fn nest_limit(mut self, depth: u32) -> Self {
        self.limits.nest_limit = Some(depth);
        self
    }

    /// Compile the pattern into a [`Regex`].
    pub fn build(self) -> Result<Regex> {
        if let Some(err) = self.flag_error {
            return Err(err);
        }
        let engine = engine::compile(&self.pattern, self.flags, &self.limits)?;
        let captures_len = engine.group_len().saturating_sub(1);
        debug!(
            "compiled {:?} with flags {:?}: {} capture groups",
            self.pattern, self.flags, captures_len
        );
        Ok(Regex {
            source: self.pattern,
            flags: self.flags,
            engine,
            captures_len,
        })
    }
}

// === Group ===

/// A reference to one capture slot.
///
/// `Whole` is the reserved sentinel for the entire match and resolves to
/// slot 0 whatever the capture count; `Index(0)` means the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group<'n> {
    Whole,
    Index(usize),
    Name(&'n str),
}

impl From<usize> for Group<'_> {
    fn from(index: usize) -> Self {
        Group::Index(index)
    }
}

impl<'n> From<&'n str> for Group<'n> {
    fn from(name: &'n str) -> Self {
        Group::Name(name)
    }
}

impl<'n> From<&'n String> for Group<'n> {
    fn from(name: &'n String) -> Self {
        Group::Name(name)
    }
}

// === Match ===

/// The span of one capture in the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'s> {
    subject: &'s str,
    start: usize,
    end: usize,
}

impl<'s> Match<'s> {
    /// Byte offset of the start of the match.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset of the end of the match (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte range of the match.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The matched text.
    pub fn as_str(&self) -> &'s str {
        &self.subject[self.start..self.end]
    }

    /// Returns the length of the match in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the match is empty (zero-width).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// === Captures ===

/// One match: the whole-match bounds plus every capture group.
///
/// Slot 0 is the entire match; slots `1..=captures_len()` follow the groups
/// in declaration order. Group accessors return `Ok(None)` for a group that
/// did not participate, `Ok(Some(..))` for one that did (possibly empty), and
/// `Err` for a group the pattern does not have.
pub struct Captures<'r, 's> {
    regex: &'r Regex,
    subject: &'s str,
    whole: (usize, usize),
    slots: Slots,
}

impl<'r, 's> Captures<'r, 's> {
    pub(crate) fn new(regex: &'r Regex, subject: &'s str, slots: Slots) -> Option<Self> {
        let whole = slots.first().copied().flatten()?;
        Some(Captures {
            regex,
            subject,
            whole,
            slots,
        })
    }

    /// The regex that produced this match.
    pub fn regex(&self) -> &'r Regex {
        self.regex
    }

    /// The subject this match indexes into.
    pub fn subject(&self) -> &'s str {
        self.subject
    }

    /// Byte offset of the start of the whole match.
    pub fn start(&self) -> usize {
        self.whole.0
    }

    /// Byte offset of the end of the whole match (exclusive).
    pub fn end(&self) -> usize {
        self.whole.1
    }

    /// Byte range of the whole match.
    pub fn range(&self) -> Range<usize> {
        self.whole.0..self.whole.1
    }

    /// The whole match as text.
    pub fn as_str(&self) -> &'s str {
        &self.subject[self.whole.0..self.whole.1]
    }

    /// The whole match as a [`Match`].
    pub fn whole(&self) -> Match<'s> {
        Match {
            subject: self.subject,
            start: self.whole.0,
            end: self.whole.1,
        }
    }

    pub(crate) fn slot(&self, index: usize) -> Option<Match<'s>> {
        let (start, end) = self.slots.get(index).copied().flatten()?;
        Some(Match {
            subject: self.subject,
            start,
            end,
        })
    }

    /// The span of a capture group.
    pub fn get<'n>(&self, group: impl Into<Group<'n>>) -> Result<Option<Match<'s>>> {
        let index = self.regex.resolve(group.into())?;
        Ok(self.slot(index))
    }

    /// The text of a capture group.
    pub fn text<'n>(&self, group: impl Into<Group<'n>>) -> Result<Option<&'s str>> {
        Ok(self.get(group)?.map(|m| m.as_str()))
    }

    /// The `(start, end)` byte bounds of a capture group.
    pub fn bounds<'n>(&self, group: impl Into<Group<'n>>) -> Result<Option<(usize, usize)>> {
        Ok(self.get(group)?.map(|m| (m.start, m.end)))
    }

    /// Number of slots, including the whole match.
    pub fn len(&self) -> usize {
        self.regex.captures_len + 1
    }

    /// Always `false`: a match has at least the whole-match slot.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all slots, starting with the whole match.
    pub fn iter(&self) -> CapturesIter<'_, 'r, 's> {
        CapturesIter {
            captures: self,
            index: 0,
        }
    }

    /// The numbered groups `1..=captures_len()`, in order.
    pub fn to_sequence(&self) -> Vec<Option<&'s str>> {
        (1..self.len())
            .map(|i| self.slot(i).map(|m| m.as_str()))
            .collect()
    }

    /// The named groups only, keyed by name.
    pub fn to_table(&self) -> BTreeMap<&'r str, Option<&'s str>> {
        let regex: &'r Regex = self.regex;
        regex
            .capture_names()
            .enumerate()
            .filter_map(|(i, name)| Some((name?, self.slot(i).map(|m| m.as_str()))))
            .collect()
    }
}

impl fmt::Debug for Captures<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for m in self.iter() {
            list.entry(&m.map(|m| m.as_str()));
        }
        list.finish()
    }
}

// === CapturesIter ===

/// Iterator over the slots of a [`Captures`].
pub struct CapturesIter<'c, 'r, 's> {
    captures: &'c Captures<'r, 's>,
    index: usize,
}

impl<'s> Iterator for CapturesIter<'_, '_, 's> {
    type Item = Option<Match<'s>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.captures.len() {
            return None;
        }
        let m = self.captures.slot(self.index);
        self.index += 1;
        Some(m)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.captures.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CapturesIter<'_, '_, '_> {}
