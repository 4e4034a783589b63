// split.rs - Partition a subject around matches, interleaving captures.
//
// Boundary convention (Perl/JavaScript): an empty match is not a split point
// when it sits where the previous piece ended or at the end of the subject.
// So splitting "123" on the empty pattern gives ["1", "2", "3"], while
// splitting "12" on `(\d)` gives ["", "1", "", "2", ""]. The splitter never
// looks at the pattern itself; empty matches come from the iterator.

use std::iter::FusedIterator;

use crate::api::{Captures, Regex};
use crate::iter::Matches;

/// Whether a match spanning `start..end` cuts the subject, given that the
/// previous piece ended at `last_end`.
pub(crate) fn is_split_point(start: usize, end: usize, last_end: usize, len: usize) -> bool {
    start != end || (start != last_end && start != len)
}

/// Iterator over the pieces of a split subject.
///
/// Yields `Some(text)` for every gap between matches and for every
/// participating capture group, and `None` for a group that did not
/// participate. An empty capture is `Some("")`.
pub struct Split<'r, 's> {
    matches: Matches<'r, 's>,
    last_end: usize,
    pending: Option<(Captures<'r, 's>, usize)>,
    remaining: usize,
    finished: bool,
}

impl<'r, 's> Split<'r, 's> {
    fn new(matches: Matches<'r, 's>, max_splits: usize) -> Self {
        Split {
            matches,
            last_end: 0,
            pending: None,
            remaining: max_splits,
            finished: false,
        }
    }
}

impl<'s> Iterator for Split<'_, 's> {
    type Item = Option<&'s str>;

    fn next(&mut self) -> Option<Option<&'s str>> {
        loop {
            if let Some((caps, next)) = self.pending.as_mut() {
                if *next < caps.len() {
                    let piece = caps.slot(*next).map(|m| m.as_str());
                    *next += 1;
                    return Some(piece);
                }
                self.pending = None;
            }
            if self.finished {
                return None;
            }

            let subject = self.matches.subject();
            if self.remaining > 0 {
                if let Some(caps) = self.matches.next() {
                    if !is_split_point(caps.start(), caps.end(), self.last_end, subject.len()) {
                        continue;
                    }
                    let gap = &subject[self.last_end..caps.start()];
                    self.last_end = caps.end();
                    self.remaining -= 1;
                    self.pending = Some((caps, 1));
                    return Some(Some(gap));
                }
            }

            self.finished = true;
            return Some(Some(&subject[self.last_end..]));
        }
    }
}

impl FusedIterator for Split<'_, '_> {}

impl Regex {
    /// Split `subject` around every match, interleaving capture groups.
    ///
    /// ```
    /// use rextra::Regex;
    ///
    /// let re = Regex::new(r"\s*(,)\s*").unwrap();
    /// let pieces: Vec<_> = re.split("a , b,c").collect();
    /// assert_eq!(pieces, vec![Some("a"), Some(","), Some("b"), Some(","), Some("c")]);
    ///
    /// let re = Regex::new(r"").unwrap();
    /// let chars: Vec<_> = re.split("123").flatten().collect();
    /// assert_eq!(chars, vec!["1", "2", "3"]);
    /// ```
    pub fn split<'r, 's>(&'r self, subject: &'s str) -> Split<'r, 's> {
        Split::new(self.matches(subject), usize::MAX)
    }

    /// Like [`split`](Self::split), but cut at no more than `limit - 1`
    /// split points; the rest of the subject becomes the final piece.
    /// A `limit` of 0 means no limit.
    pub fn splitn<'r, 's>(&'r self, subject: &'s str, limit: usize) -> Split<'r, 's> {
        let max_splits = match limit {
            0 => usize::MAX,
            n => n - 1,
        };
        Split::new(self.matches(subject), max_splits)
    }
}
