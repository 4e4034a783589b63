// iter.rs - Lazy iteration over non-overlapping matches.
//
// The cursor only moves forward. After an empty match it skips one
// character past the match end, so the same empty match is never reported
// twice and iteration always terminates.

use std::iter::FusedIterator;

use log::trace;

use crate::api::{Captures, Match, Regex};
use crate::engine::Scratch;

/// Iterator over all non-overlapping matches in a subject range.
///
/// Each call to `next` runs at most one engine search; dropping the
/// iterator early performs no further work. The iterator owns its engine
/// scratch space and is meant for a single consumer.
pub struct Matches<'r, 's> {
    regex: &'r Regex,
    subject: &'s str,
    scratch: Scratch,
    cursor: usize,
    limit: usize,
    done: bool,
}

impl<'r, 's> Matches<'r, 's> {
    /// The range is already validated: `limit <= subject.len()` and both
    /// offsets on character boundaries unless `cursor > limit`.
    pub(crate) fn new(regex: &'r Regex, subject: &'s str, cursor: usize, limit: usize) -> Self {
        Matches {
            regex,
            subject,
            scratch: regex.engine.scratch(),
            cursor,
            limit,
            done: false,
        }
    }

    /// The subject being searched.
    pub fn subject(&self) -> &'s str {
        self.subject
    }
}

impl<'r, 's> Iterator for Matches<'r, 's> {
    type Item = Captures<'r, 's>;

    fn next(&mut self) -> Option<Captures<'r, 's>> {
        if self.done {
            return None;
        }
        if self.cursor > self.limit {
            trace!("match iteration finished: cursor {} past limit {}", self.cursor, self.limit);
            self.done = true;
            return None;
        }

        let found = self
            .regex
            .engine
            .execute(&mut self.scratch, self.subject, self.cursor, self.limit)
            .and_then(|slots| Captures::new(self.regex, self.subject, slots));
        let Some(caps) = found else {
            trace!("match iteration finished: no match after {}", self.cursor);
            self.done = true;
            return None;
        };

        let end = caps.end();
        self.cursor = if caps.start() == end {
            // Step over one character to guarantee progress.
            end + self.subject[end..].chars().next().map_or(1, char::len_utf8)
        } else {
            end
        };
        Some(caps)
    }
}

impl FusedIterator for Matches<'_, '_> {}

// === FindIter ===

/// Iterator over the whole-match spans of all non-overlapping matches.
pub struct FindIter<'r, 's> {
    inner: Matches<'r, 's>,
}

impl<'r, 's> FindIter<'r, 's> {
    pub(crate) fn new(inner: Matches<'r, 's>) -> Self {
        FindIter { inner }
    }
}

impl<'s> Iterator for FindIter<'_, 's> {
    type Item = Match<'s>;

    fn next(&mut self) -> Option<Match<'s>> {
        self.inner.next().map(|caps| caps.whole())
    }
}

impl FusedIterator for FindIter<'_, '_> {}
