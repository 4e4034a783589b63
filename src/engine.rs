// engine.rs - Boundary with the external regex engine.
//
// Everything that touches `regex-automata` lives here: translating flags into
// engine options, compiling, and executing a bounded search. The rest of the
// crate only sees `Engine`, `Scratch` and `Slots`.
//
// `meta::Regex` is reentrant: a search without an explicit cache draws one
// from an internal pool, so a compiled `Engine` can be shared across threads.

use log::debug;
use regex_automata::util::captures::Captures as RawCaptures;
use regex_automata::util::syntax;
use regex_automata::{meta, Anchored, Input, PatternID};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::flags::Flags;

/// Per-group bounds: slot 0 is the whole match, then groups in declaration
/// order. `None` marks a group that did not participate.
pub(crate) type Slots = SmallVec<[Option<(usize, usize)>; 4]>;

/// Engine options that are not flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Limits {
    pub size_limit: Option<usize>,
    pub nest_limit: Option<u32>,
}

/// An owned, compiled engine handle. Dropping it releases the engine.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    re: meta::Regex,
    anchored: bool,
}

/// Mutable search state for one consumer.
pub(crate) struct Scratch {
    cache: meta::Cache,
    caps: RawCaptures,
}

fn syntax_config(flags: Flags, limits: &Limits) -> syntax::Config {
    let config = syntax::Config::new()
        .case_insensitive(flags.contains(Flags::CASE_INSENSITIVE))
        .multi_line(flags.contains(Flags::MULTI_LINE))
        .dot_matches_new_line(flags.contains(Flags::DOT_MATCHES_NEW_LINE))
        .ignore_whitespace(flags.contains(Flags::EXTENDED))
        .swap_greed(flags.contains(Flags::SWAP_GREED))
        .unicode(flags.contains(Flags::UNICODE))
        .crlf(flags.contains(Flags::CRLF))
        .octal(flags.contains(Flags::OCTAL));
    match limits.nest_limit {
        Some(limit) => config.nest_limit(limit),
        None => config,
    }
}

fn syntax_error(err: regex_syntax::Error) -> Error {
    let (offset, message) = match &err {
        regex_syntax::Error::Parse(e) => (e.span().start.offset, e.kind().to_string()),
        regex_syntax::Error::Translate(e) => (e.span().start.offset, e.kind().to_string()),
        _ => (0, err.to_string()),
    };
    Error::PatternSyntax { offset, message }
}

/// Compile `pattern` with the given options.
pub(crate) fn compile(pattern: &str, flags: Flags, limits: &Limits) -> Result<Engine> {
    let hir = syntax::parse_with(pattern, &syntax_config(flags, limits)).map_err(|err| {
        debug!("engine rejected {:?}: {}", pattern, err);
        syntax_error(err)
    })?;

    let config = meta::Config::new().nfa_size_limit(limits.size_limit);
    let re = meta::Builder::new()
        .configure(config)
        .build_from_hir(&hir)
        .map_err(|err| {
            debug!("engine failed to build {:?}: {}", pattern, err);
            Error::Build {
                message: err.to_string(),
            }
        })?;

    Ok(Engine {
        re,
        anchored: flags.contains(Flags::ANCHORED),
    })
}

impl Engine {
    /// Number of groups, including the whole match.
    pub(crate) fn group_len(&self) -> usize {
        self.re.captures_len()
    }

    pub(crate) fn group_index(&self, name: &str) -> Option<usize> {
        self.re.group_info().to_index(PatternID::ZERO, name)
    }

    /// Group names in index order; unnamed groups (and group 0) are `None`.
    pub(crate) fn group_names(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.re.group_info().pattern_names(PatternID::ZERO)
    }

    pub(crate) fn scratch(&self) -> Scratch {
        Scratch {
            cache: self.re.create_cache(),
            caps: self.re.create_captures(),
        }
    }

    fn input<'h>(&self, subject: &'h str, start: usize, end: usize) -> Input<'h> {
        let input = Input::new(subject).span(start..end);
        if self.anchored {
            input.anchored(Anchored::Yes)
        } else {
            input
        }
    }

    /// Search `subject[start..end]`, with look-around able to see the whole
    /// subject. The caller guarantees `start <= end <= subject.len()`.
    pub(crate) fn execute(
        &self,
        scratch: &mut Scratch,
        subject: &str,
        start: usize,
        end: usize,
    ) -> Option<Slots> {
        let input = self.input(subject, start, end);
        self.re
            .search_captures_with(&mut scratch.cache, &input, &mut scratch.caps);
        slots(&scratch.caps)
    }

    /// One-shot [`execute`](Self::execute) using the engine's internal pool.
    pub(crate) fn execute_once(&self, subject: &str, start: usize, end: usize) -> Option<Slots> {
        let mut caps = self.re.create_captures();
        self.re
            .search_captures(&self.input(subject, start, end), &mut caps);
        slots(&caps)
    }

    pub(crate) fn is_match(&self, subject: &str, start: usize, end: usize) -> bool {
        self.re.is_match(self.input(subject, start, end))
    }
}

fn slots(caps: &RawCaptures) -> Option<Slots> {
    if !caps.is_match() {
        return None;
    }
    Some(
        (0..caps.group_len())
            .map(|i| caps.get_group(i).map(|span| (span.start, span.end)))
            .collect(),
    )
}
