//! # rextra
//!
//! Match results, non-overlapping iteration, splitting and template
//! replacement layered over the [`regex-automata`](https://crates.io/crates/regex-automata)
//! meta engine.
//!
//! The engine does the matching. This crate provides:
//!
//! - match snapshots with any number of named and numbered captures, where
//!   "group did not participate" is distinct from "group matched the empty
//!   string" and from "no such group";
//! - iteration that always makes progress over empty matches;
//! - Perl/JavaScript-style splitting with captures interleaved;
//! - `$1`/`${name}` templates and closure-driven replacement.
//!
//! ## Quick Start
//!
//! ```rust
//! use rextra::prelude::*;
//!
//! let re = Regex::new(r"(?<key> \w+) = (?<value> \w*)").unwrap();
//! let caps = re.captures("mode=fast").unwrap();
//! assert_eq!(caps.text("key").unwrap(), Some("mode"));
//! assert_eq!(caps.bounds(Group::Whole).unwrap(), Some((0, 9)));
//!
//! let swapped = re.replace_template("a=1 b=2", "${value}=$1").unwrap();
//! assert_eq!(swapped, "1=a 2=b");
//! ```
//!
//! Patterns are compiled in extended mode unless told otherwise: whitespace
//! is insignificant and `#` starts a comment. See [`Flags`] for the full flag
//! table.
//!
//! ```rust
//! use rextra::prelude::*;
//!
//! let re = Regex::new("").unwrap();
//! let pieces: Vec<_> = re.split("123").flatten().collect();
//! assert_eq!(pieces, vec!["1", "2", "3"]);
//!
//! let re = Regex::with_flags("a b", "-x").unwrap();
//! assert!(re.is_match("a b"));
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | `Regex`, `RegexBuilder`, `Captures`, `Match`, `Group` |
//! | [`flags`] | Flag table and flag-string parser |
//! | [`iter`] | Non-overlapping match iteration |
//! | [`split`] | Splitting around matches |
//! | [`replace`] | Templates and replacement |
//! | [`error`] | Error type |
//!
//! A compiled [`Regex`] is `Send + Sync` and can be shared across threads;
//! iterators hold their own search state and belong to one consumer.

pub mod api;
mod engine;
pub mod error;
pub mod flags;
pub mod iter;
pub mod prelude;
pub mod replace;
pub mod split;

pub use api::{escape, Captures, CapturesIter, Group, Match, Regex, RegexBuilder};
pub use error::{Error, Result};
pub use flags::Flags;
pub use iter::{FindIter, Matches};
pub use replace::{NoExpand, Replacer, Template};
pub use split::Split;
