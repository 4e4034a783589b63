// prelude.rs - Convenient re-exports for the common API.
//
//! # Prelude
//!
//! ```
//! use rextra::prelude::*;
//!
//! let re = Regex::new(r"\d+").unwrap();
//! let m = re.find("answer: 42").unwrap();
//! assert_eq!(m.as_str(), "42");
//! ```

pub use crate::api::{Captures, Group, Match, Regex, RegexBuilder};
pub use crate::error::Error;
pub use crate::flags::Flags;
pub use crate::replace::{NoExpand, Replacer, Template};
