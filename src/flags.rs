// flags.rs - The flag table and flag-string parser.
//
// Flags form a closed set. Each single character or bracketed token maps to
// exactly one engine option; anything outside the table is rejected.

use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{Error, Result};

bitflags! {
    /// Compile options selected through a flag string.
    ///
    /// The default set is `EXTENDED | UNICODE`: whitespace and `#` comments
    /// in patterns are ignored unless `x` is negated (`"-x"`) or
    /// [`RegexBuilder::extended`](crate::RegexBuilder::extended) turns it off.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// `i`
        const CASE_INSENSITIVE = 1 << 0;
        /// `m`: `^` and `$` match at line boundaries.
        const MULTI_LINE = 1 << 1;
        /// `s`: `.` matches `\n`.
        const DOT_MATCHES_NEW_LINE = 1 << 2;
        /// `x`: whitespace is insignificant and `#` starts a comment.
        const EXTENDED = 1 << 3;
        /// `U`: greedy and lazy quantifiers trade places.
        const SWAP_GREED = 1 << 4;
        /// `u`: Unicode-aware character classes and case folding.
        ///
        /// Subjects are always `&str`, so without `u` any construct that could
        /// match a lone non-ASCII byte (`.`, `[^a]`, `\W`) fails to compile
        /// with `PatternSyntax`.
        const UNICODE = 1 << 5;
        /// `<crlf>`: line anchors treat `\r\n` as a line terminator.
        const CRLF = 1 << 6;
        /// `<octal>`: `\141`-style octal escapes.
        const OCTAL = 1 << 7;
        /// `<anchored>`: every search must match at its start offset.
        const ANCHORED = 1 << 8;
    }
}

const FLAG_TABLE: &[(&str, Flags)] = &[
    ("i", Flags::CASE_INSENSITIVE),
    ("m", Flags::MULTI_LINE),
    ("s", Flags::DOT_MATCHES_NEW_LINE),
    ("x", Flags::EXTENDED),
    ("U", Flags::SWAP_GREED),
    ("u", Flags::UNICODE),
    ("<crlf>", Flags::CRLF),
    ("<octal>", Flags::OCTAL),
    ("<anchored>", Flags::ANCHORED),
];

impl Default for Flags {
    fn default() -> Self {
        Flags::EXTENDED | Flags::UNICODE
    }
}

impl Flags {
    /// Look up a single token (`"i"`, `"<crlf>"`, ...) in the flag table.
    pub fn from_token(token: &str) -> Option<Flags> {
        FLAG_TABLE
            .iter()
            .find(|(name, _)| *name == token)
            .map(|&(_, flag)| flag)
    }

    /// Apply a flag string on top of `self`.
    ///
    /// Tokens are set until a `-` is seen; every token after it is cleared.
    ///
    /// ```
    /// use rextra::Flags;
    ///
    /// let flags = Flags::default().apply("i-x").unwrap();
    /// assert!(flags.contains(Flags::CASE_INSENSITIVE));
    /// assert!(!flags.contains(Flags::EXTENDED));
    /// ```
    pub fn apply(mut self, spec: &str) -> Result<Flags> {
        let mut negate = false;
        let mut rest = spec;
        while let Some(c) = rest.chars().next() {
            let token = if c == '<' {
                match rest.find('>') {
                    Some(close) => &rest[..=close],
                    None => {
                        return Err(Error::UnsupportedFlag {
                            flag: rest.to_string(),
                        })
                    }
                }
            } else {
                &rest[..c.len_utf8()]
            };
            rest = &rest[token.len()..];

            if token == "-" {
                negate = true;
                continue;
            }
            let flag = Flags::from_token(token).ok_or_else(|| Error::UnsupportedFlag {
                flag: token.to_string(),
            })?;
            self.set(flag, !negate);
        }
        Ok(self)
    }

    /// Render the set back into flag-string form, relative to the empty set.
    pub fn to_flag_string(self) -> String {
        FLAG_TABLE
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Parses a flag string relative to [`Flags::default`].
impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Flags> {
        Flags::default().apply(s)
    }
}
