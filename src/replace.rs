// replace.rs - Replacement templates and the replace/replacen operations.
//
// A template is scanned once into literal and capture-reference pieces:
//
//   $$        literal '$'
//   $N        capture N (longest digit run)
//   ${N}      capture N
//   ${name}   named capture
//
// Any other '$' sequence is a syntax error. References are checked against
// the regex before any matching happens.

use log::trace;
use memchr::memchr;

use crate::api::{Captures, Group, Regex};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Index(usize),
    Name(String),
}

/// A parsed replacement template.
///
/// ```
/// use rextra::{Regex, Template};
///
/// let re = Regex::new(r"(?<first>\w+) \s+ (?<last>\w+)").unwrap();
/// let t = Template::parse("${last}, $1 ($$)").unwrap();
/// assert_eq!(re.replace("John Smith", &t).unwrap(), "Smith, John ($)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

fn flush(literal: &mut String, pieces: &mut Vec<Piece>) {
    if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(literal)));
    }
}

fn parse_index(digits: &str, offset: usize) -> Result<usize> {
    digits
        .parse()
        .map_err(|_| Error::template(offset, "capture index too large"))
}

impl Template {
    /// Scan `text` into a template.
    pub fn parse(text: &str) -> Result<Template> {
        let bytes = text.as_bytes();
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut pos = 0;

        while let Some(found) = memchr(b'$', &bytes[pos..]) {
            let dollar = pos + found;
            literal.push_str(&text[pos..dollar]);
            let after = dollar + 1;

            match bytes.get(after) {
                Some(b'$') => {
                    literal.push('$');
                    pos = after + 1;
                }
                Some(b) if b.is_ascii_digit() => {
                    let run = bytes[after..].iter().take_while(|b| b.is_ascii_digit()).count();
                    let index = parse_index(&text[after..after + run], dollar)?;
                    flush(&mut literal, &mut pieces);
                    pieces.push(Piece::Index(index));
                    pos = after + run;
                }
                Some(b'{') => {
                    let name_start = after + 1;
                    let close = memchr(b'}', &bytes[name_start..])
                        .map(|i| name_start + i)
                        .ok_or_else(|| Error::template(dollar, "unterminated '${'"))?;
                    let name = &text[name_start..close];
                    if name.is_empty() {
                        return Err(Error::template(dollar, "empty capture reference '${}'"));
                    }
                    flush(&mut literal, &mut pieces);
                    if name.bytes().all(|b| b.is_ascii_digit()) {
                        pieces.push(Piece::Index(parse_index(name, dollar)?));
                    } else {
                        pieces.push(Piece::Name(name.to_string()));
                    }
                    pos = close + 1;
                }
                Some(_) => {
                    return Err(Error::template(
                        dollar,
                        "'$' must be followed by a digit, '{' or '$'",
                    ))
                }
                None => return Err(Error::template(dollar, "dangling '$' at end of template")),
            }
        }
        literal.push_str(&text[pos..]);
        flush(&mut literal, &mut pieces);

        trace!("parsed template {:?} into {} pieces", text, pieces.len());
        Ok(Template {
            source: text.to_string(),
            pieces,
        })
    }

    /// The template text as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Fail if the template names a group that `regex` does not have.
    pub fn check(&self, regex: &Regex) -> Result<()> {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(_) => {}
                Piece::Index(index) => {
                    regex.resolve(Group::Index(*index))?;
                }
                Piece::Name(name) => {
                    regex.resolve(Group::Name(name))?;
                }
            }
        }
        Ok(())
    }

    /// Append the expansion for one match to `dst`. Unset groups expand to
    /// nothing. A reference the regex does not have is an error, and `dst`
    /// keeps whatever was appended before it.
    pub fn expand(&self, caps: &Captures<'_, '_>, dst: &mut String) -> Result<()> {
        for piece in &self.pieces {
            let group = match piece {
                Piece::Literal(text) => {
                    dst.push_str(text);
                    continue;
                }
                Piece::Index(index) => Group::Index(*index),
                Piece::Name(name) => Group::Name(name),
            };
            if let Some(text) = caps.text(group)? {
                dst.push_str(text);
            }
        }
        Ok(())
    }
}

/// Replacement text that is inserted verbatim, with no `$` expansion.
#[derive(Debug, Clone, Copy)]
pub struct NoExpand<'a>(pub &'a str);

/// A substitution rule for [`Regex::replace`].
///
/// Implemented for [`Template`] (and `&Template`), [`NoExpand`], and any
/// `FnMut(&Captures) -> T` where `T: AsRef<str>`.
pub trait Replacer {
    /// Append the replacement for `caps` to `dst`.
    fn replace_append(&mut self, caps: &Captures<'_, '_>, dst: &mut String);

    /// Validate the rule against `regex` before any match is replaced.
    fn check(&self, regex: &Regex) -> Result<()> {
        let _ = regex;
        Ok(())
    }
}

impl Replacer for Template {
    fn replace_append(&mut self, caps: &Captures<'_, '_>, dst: &mut String) {
        // References were resolved by `check` before matching began.
        let _ = self.expand(caps, dst);
    }

    fn check(&self, regex: &Regex) -> Result<()> {
        Template::check(self, regex)
    }
}

impl Replacer for &Template {
    fn replace_append(&mut self, caps: &Captures<'_, '_>, dst: &mut String) {
        // References were resolved by `check` before matching began.
        let _ = self.expand(caps, dst);
    }

    fn check(&self, regex: &Regex) -> Result<()> {
        Template::check(self, regex)
    }
}

impl Replacer for NoExpand<'_> {
    fn replace_append(&mut self, _: &Captures<'_, '_>, dst: &mut String) {
        dst.push_str(self.0);
    }
}

impl<F, T> Replacer for F
where
    F: FnMut(&Captures<'_, '_>) -> T,
    T: AsRef<str>,
{
    fn replace_append(&mut self, caps: &Captures<'_, '_>, dst: &mut String) {
        dst.push_str((*self)(caps).as_ref());
    }
}

impl Regex {
    /// Replace every match in `subject`.
    ///
    /// Without any match the result equals `subject`.
    ///
    /// ```
    /// use rextra::{Captures, NoExpand, Regex};
    ///
    /// let re = Regex::new(r"\d+").unwrap();
    /// let doubled = re
    ///     .replace("3 apples, 12 pears", |caps: &Captures| {
    ///         (caps.as_str().parse::<u32>().unwrap() * 2).to_string()
    ///     })
    ///     .unwrap();
    /// assert_eq!(doubled, "6 apples, 24 pears");
    ///
    /// assert_eq!(re.replace("a1", NoExpand("$0")).unwrap(), "a$0");
    /// ```
    pub fn replace<R: Replacer>(&self, subject: &str, rep: R) -> Result<String> {
        self.replacen(subject, 0, rep)
    }

    /// Replace at most `limit` matches; a `limit` of 0 replaces all.
    pub fn replacen<R: Replacer>(&self, subject: &str, limit: usize, mut rep: R) -> Result<String> {
        rep.check(self)?;
        let limit = if limit == 0 { usize::MAX } else { limit };

        let mut out = String::with_capacity(subject.len());
        let mut last_end = 0;
        for caps in self.matches(subject).take(limit) {
            out.push_str(&subject[last_end..caps.start()]);
            rep.replace_append(&caps, &mut out);
            last_end = caps.end();
        }
        out.push_str(&subject[last_end..]);
        Ok(out)
    }

    /// Parse `template` and replace every match with its expansion.
    ///
    /// ```
    /// use rextra::{Error, Regex};
    ///
    /// let re = Regex::new("a").unwrap();
    /// assert_eq!(re.replace_template("aaa", "$$").unwrap(), "$$$");
    /// assert!(matches!(re.replace_template("aaa", "$x"), Err(Error::TemplateSyntax { .. })));
    /// ```
    pub fn replace_template(&self, subject: &str, template: &str) -> Result<String> {
        self.replace(subject, Template::parse(template)?)
    }
}

impl<'r, 's> Captures<'r, 's> {
    /// Expand `template` against this match, appending to `dst`.
    ///
    /// Fails with `NoSuchCaptureName` or `NoSuchCaptureIndex` when the
    /// template refers to a group the regex does not have.
    pub fn expand(&self, template: &Template, dst: &mut String) -> Result<()> {
        template.expand(self, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(text: &str) -> Vec<Piece> {
        Template::parse(text).unwrap().pieces
    }

    fn offset_of(text: &str) -> usize {
        match Template::parse(text).unwrap_err() {
            Error::TemplateSyntax { offset, .. } => offset,
            other => panic!("expected TemplateSyntax, got {:?}", other),
        }
    }

    #[test]
    fn scan_literal_only() {
        assert_eq!(pieces("plain"), vec![Piece::Literal("plain".to_string())]);
        assert!(pieces("").is_empty());
    }

    #[test]
    fn scan_references() {
        assert_eq!(
            pieces("<$12|${name}|${3}>"),
            vec![
                Piece::Literal("<".to_string()),
                Piece::Index(12),
                Piece::Literal("|".to_string()),
                Piece::Name("name".to_string()),
                Piece::Literal("|".to_string()),
                Piece::Index(3),
                Piece::Literal(">".to_string()),
            ]
        );
    }

    #[test]
    fn scan_escaped_dollar() {
        assert_eq!(pieces("$$1"), vec![Piece::Literal("$1".to_string())]);
        assert_eq!(pieces("$$$$"), vec![Piece::Literal("$$".to_string())]);
    }

    #[test]
    fn scan_errors_report_dollar_offset() {
        assert_eq!(offset_of("ab$"), 2);
        assert_eq!(offset_of("a$x"), 1);
        assert_eq!(offset_of("x${}"), 1);
        assert_eq!(offset_of("${open"), 0);
        assert_eq!(offset_of("$99999999999999999999999"), 0);
    }

    #[test]
    fn scan_non_ascii_literals() {
        assert_eq!(
            pieces("é$1ü"),
            vec![
                Piece::Literal("é".to_string()),
                Piece::Index(1),
                Piece::Literal("ü".to_string()),
            ]
        );
    }

    #[test]
    fn check_rejects_unknown_references() {
        let re = Regex::new(r"(?<word>\w+)").unwrap();
        assert!(Template::parse("$1 ${word}").unwrap().check(&re).is_ok());
        assert_eq!(
            Template::parse("$2").unwrap().check(&re).unwrap_err(),
            Error::NoSuchCaptureIndex { index: 2 }
        );
        assert_eq!(
            Template::parse("${other}").unwrap().check(&re).unwrap_err(),
            Error::NoSuchCaptureName {
                name: "other".to_string()
            }
        );
    }

    #[test]
    fn unset_group_expands_to_nothing() {
        let re = Regex::new(r"(a)|(b)").unwrap();
        assert_eq!(re.replace_template("ab", "[$1$2]").unwrap(), "[a][b]");
    }

    #[test]
    fn replacen_limits_replacements() {
        let re = Regex::new(r"o").unwrap();
        assert_eq!(re.replacen("foo boo", 2, NoExpand("0")).unwrap(), "f00 boo");
        assert_eq!(re.replacen("foo boo", 0, NoExpand("0")).unwrap(), "f00 b00");
    }

    #[test]
    fn no_match_returns_subject() {
        let re = Regex::new(r"z").unwrap();
        assert_eq!(re.replace_template("abc", "$0$0").unwrap(), "abc");
    }

    #[test]
    fn check_runs_without_matches() {
        let re = Regex::new(r"z").unwrap();
        assert!(re.replace_template("abc", "$1").is_err());
    }

    #[test]
    fn captures_expand() {
        let re = Regex::new(r"(\w)(\w)").unwrap();
        let caps = re.captures("ab").unwrap();
        let mut out = String::from(">");
        caps.expand(&Template::parse("$2$1").unwrap(), &mut out).unwrap();
        assert_eq!(out, ">ba");
    }

    #[test]
    fn captures_expand_rejects_missing_groups() {
        let re = Regex::new(r"(?<w>\w+)").unwrap();
        let caps = re.captures("hi").unwrap();

        let mut out = String::new();
        assert_eq!(
            caps.expand(&Template::parse("[${nope}]").unwrap(), &mut out)
                .unwrap_err(),
            Error::NoSuchCaptureName {
                name: "nope".to_string()
            }
        );
        assert_eq!(out, "[");

        let mut out = String::new();
        assert_eq!(
            caps.expand(&Template::parse("[$7]").unwrap(), &mut out)
                .unwrap_err(),
            Error::NoSuchCaptureIndex { index: 7 }
        );

        let mut out = String::new();
        caps.expand(&Template::parse("[${w}|$1|$0]").unwrap(), &mut out).unwrap();
        assert_eq!(out, "[hi|hi|hi]");
    }

    #[test]
    fn captures_expand_unset_group_is_empty() {
        let re = Regex::new(r"(a)|(b)").unwrap();
        let caps = re.captures("b").unwrap();
        let mut out = String::new();
        caps.expand(&Template::parse("<$1><$2>").unwrap(), &mut out).unwrap();
        assert_eq!(out, "<><b>");
    }
}
