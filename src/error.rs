// error.rs - Error type shared by compilation, matching, splitting and
// replacement.
//
// Every failure is raised at the call that detects it. A capture group that
// did not participate in a match is not an error; accessors report it as
// `Ok(None)`.

/// Error type for every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The engine rejected the pattern text.
    #[error("syntax error at offset {offset}: {message}")]
    PatternSyntax { offset: usize, message: String },
    /// A flag character or bracketed token that is not in the flag table.
    #[error("unsupported flag {flag:?}")]
    UnsupportedFlag { flag: String },
    /// A capture name that the pattern does not declare.
    #[error("no capture group named {name:?}")]
    NoSuchCaptureName { name: String },
    /// A capture index greater than the pattern's capture count.
    #[error("no capture group with index {index}")]
    NoSuchCaptureIndex { index: usize },
    /// Search bounds that do not fit the subject.
    #[error("invalid range {start}..{end} for subject of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    /// A malformed `$` escape in a replacement template.
    #[error("template syntax error at offset {offset}: {message}")]
    TemplateSyntax { offset: usize, message: String },
    /// The engine refused to build a syntactically valid pattern.
    #[error("failed to build regex: {message}")]
    Build { message: String },
}

/// The standard [`Result`](core::result::Result) type used by rextra.
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    /// Byte offset into the pattern or template, for positional errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::PatternSyntax { offset, .. } | Error::TemplateSyntax { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }

    pub(crate) fn template(offset: usize, message: &str) -> Self {
        Error::TemplateSyntax {
            offset,
            message: message.to_string(),
        }
    }
}
