use std::fmt::Display;

use getset::{CopyGetters, Getters};

use crate::base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

/// Represents an error that occurred during the lexical analysis of the source code.
///
/// Lexical errors never stop the scan; the offending lexeme is skipped.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    UnterminatedString(#[from] UnterminatedString),
    #[error(transparent)]
    UnexpectedCharacter(#[from] UnexpectedCharacter),
}

impl Error {
    /// The line the error is reported at (starts at 1).
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedString(err) => err.line,
            Self::UnexpectedCharacter(err) => err.line,
        }
    }

    /// The plain message of the error, without any source code excerpt.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnterminatedString(_) => UnterminatedString::MESSAGE,
            Self::UnexpectedCharacter(_) => UnexpectedCharacter::MESSAGE,
        }
    }

    /// The span of the source code the error refers to.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnterminatedString(err) => &err.span,
            Self::UnexpectedCharacter(err) => &err.span,
        }
    }
}

/// Source code contains a `"` that is never closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, CopyGetters, thiserror::Error)]
pub struct UnterminatedString {
    /// Span from the opening `"` to the end of the source.
    #[get = "pub"]
    pub(crate) span: Span,

    /// Line the scan stopped at, which is past the opening line for strings spanning lines.
    #[get_copy = "pub"]
    pub(crate) line: usize,
}

impl UnterminatedString {
    const MESSAGE: &'static str = "Unterminated string.";
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, Self::MESSAGE).at_line(self.line),
            SourceCodeDisplay::new(&self.span, Some("this string is never closed by a `\"`"))
        )
    }
}

/// Source code contains a character that does not start any lexeme.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, CopyGetters, thiserror::Error)]
pub struct UnexpectedCharacter {
    /// Span of the offending character.
    #[get = "pub"]
    pub(crate) span: Span,

    /// Line the character is on.
    #[get_copy = "pub"]
    pub(crate) line: usize,

    /// The offending character.
    #[get_copy = "pub"]
    pub(crate) character: char,
}

impl UnexpectedCharacter {
    const MESSAGE: &'static str = "Unexpected character.";
}

impl Display for UnexpectedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, Self::MESSAGE).at_line(self.line),
            SourceCodeDisplay::new(&self.span, Option::<&str>::None)
        )
    }
}
