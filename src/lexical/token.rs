//! Contains the [`Token`] struct and its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr, sync::OnceLock};

use crate::base::{
    source_file::{SourceElement, SourceIterator, Span},
    Handler,
};
use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};

use super::{
    error::{UnexpectedCharacter, UnterminatedString},
    Error,
};

/// Is an enumeration representing the reserved words of slox.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, thiserror::Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    /// Looks the whole string up in the keyword table. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static STRING_KEYWORD_MAP: OnceLock<HashMap<&'static str, KeywordKind>> = OnceLock::new();
        let map = STRING_KEYWORD_MAP.get_or_init(|| {
            let mut map = HashMap::new();

            for keyword in Self::iter() {
                map.insert(keyword.as_str(), keyword);
            }

            map
        });

        map.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Class => "class",
            Self::Else => "else",
            Self::False => "false",
            Self::For => "for",
            Self::Fun => "fun",
            Self::If => "if",
            Self::Nil => "nil",
            Self::Or => "or",
            Self::Print => "print",
            Self::Return => "return",
            Self::Super => "super",
            Self::This => "this",
            Self::True => "true",
            Self::Var => "var",
            Self::While => "while",
        }
    }
}

/// Is an enumeration containing all kinds of tokens in the slox programming language.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, EnumAsInner)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum TokenKind {
    // single character symbols
    LeftParenthesis,
    RightParenthesis,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // one or two character operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // literals
    Identifier,
    String,
    Number,

    Keyword(KeywordKind),

    Eof,
}

impl From<KeywordKind> for TokenKind {
    fn from(keyword: KeywordKind) -> Self {
        Self::Keyword(keyword)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword(keyword) => f.write_str(&keyword.as_str().to_uppercase()),
            kind => f.write_str(kind.as_ref()),
        }
    }
}

/// Is the decoded value carried by string and number tokens.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, PartialOrd, Default, EnumAsInner)]
pub enum Literal {
    /// The token carries no literal value.
    #[default]
    None,
    /// The value of a number literal.
    Number(f64),
    /// The characters between the quotes of a string literal, taken verbatim.
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Number(number) => write!(f, "{number:?}"),
            Self::String(string) => f.write_str(string),
        }
    }
}

/// Represents a classified lexeme of the source code.
///
/// Tokens are created once by [`Token::tokenize`] and never mutated afterwards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct Token {
    /// Get the kind of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    /// Get the span that makes up the token.
    #[get = "pub"]
    span: Span,

    /// Get the decoded literal value of the token.
    #[get = "pub"]
    literal: Literal,

    /// Get the line of the first character of the token (starts at 1).
    #[get_copy = "pub"]
    line: usize,
}

/// Tokens are equal when they classify the same text the same way on the same line, regardless of
/// which scan session produced them.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.line == other.line
            && self.lexeme() == other.lexeme()
            && self.literal == other.literal
    }
}

impl SourceElement for Token {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.kind, self.lexeme(), self.literal)
    }
}

/// Is an error that can occur when invoking the [`Token::tokenize`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[allow(missing_docs)]
pub enum TokenizeError {
    #[error("encountered an invalid lexeme that was reported and skipped.")]
    InvalidLexeme,

    #[error("the iterator argument is at the end of the source code.")]
    EndOfSourceCodeIteratorArgument,
}

impl Token {
    /// Creates the end-of-input token at the current location of the iterator.
    #[must_use]
    pub fn eof(iter: &SourceIterator) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Self::create_span(iter.position(), iter),
            literal: Literal::None,
            line: iter.line(),
        }
    }

    /// Returns the exact source text the token was made from.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        self.span.str()
    }

    /// Increments the iterator while the predicate returns true.
    pub fn walk_iter(iter: &mut SourceIterator, predicate: impl Fn(char) -> bool) {
        while let Some((_, character)) = iter.peek() {
            if !predicate(character) {
                break;
            }

            iter.next();
        }
    }

    /// Creates a span from the given start location to the current location of the iterator.
    ///
    /// `start` is always an index yielded by the iterator, so it lies on a character boundary.
    fn create_span(start: usize, iter: &SourceIterator) -> Span {
        iter.peek()
            .map_or_else(
                || Span::to_end(iter.source_file().clone(), start),
                |(index, _)| Span::new(iter.source_file().clone(), start, index),
            )
            .unwrap()
    }

    /// Creates a token without a literal value spanning up to the current location.
    fn create_token(start: usize, line: usize, iter: &SourceIterator, kind: TokenKind) -> Self {
        Self {
            kind,
            span: Self::create_span(start, iter),
            literal: Literal::None,
            line,
        }
    }

    /// Checks if the given character is a valid first character of an identifier.
    fn is_first_identifier_character(character: char) -> bool {
        character == '_' || character.is_alphabetic()
    }

    /// Checks if the given character is a valid character of an identifier.
    fn is_identifier_character(character: char) -> bool {
        character == '_' || character.is_alphanumeric()
    }

    /// Maps the characters that always form a token on their own.
    fn single_character_kind(character: char) -> Option<TokenKind> {
        let kind = match character {
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            _ => return None,
        };

        Some(kind)
    }

    /// Maps the operators that may be followed by `=` to their one and two character kinds.
    fn operator_kinds(character: char) -> Option<(TokenKind, TokenKind)> {
        let kinds = match character {
            '!' => (TokenKind::Bang, TokenKind::BangEqual),
            '=' => (TokenKind::Equal, TokenKind::EqualEqual),
            '<' => (TokenKind::Less, TokenKind::LessEqual),
            '>' => (TokenKind::Greater, TokenKind::GreaterEqual),
            _ => return None,
        };

        Some(kinds)
    }

    /// Handles an operator, preferring the two character variant.
    fn handle_operator(
        iter: &mut SourceIterator,
        start: usize,
        line: usize,
        (single, double): (TokenKind, TokenKind),
    ) -> Self {
        let kind = if iter.next_if_eq('=') { double } else { single };

        Self::create_token(start, line, iter, kind)
    }

    /// Handles a sequence starting with a slash
    fn handle_slash(iter: &mut SourceIterator, start: usize, line: usize) -> Option<Self> {
        // Line comment, the line feed is left for the next call
        if iter.next_if_eq('/') {
            Self::walk_iter(iter, |character| character != '\n');
            None
        }
        // Just a single slash
        else {
            Some(Self::create_token(start, line, iter, TokenKind::Slash))
        }
    }

    /// Handles a sequence of characters that are valid in an identifier.
    fn handle_identifier_and_keyword(iter: &mut SourceIterator, start: usize, line: usize) -> Self {
        Self::walk_iter(iter, Self::is_identifier_character);

        let span = Self::create_span(start, iter);

        // Checks if the whole word is a keyword
        let kind = KeywordKind::from_str(span.str())
            .map_or(TokenKind::Identifier, TokenKind::Keyword);

        Self {
            kind,
            span,
            literal: Literal::None,
            line,
        }
    }

    /// Handles a sequence of digits with an optional fractional part
    ///
    /// Digits are classified with [`char::is_numeric`]. Only numbers `f64` can parse, i.e. those
    /// written with ASCII digits, carry a [`Literal::Number`].
    fn handle_numeric_literal(iter: &mut SourceIterator, start: usize, line: usize) -> Self {
        // Tokenizes the whole number part
        Self::walk_iter(iter, char::is_numeric);

        // A dot only belongs to the number if a digit follows it
        if matches!(iter.peek(), Some((_, '.')))
            && iter
                .peek_next()
                .is_some_and(|(_, character)| character.is_numeric())
        {
            iter.next();
            Self::walk_iter(iter, char::is_numeric);
        }

        let span = Self::create_span(start, iter);
        let literal = span
            .str()
            .parse::<f64>()
            .map_or(Literal::None, Literal::Number);

        Self {
            kind: TokenKind::Number,
            span,
            literal,
            line,
        }
    }

    /// Handles a sequence of characters that are enclosed in double quotes
    fn handle_string_literal(
        iter: &mut SourceIterator,
        start: usize,
        line: usize,
        handler: &impl Handler<Error>,
    ) -> Result<Self, TokenizeError> {
        Self::walk_iter(iter, |character| character != '"');

        if !iter.next_if_eq('"') {
            handler.receive(
                UnterminatedString {
                    span: Self::create_span(start, iter),
                    line: iter.line(),
                }
                .into(),
            );
            return Err(TokenizeError::InvalidLexeme);
        }

        let span = Self::create_span(start, iter);
        let content = &span.str()[1..span.str().len() - 1];

        Ok(Self {
            kind: TokenKind::String,
            literal: Literal::String(content.to_string()),
            span,
            line,
        })
    }

    /// Lexes the source code from the given iterator.
    ///
    /// The tokenization starts at the current location of the iterator. The function moves the
    /// iterator at least once and forwards it until the lexeme is complete. Whitespace, line feeds
    /// and comments produce `Ok(None)`. After the call the iterator is left at the next character
    /// that is not part of the lexeme.
    ///
    /// # Errors
    /// - [`TokenizeError::EndOfSourceCodeIteratorArgument`] - The iterator argument is at the end
    ///   of the source code.
    /// - [`TokenizeError::InvalidLexeme`] - The lexeme is invalid. It has been reported to the
    ///   handler and the iterator is positioned after it.
    pub fn tokenize(
        iter: &mut SourceIterator,
        handler: &impl Handler<Error>,
    ) -> Result<Option<Self>, TokenizeError> {
        let line = iter.line();

        // Gets the first character
        let (start, character) = iter
            .next()
            .ok_or(TokenizeError::EndOfSourceCodeIteratorArgument)?;

        if let Some(kind) = Self::single_character_kind(character) {
            Ok(Some(Self::create_token(start, line, iter, kind)))
        } else if let Some(kinds) = Self::operator_kinds(character) {
            Ok(Some(Self::handle_operator(iter, start, line, kinds)))
        }
        // Found comment/slash
        else if character == '/' {
            Ok(Self::handle_slash(iter, start, line))
        }
        // Found insignificant whitespace, line feeds are counted by the iterator
        else if matches!(character, ' ' | '\r' | '\t' | '\n') {
            Ok(None)
        } else if character == '"' {
            Self::handle_string_literal(iter, start, line, handler).map(Some)
        }
        // Found numeric literal
        else if character.is_numeric() {
            Ok(Some(Self::handle_numeric_literal(iter, start, line)))
        }
        // Found identifier/keyword
        else if Self::is_first_identifier_character(character) {
            Ok(Some(Self::handle_identifier_and_keyword(iter, start, line)))
        } else {
            handler.receive(
                UnexpectedCharacter {
                    span: Self::create_span(start, iter),
                    line,
                    character,
                }
                .into(),
            );
            Err(TokenizeError::InvalidLexeme)
        }
    }
}
