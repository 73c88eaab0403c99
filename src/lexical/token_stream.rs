//! Contains the [`TokenStream`] struct, the output of a scan session.

use std::{fmt::Debug, sync::Arc};

use derive_more::Deref;

use crate::{
    base::{source_file::SourceFile, Handler},
    lexical::Error,
};

use super::token::{Token, TokenizeError};

/// Is a flat list of [`Token`]s in source order.
///
/// This struct is the final output of the lexical analysis phase and is meant to be used by the
/// next stage of the front end. It always ends with exactly one [`TokenKind::Eof`] token.
///
/// [`TokenKind::Eof`]: super::token::TokenKind::Eof
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl TokenStream {
    /// Tokenizes the given source code.
    ///
    /// This function walks the source file once by calling [`Token::tokenize()`] repeatedly until
    /// the iterator is exhausted, then appends the end-of-input token. Lexical errors are reported
    /// to the `handler` and the offending lexeme is skipped, so the scan always completes.
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(source_file = %source_file.identifier()))]
    pub fn tokenize(source_file: &Arc<SourceFile>, handler: &impl Handler<Error>) -> Self {
        let mut tokens = Vec::new();
        let mut source_file_iterator = source_file.iter();

        tracing::debug!("Scanning source code");

        loop {
            match Token::tokenize(&mut source_file_iterator, handler) {
                Ok(Some(token)) => tokens.push(token),
                Ok(None) => {}
                Err(TokenizeError::EndOfSourceCodeIteratorArgument) => {
                    break;
                }
                Err(TokenizeError::InvalidLexeme) => {
                    tracing::trace!(
                        line = source_file_iterator.line(),
                        "Skipped invalid lexeme"
                    );
                }
            }
        }

        tokens.push(Token::eof(&source_file_iterator));

        tracing::debug!(token_count = tokens.len(), "Finished scanning source code");

        Self { tokens }
    }

    /// Dissolves this struct into its tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> {
        self.tokens
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
