//! The `slox` language front end.
//!
//! `slox` is a small, dynamically typed scripting language. This crate implements its lexical
//! analysis: source text goes in, a flat [`TokenStream`] comes out, and malformed input is
//! reported through a [`Handler`] without stopping the scan.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;

use std::cell::Cell;

use base::{source_file::SourceFile, CollectingHandler, Handler, Result};

use crate::{base::Error, lexical::token_stream::TokenStream};

/// Identifier given to source code passed to [`scan`].
const ANONYMOUS_SOURCE: &str = "<source>";

/// Converts the given source code to tokens, returning them together with every lexical error
/// that was encountered.
///
/// Scanning never fails: the token stream covers all valid input and ends with the end-of-input
/// token even if errors were found. Whether errors make the tokens unusable is up to the caller.
#[must_use]
pub fn scan(source: &str) -> (TokenStream, Vec<lexical::Error>) {
    let source_file = SourceFile::from_source(ANONYMOUS_SOURCE, source);
    let collector = CollectingHandler::new();

    let tokens = TokenStream::tokenize(&source_file, &collector);

    (tokens, collector.into_inner())
}

/// Converts the given source code to tokens, reporting lexical errors to the given handler.
///
/// # Errors
/// - If a lexical error occurred while tokenizing the source code.
pub fn tokenize(
    handler: &impl Handler<Error>,
    identifier: &str,
    source: &str,
) -> Result<TokenStream> {
    let source_file = SourceFile::from_source(identifier, source);

    let reporter = Reporter::new(handler);

    let tokens = TokenStream::tokenize(&source_file, &reporter);

    if reporter.has_reported() {
        return Err(Error::Other(
            "An error occurred while tokenizing the source code.",
        ));
    }

    Ok(tokens)
}

/// Forwards lexical errors to a crate level handler and remembers whether any were forwarded.
struct Reporter<'a, H> {
    handler: &'a H,
    reported: Cell<bool>,
}

impl<'a, H> Reporter<'a, H> {
    /// Creates a new [`Reporter`].
    fn new(handler: &'a H) -> Self {
        Self {
            handler,
            reported: Cell::new(false),
        }
    }

    fn has_reported(&self) -> bool {
        self.reported.get()
    }
}

impl<'a, H: Handler<Error>> Handler<lexical::Error> for Reporter<'a, H> {
    fn receive(&self, error: lexical::Error) {
        self.handler.receive(error.into());
        self.reported.set(true);
    }
}
