//! Module for handling source files and their elements.

use std::{
    cmp::Ordering,
    fmt::Debug,
    ops::Range,
    str::CharIndices,
    sync::Arc,
};

use getset::{CopyGetters, Getters};

/// Represents a source file that contains the source code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Getters)]
pub struct SourceFile {
    /// Get the identifier of the source file.
    #[get = "pub"]
    identifier: String,
    /// Get the content of the source file
    #[get = "pub"]
    content: String,
    lines: Vec<Range<usize>>,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("identifier", &self.identifier)
            .field("lines", &self.lines)
            .finish()
    }
}

impl SourceFile {
    /// Creates a source file from already loaded text.
    ///
    /// The `identifier` names the source in diagnostics, e.g. a path or `<repl>`.
    #[must_use]
    pub fn from_source(identifier: impl Into<String>, content: impl Into<String>) -> Arc<Self> {
        let content = content.into();
        let lines = get_line_byte_positions(&content);

        Arc::new(Self {
            identifier: identifier.into(),
            content,
            lines,
        })
    }

    /// Get the line of the source file at the given line number.
    ///
    /// Numbering starts at 1. The returned slice includes the trailing line feed, if any.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }

        let line = line - 1;
        self.lines
            .get(line)
            .map(|range| &self.content()[range.clone()])
    }

    /// Get the [`SourceIterator`] for the source file.
    #[must_use]
    pub fn iter<'a>(self: &'a Arc<Self>) -> SourceIterator<'a> {
        SourceIterator {
            source_file: self,
            iterator: self.content().char_indices(),
            line: 1,
        }
    }

    /// Get the number of lines in the source file.
    #[must_use]
    pub fn line_amount(&self) -> usize {
        self.lines.len()
    }

    /// Get the [`Location`] of a given byte index
    #[must_use]
    pub fn get_location(&self, byte_index: usize) -> Option<Location> {
        if !self.content.is_char_boundary(byte_index) {
            return None;
        }

        // get the line number by binary searching the line ranges
        let line = self
            .lines
            .binary_search_by(|range| {
                if range.contains(&byte_index) {
                    Ordering::Equal
                } else if byte_index < range.start {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()?;

        let line_starting_byte_index = self.lines[line].start;
        let line_str = self.get_line(line + 1)?;

        // get the column number by counting the unicode scalar values before the index (starts at 1)
        let column = line_str
            .char_indices()
            .take_while(|(i, _)| *i + line_starting_byte_index < byte_index)
            .count()
            + 1;

        Some(Location {
            line: line + 1,
            column,
        })
    }
}

/// Represents a range of characters in a source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Get the start byte index of the span.
    #[get_copy = "pub"]
    start: usize,

    /// Get the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: usize,

    /// Get the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.str())
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        let self_ptr_value = Arc::as_ptr(&self.source_file) as usize;
        let other_ptr_value = Arc::as_ptr(&other.source_file) as usize;

        self_ptr_value
            .cmp(&other_ptr_value)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        Arc::as_ptr(&self.source_file).hash(state);
    }
}

impl Span {
    /// Create a span from the given start and end byte indices in the source file.
    ///
    /// Returns [`None`] if the indices are out of order, out of bounds or not on a character
    /// boundary.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: usize, end: usize) -> Option<Self> {
        let content = source_file.content();
        if start > end
            || end > content.len()
            || !content.is_char_boundary(start)
            || !content.is_char_boundary(end)
        {
            return None;
        }

        Some(Self {
            start,
            end,
            source_file,
        })
    }

    /// Create a span from the given start byte index to the end of the source file.
    #[must_use]
    pub fn to_end(source_file: Arc<SourceFile>, start: usize) -> Option<Self> {
        let end = source_file.content().len();
        Self::new(source_file, start, end)
    }

    /// Get the string slice of the source code that the span represents.
    #[must_use]
    pub fn str(&self) -> &str {
        &self.source_file.content()[self.start..self.end]
    }

    /// Get the starting [`Location`] of the span.
    ///
    /// Returns [`None`] for an empty span at the very end of the source file.
    #[must_use]
    pub fn start_location(&self) -> Option<Location> {
        self.source_file.get_location(self.start)
    }
}

/// Pointing to a particular location in a source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// Line number of the location (starts at 1).
    pub line: usize,

    /// Column number of the location (starts at 1).
    pub column: usize,
}

/// Represents an element that is located within a source file.
pub trait SourceElement {
    /// Get the span location of the element.
    fn span(&self) -> Span;
}

/// Cursor over the characters of a source file.
///
/// Peeking never moves the cursor. The line counter is incremented exactly once for every line
/// feed that is consumed.
#[derive(Debug, Clone, CopyGetters)]
pub struct SourceIterator<'a> {
    /// Get the source file that the iterator is iterating over.
    #[get_copy = "pub"]
    source_file: &'a Arc<SourceFile>,
    iterator: CharIndices<'a>,
    /// Get the line the cursor is currently on (starts at 1).
    #[get_copy = "pub"]
    line: usize,
}

impl<'a> SourceIterator<'a> {
    /// Peek at the next character in the source file.
    #[must_use]
    pub fn peek(&self) -> Option<(usize, char)> {
        self.iterator.clone().next()
    }

    /// Peek at the character after the next one.
    #[must_use]
    pub fn peek_next(&self) -> Option<(usize, char)> {
        self.iterator.clone().nth(1)
    }

    /// Consumes the next character only if it equals `expected`.
    pub fn next_if_eq(&mut self, expected: char) -> bool {
        match self.peek() {
            Some((_, character)) if character == expected => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Byte index of the next character, or the length of the source when exhausted.
    #[must_use]
    pub fn position(&self) -> usize {
        self.peek()
            .map_or_else(|| self.source_file.content().len(), |(index, _)| index)
    }

    /// Whether every character has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }
}

impl<'a> Iterator for SourceIterator<'a> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iterator.next();
        if let Some((_, '\n')) = item {
            self.line += 1;
        }
        item
    }
}

/// Get the byte ranges of the lines in the given text.
///
/// Only the line feed terminates a line, matching how the scanner counts lines.
fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    for (byte, _) in text.match_indices('\n') {
        #[allow(clippy::range_plus_one)]
        results.push(current_position..byte + 1);

        current_position = byte + 1;
    }

    // add the last line
    results.push(current_position..text.len());

    results
}
