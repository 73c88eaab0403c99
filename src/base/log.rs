//! Module containing structures and implementations for logging messages to the user.

use colored::Colorize;
use std::fmt::Display;

use super::source_file::Span;

/// Represent the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
}

/// Struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The line the message refers to, if any.
    pub line: Option<usize>,

    /// The message to be displayed.
    pub display: T,
}

impl<T> Message<T> {
    /// Create a new log message with the given severity and message to be displayed.
    pub fn new(severity: Severity, display: T) -> Self {
        Self {
            severity,
            line: None,
            display,
        }
    }

    /// Attach the line the message refers to.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        Self {
            line: Some(line),
            ..self
        }
    }
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = (match self.severity {
            Severity::Error => "[error]:".red(),
        })
        .bold();

        let message_part = &self.display.to_string().bold();

        match self.line {
            Some(line) => write!(f, "{log_header} [line {line}] {message_part}"),
            None => write!(f, "{log_header} {message_part}"),
        }
    }
}

/// Structure implementing [`Display`] that prints the source line a span starts on, with the
/// spanned characters underlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed.
    pub help_display: Option<T>,
}

impl<'a, T> SourceCodeDisplay<'a, T> {
    /// Create a new source code display with the given span and help message to be displayed.
    pub fn new(span: &'a Span, help_display: Option<T>) -> Self {
        Self { span, help_display }
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source_file = self.span.source_file();

        let source_line = self.span.start_location().and_then(|location| {
            source_file
                .get_line(location.line)
                .map(|line_str| (location, line_str.trim_end_matches(['\n', '\r'])))
        });

        if let Some((location, line_str)) = source_line {
            let gutter = location.line.to_string();
            let padding = " ".repeat(gutter.len());

            // underline up to the end of the first line of the span
            let underline_width = self
                .span
                .str()
                .lines()
                .next()
                .map_or(1, |first| first.chars().count().max(1));

            writeln!(f, "{padding} {}", "|".blue().bold())?;
            writeln!(f, "{} {} {line_str}", gutter.blue().bold(), "|".blue().bold())?;
            write!(
                f,
                "{padding} {} {}{}",
                "|".blue().bold(),
                " ".repeat(location.column - 1),
                "^".repeat(underline_width).red().bold()
            )?;
        } else {
            write!(f, "{}", self.span.str())?;
        }

        if let Some(help_display) = &self.help_display {
            write!(f, "\n\n{help_display}")?;
        }

        Ok(())
    }
}
