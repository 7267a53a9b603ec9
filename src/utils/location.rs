//! Line-indexed source storage and location tracking for error reporting.
//!
//! Source code is stored line by line; every token, parse tree node, and
//! diagnostic refers back into the store through a [`SourceSpan`], which is
//! plain copyable data (line, offset, length).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous region of source code on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Line number (0-indexed)
    pub line: usize,
    /// Character offset within the line (0-indexed)
    pub offset: usize,
    /// Number of characters covered
    pub length: usize,
}

impl SourceSpan {
    /// Create a new span.
    pub fn new(line: usize, offset: usize, length: usize) -> Self {
        Self { line, offset, length }
    }

    /// Merge two spans into one covering both, anchored at `self`.
    ///
    /// Spans on the same line cover everything between the start of `self`
    /// and the end of `other`; spans on different lines keep the combined
    /// character count.
    pub fn merge(self, other: SourceSpan) -> SourceSpan {
        if self.line == other.line {
            SourceSpan {
                line: self.line,
                offset: self.offset,
                length: (other.offset + other.length).saturating_sub(self.offset),
            }
        } else {
            SourceSpan {
                line: self.line,
                offset: self.offset,
                length: self.length + other.length,
            }
        }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.offset)
    }
}

/// Line-indexed store for a registered source program.
///
/// Every stored line keeps a trailing newline, so offsets produced by the
/// lexer (including the end-of-input position on the final newline) always
/// index a real character.
#[derive(Debug, Clone)]
pub struct SourceCode {
    lines: Vec<String>,
}

impl SourceCode {
    /// Store source text line by line.
    pub fn new(text: &str) -> Self {
        let lines = text.lines().map(|line| format!("{line}\n")).collect();
        Self { lines }
    }

    /// Number of stored lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// A full stored line, including its trailing newline.
    pub fn line(&self, line: usize) -> &str {
        self.lines.get(line).map_or("", String::as_str)
    }

    /// Number of characters on a line, counting the trailing newline.
    pub fn line_length(&self, line: usize) -> usize {
        self.line(line).chars().count()
    }

    /// The character at a position, or `None` past the end of the line.
    pub fn char_at(&self, line: usize, offset: usize) -> Option<char> {
        self.line(line).chars().nth(offset)
    }

    /// The text covered by a span on its starting line.
    pub fn span_text(&self, span: SourceSpan) -> String {
        self.line(span.line)
            .chars()
            .skip(span.offset)
            .take(span.length)
            .collect()
    }

    /// Render a diagnostic in context:
    ///
    /// ```text
    /// <line>:<offset>: <message>
    /// <full source line>
    ///     ^~~~
    /// ```
    ///
    /// with the caret under the first spanned character and one tilde per
    /// remaining character.
    pub fn format_context(&self, span: SourceSpan, message: &str) -> String {
        let mut out = format!("{}:{}: {}\n", span.line, span.offset, message);
        let line = self.line(span.line);
        out.push_str(line);
        if !line.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&" ".repeat(span.offset));
        out.push('^');
        out.push_str(&"~".repeat(span.length.saturating_sub(1)));
        out.push('\n');
        out
    }

    /// Print a diagnostic in context to stderr.
    pub fn report(&self, span: SourceSpan, message: &str) {
        eprint!("{}", self.format_context(span, message));
    }
}
