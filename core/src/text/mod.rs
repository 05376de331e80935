use std::fmt;

use serde::{Deserialize, Serialize};

use crate::COMMENT_MARKER;


/// Zero-based line and UTF-16 column inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

// Rendered 1-based for humans.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// Half-open range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `position` lies on the span's first line between its start and
    /// end columns, end inclusive, so a cursor parked right after a token
    /// still counts as touching it.
    pub fn touches(&self, position: Position) -> bool {
        position.line == self.start.line
            && position.character >= self.start.character
            && (self.end.line > position.line || position.character <= self.end.character)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}-{}", self.start, self.end.character + 1)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line table over a text snapshot, mapping byte offsets to positions and back.
///
/// Lines are split on `\n`; a preceding `\r` stays part of the line so that the
/// two conversions remain exact inverses on every character boundary.
#[derive(Debug, Clone)]
pub struct LineIndex<'t> {
    text: &'t str,
    line_starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    pub fn new(text: &'t str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where `line` begins; lines past the end map to the text end.
    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts.get(line).copied().unwrap_or(self.text.len())
    }

    /// Byte offset of the `\n` closing `line`, or the text end for the last line.
    pub fn line_end(&self, line: usize) -> usize {
        match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        }
    }

    /// Content of `line` without its `\n`. Empty for lines past the end.
    pub fn line_text(&self, line: usize) -> &'t str {
        if line >= self.line_count() {
            return "";
        }
        &self.text[self.line_start(line)..self.line_end(line)]
    }

    /// Zero-based line containing `offset` (clamped).
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    pub fn position(&self, offset: usize) -> Position {
        let offset = floor_char_boundary(self.text, offset);
        let line = self.line_of(offset);
        let start = self.line_starts[line];
        let character: usize = self.text[start..offset].chars().map(char::len_utf16).sum();
        Position::new(line as u32, character as u32)
    }

    pub fn offset(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_count() {
            return self.text.len();
        }
        let start = self.line_start(line);
        let end = self.line_end(line);
        let target = position.character as usize;
        let mut units = 0usize;
        for (idx, ch) in self.text[start..end].char_indices() {
            let next = units + ch.len_utf16();
            if next > target {
                return start + idx;
            }
            units = next;
        }
        end
    }

    /// Span covering the byte range `start..end`.
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.position(start), self.position(end))
    }

    /// Span of a whole line including its line break: `(line, 0)..(line + 1, 0)`,
    /// clamped to the end of the text.
    pub fn line_span(&self, line: usize) -> Span {
        self.span(self.line_start(line), self.line_start(line + 1))
    }

    /// Comment-free code on `line` and the byte offset where it starts.
    pub fn code(&self, line: usize) -> (usize, &'t str) {
        let text = self.line_text(line);
        let lead = text.len() - text.trim_start().len();
        (self.line_start(line) + lead, strip_comment(text))
    }

    /// Resolves a span back to the text it covers.
    pub fn slice(&self, span: Span) -> &'t str {
        let start = self.offset(span.start);
        let end = self.offset(span.end).max(start);
        &self.text[start..end]
    }
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

pub fn offset_to_position(text: &str, offset: usize) -> Position {
    LineIndex::new(text).position(offset)
}

pub fn position_to_offset(text: &str, position: Position) -> usize {
    LineIndex::new(text).offset(position)
}

/// Drops everything from the first comment marker on and trims the rest.
pub fn strip_comment(fragment: &str) -> &str {
    fragment
        .split_once(COMMENT_MARKER)
        .map_or(fragment, |(code, _)| code)
        .trim()
}
