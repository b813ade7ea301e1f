//! Text spans and line/column tracking for source location reporting.
//!
//! Offsets are byte offsets into the source buffer. Lines and
//! columns are 1-based and only ever derived from offsets, never stored
//! independently of them.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct TextSpan {
    /// The byte offset where this span starts.
    pub start: TextPos,
    /// The length of this span in bytes.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether this span contains the given position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A 1-based line and column pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourcePosition {
    pub line: u32,
    /// Column in characters, with tabs expanded to the next tab stop.
    pub column: u32,
}

impl SourcePosition {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Converts monotonically increasing byte offsets into line/column pairs.
///
/// The scanner hands every token start to [`advance_to`](Self::advance_to)
/// in order, so the whole buffer is walked exactly once. `\r\n`, `\r`, `\n`,
/// U+2028 and U+2029 each count as a single line break.
#[derive(Debug, Clone)]
pub struct LineColumnTracker {
    offset: usize,
    line: u32,
    column: u32,
    tab_width: u32,
    after_carriage_return: bool,
}

impl LineColumnTracker {
    /// Create a tracker positioned at the start of the text.
    ///
    /// `tab_width` must be at least 1; callers validate it up front.
    pub fn new(tab_width: u32) -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
            tab_width: tab_width.max(1),
            after_carriage_return: false,
        }
    }

    /// The byte offset the tracker currently stands on.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The position of the current offset.
    #[inline]
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }

    /// Walk forward to `target` and return its position.
    ///
    /// Targets behind the current offset are ignored and return the current
    /// position; `target` must fall on a char boundary of `text`.
    pub fn advance_to(&mut self, text: &str, target: usize) -> SourcePosition {
        if target <= self.offset {
            return self.position();
        }
        for ch in text[self.offset..target].chars() {
            match ch {
                '\r' => {
                    self.line += 1;
                    self.column = 1;
                    self.after_carriage_return = true;
                    continue;
                }
                '\n' => {
                    if !self.after_carriage_return {
                        self.line += 1;
                        self.column = 1;
                    }
                }
                '\u{2028}' | '\u{2029}' => {
                    self.line += 1;
                    self.column = 1;
                }
                '\t' => {
                    let width = self.tab_width;
                    self.column = ((self.column - 1) / width + 1) * width + 1;
                }
                _ => self.column += 1,
            }
            self.after_carriage_return = false;
        }
        self.offset = target;
        self.position()
    }
}
