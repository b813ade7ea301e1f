use dependor_core::text::{SourcePosition, TextSpan};
use dependor_diagnostics::DiagnosticKind;
use dependor_syntax::{TokenFlags, TokenKind};
use serde::Serialize;

/// A classified slice of the source.
///
/// Tokens borrow the source buffer, not the scanner, so they outlive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first byte.
    pub start: u32,
    /// Byte offset one past the last byte.
    pub end: u32,
    /// 1-based.
    pub line: u32,
    /// 1-based, in characters, tabs expanded.
    pub column: u32,
    #[serde(skip_serializing_if = "TokenFlags::is_empty")]
    pub flags: TokenFlags,
    /// Set on `Invalid` tokens and on tokens that triggered a recovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<DiagnosticKind>,
}

impl<'a> Token<'a> {
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.start, self.end)
    }

    #[inline]
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// The contents of a string literal without its quotes. Other tokens are
    /// returned as written.
    pub fn unquoted(&self) -> &'a str {
        if self.kind != TokenKind::StringLiteral || self.text.len() < 2 {
            return self.text;
        }
        &self.text[1..self.text.len() - 1]
    }
}
