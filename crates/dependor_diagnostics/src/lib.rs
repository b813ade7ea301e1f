//! dependor_diagnostics: Diagnostic messages and error reporting for the tokenizer.
//!
//! The scanner never stops on malformed input. Every problem it finds is
//! recorded as a [`Diagnostic`] carrying a [`DiagnosticKind`], a message from
//! the [`messages`] catalogue and the source location it applies to.

mod render;

use dependor_core::text::{SourcePosition, TextSpan};
use serde::Serialize;
use std::fmt;

pub use render::DiagnosticReport;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// The closed taxonomy of problems the scanner can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// A string, template or regular expression literal with no closing delimiter.
    UnterminatedLiteral,
    /// A block comment with no closing `*/`.
    UnterminatedComment,
    /// A character that cannot start any token.
    UnexpectedCharacter,
    /// A guessed generic or JSX context that had to be abandoned.
    AmbiguousAngleFallback,
}

impl DiagnosticKind {
    /// Only the angle fallback is recoverable without an Invalid token.
    pub fn category(self) -> DiagnosticCategory {
        match self {
            DiagnosticKind::AmbiguousAngleFallback => DiagnosticCategory::Warning,
            _ => DiagnosticCategory::Error,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::UnterminatedLiteral => "unterminated literal",
            DiagnosticKind::UnterminatedComment => "unterminated comment",
            DiagnosticKind::UnexpectedCharacter => "unexpected character",
            DiagnosticKind::AmbiguousAngleFallback => "ambiguous angle fallback",
        };
        f.write_str(name)
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The source text span the diagnostic covers.
    pub span: TextSpan,
    /// Line and column of the span start.
    pub position: SourcePosition,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a diagnostic from a catalogue message.
    pub fn new(
        kind: DiagnosticKind,
        message: &DiagnosticMessage,
        args: &[&str],
        span: TextSpan,
        position: SourcePosition,
    ) -> Self {
        Self {
            kind,
            span,
            position,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Attach the source text so the diagnostic can be rendered by `miette`.
    pub fn to_report(&self, name: &str, source: &str) -> DiagnosticReport {
        DiagnosticReport::new(self, name, source)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}): {} DP{}: {}",
            self.position, self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during scanning.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Number of diagnostics of the given kind.
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1199)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character '{0}'.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");

    // ========================================================================
    // Angle bracket recovery (9000-9099)
    // ========================================================================
    pub const UNCLOSED_0_ABANDONED_AT_1: DiagnosticMessage = diag!(9001, Warning, "Unclosed {0} abandoned at '{1}'; scanning continues as ordinary code.");
    pub const CLOSING_TAG_WITHOUT_OPEN_ELEMENT: DiagnosticMessage = diag!(9002, Warning, "'</' does not close an open element; scanned as '<'.");
    pub const UNCLOSED_0_AT_END_OF_FILE: DiagnosticMessage = diag!(9003, Warning, "Unclosed {0} at end of file.");
}
