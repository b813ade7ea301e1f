//! dependor_scanner: Context-sensitive tokenizer for TypeScript and TSX.
//!
//! Turns one source buffer into a lazy stream of [`Token`]s, with:
//! - generic brackets told apart from comparisons and shifts (`>>` inside
//!   `A<B<C>>` comes out as two `GenericClose` tokens)
//! - JSX tags, attributes, text and expression holes
//! - template literals with nested substitutions
//! - regular expression literals by lookback
//! - a diagnostics side channel; malformed input never stops the scanner
//!
//! [`tokenize_batch`] scans independent buffers in parallel, and
//! [`ModuleRefs`] reads imports and exports off a token stream.

mod angle;
mod char_codes;
pub mod context;
mod cursor;
pub mod module_refs;
pub mod options;
mod scanner;
mod token;

pub use context::Context;
pub use dependor_diagnostics::{Diagnostic, DiagnosticKind};
pub use dependor_syntax::{TokenFlags, TokenKind};
pub use module_refs::{ModuleRefError, ModuleRefs};
pub use options::{Dialect, ScannerError, ScannerOptions};
pub use scanner::{Scanner, MAX_LOOKAHEAD};
pub use token::Token;

use rayon::prelude::*;
use tracing::debug;

/// Every token of one buffer, ending with EOF, plus its diagnostics.
#[derive(Debug, Clone)]
pub struct Tokenized<'a> {
    pub tokens: Vec<Token<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Tokenized<'a> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Concatenated token texts. Equals the source when trivia was emitted.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text).collect()
    }
}

/// Scan a whole buffer.
#[tracing::instrument(level = "debug", skip(source, options), fields(len = source.len()))]
pub fn tokenize<'a>(
    source: &'a str,
    options: &ScannerOptions,
) -> Result<Tokenized<'a>, ScannerError> {
    let mut scanner = Scanner::new(source, *options)?;
    let tokens: Vec<Token<'a>> = scanner.by_ref().collect();
    let diagnostics = scanner.take_diagnostics().into_diagnostics();
    debug!(tokens = tokens.len(), diagnostics = diagnostics.len(), "tokenized");
    Ok(Tokenized {
        tokens,
        diagnostics,
    })
}

/// Scan independent buffers in parallel. Results are in input order.
pub fn tokenize_batch<'a>(
    sources: &[&'a str],
    options: &ScannerOptions,
) -> Vec<Result<Tokenized<'a>, ScannerError>> {
    debug!(files = sources.len(), "tokenizing batch");
    sources
        .par_iter()
        .map(|&source| tokenize(source, options))
        .collect()
}
