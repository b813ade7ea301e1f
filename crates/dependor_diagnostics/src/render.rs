//! Rendering diagnostics against their source text through `miette`.

use crate::{Diagnostic, DiagnosticCategory};
use miette::{LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan};
use std::fmt;
use thiserror::Error;

/// A diagnostic bundled with the named source it points into.
///
/// Hand it to any `miette` report handler to get a labelled snippet.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    code: u32,
    category: DiagnosticCategory,
    label: String,
    span: SourceSpan,
    snippet: NamedSource<String>,
}

impl DiagnosticReport {
    pub(crate) fn new(diagnostic: &Diagnostic, name: &str, source: &str) -> Self {
        // Spans past the end of the text would make miette bail out of the snippet.
        let start = (diagnostic.span.start as usize).min(source.len());
        let len = (diagnostic.span.length as usize).min(source.len() - start);
        Self {
            message: diagnostic.message_text.clone(),
            code: diagnostic.code,
            category: diagnostic.category,
            label: diagnostic.kind.to_string(),
            span: SourceSpan::new(start.into(), len),
            snippet: NamedSource::new(name, source.to_string()),
        }
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

impl miette::Diagnostic for DiagnosticReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("DP{}", self.code)))
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.category {
            DiagnosticCategory::Error => Severity::Error,
            DiagnosticCategory::Warning => Severity::Warning,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.snippet)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }
}
