//! Scanner configuration.
//!
//! Options deserialize from JSON with camelCase keys, for example
//! `{ "emitTrivia": true, "tabWidth": 2, "dialect": "jsx" }`. Missing keys
//! take their defaults.

use dependor_path::Extension;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which lexical grammar to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `.ts`, `.js` and friends. `<` never opens a JSX element.
    #[default]
    Plain,
    /// `.tsx` and `.jsx`.
    Jsx,
}

impl Dialect {
    /// Pick the dialect from a file name. Unknown extensions scan as plain.
    pub fn from_path(path: &str) -> Dialect {
        match Extension::from_path(path) {
            Some(ext) if ext.is_jsx_capable() => Dialect::Jsx,
            _ => Dialect::Plain,
        }
    }
}

const DEFAULT_TAB_WIDTH: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerOptions {
    /// Emit whitespace, newlines and comments instead of skipping them.
    pub emit_trivia: bool,
    /// Columns a tab advances to the next stop of. Affects positions only.
    pub tab_width: u32,
    pub dialect: Dialect,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            emit_trivia: false,
            tab_width: DEFAULT_TAB_WIDTH,
            dialect: Dialect::Plain,
        }
    }
}

impl ScannerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trivia(mut self, emit_trivia: bool) -> Self {
        self.emit_trivia = emit_trivia;
        self
    }

    pub fn with_tab_width(mut self, tab_width: u32) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Options for scanning the file at `path`, dialect taken from its extension.
    pub fn for_path(path: &str) -> Self {
        Self::default().with_dialect(Dialect::from_path(path))
    }

    /// Parse options from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, ScannerError> {
        let options: ScannerOptions =
            serde_json::from_str(json).map_err(|e| ScannerError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.tab_width == 0 {
            return Err(ScannerError::InvalidTabWidth);
        }
        Ok(())
    }
}

/// Precondition violations, reported when a scanner is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScannerError {
    #[error("tab width must be at least 1")]
    InvalidTabWidth,

    #[error("source is {len} bytes; at most {max} bytes can be scanned")]
    SourceTooLarge { len: usize, max: usize },

    #[error("invalid scanner options: {0}")]
    InvalidOptions(String),
}
