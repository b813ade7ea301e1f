//! dependor_core: Core text utilities for the dependor tokenizer.
//!
//! Provides text spans and incremental line/column tracking used by the
//! scanner and by diagnostics.

pub mod text;

// Re-export commonly used types
pub use text::{LineColumnTracker, SourcePosition, TextPos, TextSpan};
