//! dependor_syntax: Token kinds and token flags.
//!
//! `TokenKind` is the closed set of kinds the scanner can produce. Every
//! keyword and punctuator has its own kind so consumers never re-inspect
//! token text to tell `>>` from `>`.

pub mod flags;
pub mod token_kind;

pub use flags::TokenFlags;
pub use token_kind::TokenKind;
