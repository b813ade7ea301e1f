//! Import and export references read off a token stream.
//!
//! This walks significant tokens only and never builds a tree. It recognizes
//! the clause shapes that name another module:
//!
//! ```text
//! import x, { a, b as c } from "m"     import * as ns from "m"
//! import "m"   import("m")   require("m")
//! export { a, b as c } from "m"        export * from "m"
//! export const x = ...                 export default ...
//! ```
//!
//! Relative specifiers are resolved against the importing file's directory.

use crate::context::is_identifier_like;
use crate::options::{ScannerError, ScannerOptions};
use crate::scanner::Scanner;
use crate::token::Token;
use dependor_path::resolve_specifier;
use dependor_syntax::TokenKind;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModuleRefError {
    #[error("`{keyword}` clause at byte {offset} reaches end of file before its module specifier")]
    UnterminatedClause { keyword: &'static str, offset: u32 },

    #[error(transparent)]
    Scanner(#[from] ScannerError),
}

/// What one file imports and exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRefs {
    /// Resolved specifier to the names imported from it, in source order.
    /// `default` is the default import, `*` a namespace import. Side-effect
    /// imports, `import()` and `require()` have no names.
    pub imports: IndexMap<String, Vec<String>>,
    /// Names this module exports, in source order.
    pub exports: Vec<String>,
    /// Resolved specifiers re-exported from, without duplicates.
    pub re_exports: Vec<String>,
    /// Re-exported name to its specifier; `export * from "m"` maps `m` to `*`.
    pub re_export_map: FxHashMap<String, String>,
}

impl ModuleRefs {
    /// Scan `source` and collect its module references.
    pub fn from_source(
        source: &str,
        base_dir: &str,
        options: ScannerOptions,
    ) -> Result<Self, ModuleRefError> {
        let tokens: Vec<Token<'_>> = Scanner::new(source, options)?.collect();
        Self::collect(&tokens, base_dir)
    }

    /// Collect references from an already scanned token stream. Trivia in
    /// the stream is ignored.
    pub fn collect(tokens: &[Token<'_>], base_dir: &str) -> Result<Self, ModuleRefError> {
        let mut walker = Walker {
            tokens: tokens
                .iter()
                .filter(|t| !t.is_trivia() && t.kind != TokenKind::EndOfFile)
                .collect(),
            pos: 0,
            base_dir,
            refs: ModuleRefs::default(),
        };
        walker.run()?;
        debug!(
            imports = walker.refs.imports.len(),
            exports = walker.refs.exports.len(),
            re_exports = walker.refs.re_exports.len(),
            "collected module references"
        );
        Ok(walker.refs)
    }

    /// Imported specifiers in the order they first appear.
    pub fn import_specifiers(&self) -> Vec<&str> {
        self.imports.keys().map(String::as_str).collect()
    }
}

struct Walker<'t, 'a> {
    tokens: Vec<&'t Token<'a>>,
    pos: usize,
    base_dir: &'t str,
    refs: ModuleRefs,
}

/// The `import`/`export` keyword a clause started at.
#[derive(Clone, Copy)]
struct Clause {
    keyword: &'static str,
    offset: u32,
}

impl Clause {
    fn unterminated(self) -> ModuleRefError {
        ModuleRefError::UnterminatedClause {
            keyword: self.keyword,
            offset: self.offset,
        }
    }
}

/// A name in a binding list: `a`, `b as c`, `"str" as d`.
struct Binding {
    name: String,
    alias: Option<String>,
}

impl Binding {
    fn exported(self) -> String {
        self.alias.unwrap_or(self.name)
    }
}

impl<'t, 'a> Walker<'t, 'a> {
    fn token(&self, offset: usize) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos + offset).copied()
    }

    fn kind(&self, offset: usize) -> Option<TokenKind> {
        self.token(offset).map(|t| t.kind)
    }

    /// The string literal `offset` tokens ahead, if that is what it is.
    fn string_at(&self, offset: usize) -> Option<&'a str> {
        self.token(offset)
            .filter(|t| t.kind == TokenKind::StringLiteral)
            .map(|t| t.unquoted())
    }

    fn after_member_access(&self) -> bool {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .is_some_and(|t| matches!(t.kind, TokenKind::Dot | TokenKind::QuestionDot))
    }

    fn run(&mut self) -> Result<(), ModuleRefError> {
        while let Some(token) = self.token(0) {
            if self.after_member_access() {
                self.pos += 1;
                continue;
            }
            match token.kind {
                TokenKind::ImportKeyword => self.import_clause(token.start)?,
                TokenKind::ExportKeyword => self.export_clause(token.start)?,
                TokenKind::Identifier if token.text == "require" => self.require_call(),
                _ => self.pos += 1,
            }
        }
        Ok(())
    }

    fn add_import(&mut self, specifier: &str, names: Vec<String>) {
        let resolved = resolve_specifier(self.base_dir, specifier);
        self.refs.imports.entry(resolved).or_default().extend(names);
    }

    fn add_re_export(&mut self, specifier: &str) -> String {
        let resolved = resolve_specifier(self.base_dir, specifier);
        if !self.refs.re_exports.contains(&resolved) {
            self.refs.re_exports.push(resolved.clone());
        }
        resolved
    }

    /// `require("m")`
    fn require_call(&mut self) {
        if self.kind(1) == Some(TokenKind::OpenParen) {
            if let Some(specifier) = self.string_at(2) {
                self.add_import(specifier, Vec::new());
                self.pos += 3;
                return;
            }
        }
        self.pos += 1;
    }

    /// `type` as a modifier (`import type X`, `{ type A }`) rather than a name.
    fn is_type_modifier(&self) -> bool {
        match self.kind(1) {
            Some(TokenKind::OpenBrace | TokenKind::Asterisk) => true,
            Some(TokenKind::FromKeyword | TokenKind::AsKeyword) => false,
            Some(kind) => kind.is_identifier_or_keyword(),
            None => false,
        }
    }

    fn import_clause(&mut self, offset: u32) -> Result<(), ModuleRefError> {
        let clause = Clause {
            keyword: "import",
            offset,
        };
        match self.kind(1) {
            None => return Err(clause.unterminated()),
            Some(TokenKind::OpenParen) => {
                if let Some(specifier) = self.string_at(2) {
                    self.add_import(specifier, Vec::new());
                    self.pos += 3;
                } else {
                    self.pos += 1;
                }
                return Ok(());
            }
            // import.meta
            Some(TokenKind::Dot) => {
                self.pos += 1;
                return Ok(());
            }
            Some(TokenKind::StringLiteral) => {
                if let Some(specifier) = self.string_at(1) {
                    self.add_import(specifier, Vec::new());
                }
                self.pos += 2;
                return Ok(());
            }
            Some(_) => self.pos += 1,
        }

        let mut names = Vec::new();
        loop {
            let Some(token) = self.token(0) else {
                return Err(clause.unterminated());
            };
            match token.kind {
                TokenKind::FromKeyword if self.kind(1) == Some(TokenKind::StringLiteral) => {
                    if let Some(specifier) = self.string_at(1) {
                        self.add_import(specifier, names);
                    }
                    self.pos += 2;
                    return Ok(());
                }
                TokenKind::TypeKeyword if self.is_type_modifier() => self.pos += 1,
                TokenKind::Asterisk => {
                    names.push("*".to_string());
                    self.pos += 1;
                }
                // `* as ns`: the local name is not what the target exports
                TokenKind::AsKeyword => self.pos += 2,
                TokenKind::OpenBrace => {
                    self.pos += 1;
                    let bindings = self.bindings(clause)?;
                    names.extend(bindings.into_iter().map(|b| b.name));
                }
                TokenKind::Comma => self.pos += 1,
                kind if kind.is_identifier_or_keyword() => {
                    names.push("default".to_string());
                    self.pos += 1;
                }
                // `import x = require("m")` is picked up as a require call;
                // anything else is not an import clause
                _ => return Ok(()),
            }
        }
    }

    fn export_clause(&mut self, offset: u32) -> Result<(), ModuleRefError> {
        let clause = Clause {
            keyword: "export",
            offset,
        };
        self.pos += 1;
        if self.kind(0) == Some(TokenKind::TypeKeyword)
            && matches!(self.kind(1), Some(TokenKind::OpenBrace | TokenKind::Asterisk))
        {
            self.pos += 1;
        }
        match self.kind(0) {
            None => Err(clause.unterminated()),
            Some(TokenKind::DefaultKeyword) => {
                self.refs.exports.push("default".to_string());
                self.pos += 1;
                Ok(())
            }
            Some(TokenKind::Asterisk) => {
                self.pos += 1;
                self.export_star(clause)
            }
            Some(TokenKind::OpenBrace) => {
                self.pos += 1;
                let bindings = self.bindings(clause)?;
                self.export_bindings(bindings, clause)
            }
            Some(_) => {
                self.export_declaration();
                Ok(())
            }
        }
    }

    /// After `export *`: `from "m"` or `as ns from "m"`.
    fn export_star(&mut self, clause: Clause) -> Result<(), ModuleRefError> {
        let mut namespace = None;
        if self.kind(0) == Some(TokenKind::AsKeyword) {
            namespace = self.token(1).map(|t| t.unquoted().to_string());
            self.pos += 2;
        }
        let specifier = match (self.kind(0), self.kind(1)) {
            (Some(TokenKind::FromKeyword), Some(TokenKind::StringLiteral)) => self.string_at(1),
            (None, _) | (Some(TokenKind::FromKeyword), None) => {
                return Err(clause.unterminated())
            }
            _ => None,
        };
        let Some(specifier) = specifier else {
            return Ok(());
        };
        self.pos += 2;
        let resolved = self.add_re_export(specifier);
        match namespace {
            Some(name) => {
                self.refs.exports.push(name.clone());
                self.refs.re_export_map.insert(name, resolved);
            }
            None => {
                self.refs.re_export_map.insert(resolved, "*".to_string());
            }
        }
        Ok(())
    }

    /// After `export { ... }`, with or without a `from` clause.
    fn export_bindings(
        &mut self,
        bindings: Vec<Binding>,
        clause: Clause,
    ) -> Result<(), ModuleRefError> {
        let names: Vec<String> = bindings.into_iter().map(Binding::exported).collect();
        if self.kind(0) != Some(TokenKind::FromKeyword) {
            self.refs.exports.extend(names);
            return Ok(());
        }
        let Some(specifier) = self.string_at(1) else {
            if self.kind(1).is_none() {
                return Err(clause.unterminated());
            }
            self.refs.exports.extend(names);
            return Ok(());
        };
        self.pos += 2;
        let resolved = self.add_re_export(specifier);
        for name in names {
            self.refs.exports.push(name.clone());
            self.refs.re_export_map.insert(name, resolved.clone());
        }
        Ok(())
    }

    /// `export [declare] [async|abstract] const|function|class|... name`
    fn export_declaration(&mut self) {
        loop {
            match self.kind(0) {
                Some(
                    TokenKind::DeclareKeyword | TokenKind::AsyncKeyword | TokenKind::AbstractKeyword,
                ) => self.pos += 1,
                Some(TokenKind::ConstKeyword) if self.kind(1) == Some(TokenKind::EnumKeyword) => {
                    self.pos += 1
                }
                _ => break,
            }
        }
        let declares = matches!(
            self.kind(0),
            Some(
                TokenKind::ConstKeyword
                    | TokenKind::LetKeyword
                    | TokenKind::VarKeyword
                    | TokenKind::FunctionKeyword
                    | TokenKind::ClassKeyword
                    | TokenKind::InterfaceKeyword
                    | TokenKind::TypeKeyword
                    | TokenKind::EnumKeyword
                    | TokenKind::NamespaceKeyword
                    | TokenKind::ModuleKeyword
            )
        );
        if !declares {
            return;
        }
        self.pos += 1;
        if self.kind(0) == Some(TokenKind::Asterisk) {
            self.pos += 1;
        }
        if let Some(name) = self.token(0).filter(|t| is_identifier_like(t.kind)) {
            self.refs.exports.push(name.text.to_string());
            self.pos += 1;
        }
    }

    /// Parse a binding list after `{`, through the closing `}`.
    fn bindings(&mut self, clause: Clause) -> Result<Vec<Binding>, ModuleRefError> {
        let mut bindings = Vec::new();
        loop {
            let Some(token) = self.token(0) else {
                return Err(clause.unterminated());
            };
            match token.kind {
                TokenKind::CloseBrace => {
                    self.pos += 1;
                    return Ok(bindings);
                }
                TokenKind::TypeKeyword if self.is_type_modifier() => self.pos += 1,
                kind if kind.is_identifier_or_keyword() || kind == TokenKind::StringLiteral => {
                    let name = token.unquoted().to_string();
                    self.pos += 1;
                    let mut alias = None;
                    if self.kind(0) == Some(TokenKind::AsKeyword) {
                        alias = self.token(1).map(|t| t.unquoted().to_string());
                        self.pos += 2;
                    }
                    bindings.push(Binding { name, alias });
                }
                _ => self.pos += 1,
            }
        }
    }
}

