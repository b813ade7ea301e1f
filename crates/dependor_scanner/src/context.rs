//! The disambiguation stack and the lookback window.
//!
//! Both are small and bounded: the stack only grows with nesting in the
//! source, and the lookback keeps the last three significant token kinds.

use dependor_syntax::TokenKind;
use serde::Serialize;

/// One open lexical context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Context {
    Paren,
    Bracket,
    Brace,
    /// A type-argument or type-parameter list opened at byte `start`.
    Generic { start: u32 },
    /// Inside `${ ... }` of a template literal.
    TemplateHole,
    /// Between `<` (or `</`) and the `>` that ends a JSX tag.
    JsxTag { closing: bool },
    /// Between an opening tag's `>` and its `</`.
    JsxChildren,
    /// `{ ... }` inside a JSX tag or JSX children.
    JsxExpression,
}

impl Context {
    /// Human-readable name used in diagnostic messages.
    pub fn describe(self) -> &'static str {
        match self {
            Context::Paren => "parenthesis",
            Context::Bracket => "bracket",
            Context::Brace => "brace",
            Context::Generic { .. } => "type argument list",
            Context::TemplateHole => "template substitution",
            Context::JsxTag { .. } => "JSX tag",
            Context::JsxChildren => "JSX element",
            Context::JsxExpression => "JSX expression",
        }
    }

    #[inline]
    pub fn is_generic(self) -> bool {
        matches!(self, Context::Generic { .. })
    }

    /// Contexts whose closing is guessed and may be abandoned on recovery.
    #[inline]
    pub fn is_speculative(self) -> bool {
        matches!(
            self,
            Context::Generic { .. } | Context::JsxTag { .. } | Context::JsxChildren
        )
    }
}

/// Stack of open contexts, innermost last.
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    stack: Vec<Context>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, context: Context) {
        self.stack.push(context);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Context> {
        self.stack.pop()
    }

    #[inline]
    pub fn top(&self) -> Option<Context> {
        self.stack.last().copied()
    }

    /// Pop while the top is a `Generic`, returning how many were dropped and
    /// the start of the outermost one.
    pub fn pop_generics(&mut self) -> Option<(usize, u32)> {
        let mut dropped = 0;
        let mut outermost = None;
        while let Some(Context::Generic { start }) = self.top() {
            self.stack.pop();
            dropped += 1;
            outermost = Some(start);
        }
        outermost.map(|start| (dropped, start))
    }

    pub fn as_slice(&self) -> &[Context] {
        &self.stack
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Context> {
        self.stack.drain(..)
    }
}

const LOOKBACK: usize = 3;

/// The last few significant token kinds, most recent first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lookback {
    kinds: [Option<TokenKind>; LOOKBACK],
}

impl Lookback {
    pub fn push(&mut self, kind: TokenKind) {
        self.kinds.rotate_right(1);
        self.kinds[0] = Some(kind);
    }

    /// Replace the most recent kind, for tokens that act as a different kind.
    pub fn retag_prev(&mut self, kind: TokenKind) {
        if self.kinds[0].is_some() {
            self.kinds[0] = Some(kind);
        }
    }

    #[inline]
    pub fn prev(&self) -> Option<TokenKind> {
        self.kinds[0]
    }

    #[inline]
    pub fn prev2(&self) -> Option<TokenKind> {
        self.kinds[1]
    }

    #[inline]
    pub fn prev3(&self) -> Option<TokenKind> {
        self.kinds[2]
    }
}

/// Contextual keywords that start an expression or a type operand, so a
/// following `/` or `<` is not a binary operator.
pub fn is_prefix_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::AwaitKeyword
            | TokenKind::YieldKeyword
            | TokenKind::OfKeyword
            | TokenKind::AsKeyword
            | TokenKind::SatisfiesKeyword
            | TokenKind::KeyOfKeyword
            | TokenKind::InferKeyword
            | TokenKind::IsKeyword
            | TokenKind::AssertsKeyword
            | TokenKind::ReadonlyKeyword
            | TokenKind::UniqueKeyword
    )
}

/// Identifiers and contextual keywords used as names (`string`, `get`, `from`).
pub fn is_identifier_like(kind: TokenKind) -> bool {
    kind == TokenKind::Identifier
        || (kind.is_keyword() && !kind.is_reserved_word() && !is_prefix_keyword(kind))
}

/// Whether a token can be the last token of an expression. After such a
/// token `/` divides and `<` compares.
pub fn ends_expression(kind: TokenKind) -> bool {
    is_identifier_like(kind)
        || matches!(
            kind,
            TokenKind::PrivateIdentifier
                | TokenKind::NumericLiteral
                | TokenKind::BigIntLiteral
                | TokenKind::StringLiteral
                | TokenKind::RegularExpressionLiteral
                | TokenKind::NoSubstitutionTemplateLiteral
                | TokenKind::TemplateTail
                | TokenKind::CloseParen
                | TokenKind::CloseBracket
                | TokenKind::GenericClose
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::JsxTagEnd
                | TokenKind::JsxSelfClose
                | TokenKind::ThisKeyword
                | TokenKind::SuperKeyword
                | TokenKind::NullKeyword
                | TokenKind::TrueKeyword
                | TokenKind::FalseKeyword
        )
}
