//! The context-sensitive scanner.
//!
//! One pass, no backtracking over committed tokens. Which lexical mode a
//! character is scanned in comes from the top of the [`ContextStack`]:
//! ordinary code, a JSX tag, or JSX children. What a lone `<` means is
//! decided by [`crate::angle`].

use crate::angle::{classify_angle, AngleRole, AngleSite};
use crate::char_codes::*;
use crate::context::{ends_expression, Context, ContextStack, Lookback};
use crate::cursor::{Cursor, TemplateEnd};
use crate::options::{ScannerError, ScannerOptions};
use crate::token::Token;
use dependor_core::text::{LineColumnTracker, SourcePosition, TextSpan};
use dependor_diagnostics::{
    messages, Diagnostic, DiagnosticCollection, DiagnosticKind, DiagnosticMessage,
};
use dependor_syntax::{TokenFlags, TokenKind};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::mem;
use tracing::{debug, trace};

/// How far [`Scanner::peek`] may look ahead.
pub const MAX_LOOKAHEAD: usize = 16;

/// Scans one source buffer into tokens.
pub struct Scanner<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    options: ScannerOptions,
    /// Line/column of token starts; only ever moves forward.
    tracker: LineColumnTracker,
    contexts: ContextStack,
    lookback: Lookback,
    /// Significant tokens scanned by `peek` but not yet returned.
    lookahead: VecDeque<Token<'a>>,
    diagnostics: DiagnosticCollection,
    /// Set by `expect_type_arguments`, consumed by the next `<`.
    type_arguments_hint: bool,
    /// A skipped or emitted trivia token contained a line break.
    pending_line_break: bool,
    /// Diagnostic raised while scanning the current token.
    token_diagnostic: Option<DiagnosticKind>,
    token_start: usize,
    token_position: SourcePosition,
    /// End of the last significant token.
    last_end: usize,
    /// End of a `<` recovered from an unmatched `</`; a `/` right after it divides.
    no_regex_after: Option<usize>,
    eof: Option<Token<'a>>,
    /// The iterator has handed out the EOF token.
    exhausted: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `source`.
    ///
    /// Fails only on precondition violations: invalid options or a buffer too
    /// large for `u32` offsets.
    pub fn new(source: &'a str, options: ScannerOptions) -> Result<Self, ScannerError> {
        options.validate()?;
        let max = u32::MAX as usize;
        if source.len() > max {
            return Err(ScannerError::SourceTooLarge {
                len: source.len(),
                max,
            });
        }
        Ok(Self {
            source,
            cursor: Cursor::new(source),
            options,
            tracker: LineColumnTracker::new(options.tab_width),
            contexts: ContextStack::new(),
            lookback: Lookback::default(),
            lookahead: VecDeque::new(),
            diagnostics: DiagnosticCollection::new(),
            type_arguments_hint: false,
            pending_line_break: false,
            token_diagnostic: None,
            token_start: 0,
            token_position: SourcePosition::new(1, 1),
            last_end: 0,
            no_regex_after: None,
            eof: None,
            exhausted: false,
        })
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// Return the next token. After end of input this keeps returning the
    /// same EOF token.
    pub fn next_token(&mut self) -> Token<'a> {
        match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.scan_token(),
        }
    }

    /// Look `k` tokens ahead without consuming (`peek(0)` is the token the
    /// next `next_token` call returns). Returns `None` for `k >= MAX_LOOKAHEAD`.
    pub fn peek(&mut self, k: usize) -> Option<&Token<'a>> {
        if k >= MAX_LOOKAHEAD {
            return None;
        }
        while self.lookahead.len() <= k {
            let token = self.scan_token();
            self.lookahead.push_back(token);
        }
        self.lookahead.get(k)
    }

    /// Tell the scanner that the next `<` it scans opens a type-argument
    /// list. Tokens already buffered by `peek` are not rescanned.
    pub fn expect_type_arguments(&mut self) {
        self.type_arguments_hint = true;
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        mem::take(&mut self.diagnostics)
    }

    /// Open contexts, innermost last.
    pub fn contexts(&self) -> &[Context] {
        self.contexts.as_slice()
    }

    // ========================================================================
    // Token assembly
    // ========================================================================

    /// Next token after filtering trivia per the options.
    fn scan_token(&mut self) -> Token<'a> {
        loop {
            let token = self.scan_raw();
            if token.kind.is_trivia() && !self.options.emit_trivia {
                continue;
            }
            return token;
        }
    }

    fn make_token(&mut self, kind: TokenKind, mut flags: TokenFlags) -> Token<'a> {
        let source = self.source;
        let start = self.token_start;
        let end = self.cursor.pos();
        let text = &source[start..end];
        if kind.is_trivia() {
            if text.contains(is_line_break) {
                self.pending_line_break = true;
            }
        } else {
            if mem::take(&mut self.pending_line_break) {
                flags |= TokenFlags::PRECEDING_LINE_BREAK;
            }
            self.lookback.push(kind);
            self.last_end = end;
        }
        trace!(?kind, start, end, "token");
        Token {
            kind,
            text,
            start: start as u32,
            end: end as u32,
            line: self.token_position.line,
            column: self.token_position.column,
            flags,
            diagnostic: self.token_diagnostic.take(),
        }
    }

    fn report(
        &mut self,
        kind: DiagnosticKind,
        message: &DiagnosticMessage,
        args: &[&str],
        span: TextSpan,
    ) {
        self.diagnostics.add(Diagnostic::new(
            kind,
            message,
            args,
            span,
            self.token_position,
        ));
        self.token_diagnostic = Some(kind);
    }

    /// Emit everything scanned so far as an `Invalid` token.
    fn invalid(
        &mut self,
        kind: DiagnosticKind,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Token<'a> {
        let span = TextSpan::from_bounds(self.token_start as u32, self.cursor.pos() as u32);
        self.report(kind, message, args, span);
        let flags = match kind {
            DiagnosticKind::UnexpectedCharacter => TokenFlags::NONE,
            _ => TokenFlags::UNTERMINATED,
        };
        self.make_token(TokenKind::Invalid, flags)
    }

    fn punctuation(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        self.cursor.advance(len);
        self.make_token(kind, TokenFlags::NONE)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn scan_raw(&mut self) -> Token<'a> {
        if let Some(eof) = self.eof {
            return eof;
        }
        self.token_start = self.cursor.pos();
        self.token_position = self.tracker.advance_to(self.source, self.token_start);

        if self.cursor.is_eof() {
            return self.finish();
        }
        match self.contexts.top() {
            Some(Context::JsxChildren) => return self.scan_jsx_child(),
            Some(Context::JsxTag { closing }) => {
                if let Some(token) = self.scan_jsx_tag_token(closing) {
                    return token;
                }
            }
            _ => {}
        }
        self.scan_code()
    }

    /// Report what is still open, then produce the EOF token for good.
    fn finish(&mut self) -> Token<'a> {
        let open: Vec<Context> = self.contexts.drain().collect();
        let at = TextSpan::empty(self.token_start as u32);
        for context in open.into_iter().rev() {
            match context {
                Context::TemplateHole => self.report(
                    DiagnosticKind::UnterminatedLiteral,
                    &messages::UNTERMINATED_TEMPLATE_LITERAL,
                    &[],
                    at,
                ),
                context if context.is_speculative() => {
                    debug!(context = context.describe(), "context open at end of file");
                    self.report(
                        DiagnosticKind::AmbiguousAngleFallback,
                        &messages::UNCLOSED_0_AT_END_OF_FILE,
                        &[context.describe()],
                        at,
                    );
                }
                _ => {}
            }
        }
        let token = self.make_token(TokenKind::EndOfFile, TokenFlags::NONE);
        self.eof = Some(token);
        token
    }

    fn scan_code(&mut self) -> Token<'a> {
        let Some(ch) = self.cursor.peek() else {
            return self.finish();
        };
        match ch {
            ch if is_line_break(ch) => {
                self.cursor.eat_newline();
                self.make_token(TokenKind::NewLine, TokenFlags::NONE)
            }
            ch if is_white_space_single_line(ch) => {
                self.cursor.eat_whitespace();
                self.make_token(TokenKind::Whitespace, TokenFlags::NONE)
            }
            '/' => self.scan_slash(),
            '\'' | '"' => {
                if self.cursor.eat_string(ch) {
                    self.make_token(TokenKind::StringLiteral, TokenFlags::NONE)
                } else {
                    self.invalid(
                        DiagnosticKind::UnterminatedLiteral,
                        &messages::UNTERMINATED_STRING_LITERAL,
                        &[],
                    )
                }
            }
            '`' => {
                self.cursor.advance(1);
                self.scan_template(TokenKind::NoSubstitutionTemplateLiteral, TokenKind::TemplateHead)
            }
            ch if is_digit(ch) => self.scan_number(),
            '.' if self.cursor.byte_at(1).is_some_and(|b| b.is_ascii_digit()) => self.scan_number(),
            '#' => self.scan_hash(),
            ch if is_identifier_start(ch) => self.scan_identifier(),
            '<' | '=' | '>' | '|' if self.cursor.is_conflict_marker() => {
                self.cursor.eat_conflict_marker();
                self.make_token(TokenKind::ConflictMarker, TokenFlags::NONE)
            }
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '(' => {
                self.contexts.push(Context::Paren);
                self.punctuation(TokenKind::OpenParen, 1)
            }
            '[' => {
                self.contexts.push(Context::Bracket);
                self.punctuation(TokenKind::OpenBracket, 1)
            }
            '{' => {
                self.contexts.push(Context::Brace);
                self.punctuation(TokenKind::OpenBrace, 1)
            }
            ')' | ']' | '}' => self.scan_closer(ch),
            ';' => {
                self.abandon_generics(ch);
                self.punctuation(TokenKind::Semicolon, 1)
            }
            _ => self.scan_punctuator(),
        }
    }

    // ========================================================================
    // Code mode
    // ========================================================================

    fn scan_slash(&mut self) -> Token<'a> {
        match self.cursor.byte_at(1) {
            Some(b'/') => {
                self.cursor.eat_line_comment();
                self.make_token(TokenKind::SingleLineComment, TokenFlags::NONE)
            }
            Some(b'*') => {
                if self.cursor.eat_block_comment() {
                    self.make_token(TokenKind::MultiLineComment, TokenFlags::NONE)
                } else {
                    self.invalid(
                        DiagnosticKind::UnterminatedComment,
                        &messages::ASTERISK_SLASH_EXPECTED,
                        &[],
                    )
                }
            }
            _ if self.regex_allowed() => {
                if self.cursor.eat_regex() {
                    self.make_token(TokenKind::RegularExpressionLiteral, TokenFlags::NONE)
                } else {
                    self.invalid(
                        DiagnosticKind::UnterminatedLiteral,
                        &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                        &[],
                    )
                }
            }
            _ => self.scan_punctuator(),
        }
    }

    /// A `/` starts a regex unless the previous token ends an expression.
    fn regex_allowed(&self) -> bool {
        if self.no_regex_after == Some(self.last_end) {
            return false;
        }
        !self.lookback.prev().is_some_and(ends_expression)
    }

    fn scan_punctuator(&mut self) -> Token<'a> {
        if let Some(kind) = self.cursor.eat_punctuator() {
            return self.make_token(kind, TokenFlags::NONE);
        }
        let text = self.cursor.bump().map(String::from).unwrap_or_default();
        self.invalid(
            DiagnosticKind::UnexpectedCharacter,
            &messages::INVALID_CHARACTER,
            &[&text],
        )
    }

    fn scan_template(&mut self, complete: TokenKind, head: TokenKind) -> Token<'a> {
        match self.cursor.eat_template_chunk() {
            TemplateEnd::Tail => self.make_token(complete, TokenFlags::NONE),
            TemplateEnd::Hole => {
                self.contexts.push(Context::TemplateHole);
                self.make_token(head, TokenFlags::NONE)
            }
            TemplateEnd::Unterminated => self.invalid(
                DiagnosticKind::UnterminatedLiteral,
                &messages::UNTERMINATED_TEMPLATE_LITERAL,
                &[],
            ),
        }
    }

    fn scan_number(&mut self) -> Token<'a> {
        let (kind, flags) = self.cursor.eat_number();
        self.make_token(kind, flags)
    }

    /// `#!` shebang, `#name` private identifier, or a stray `#`.
    fn scan_hash(&mut self) -> Token<'a> {
        if self.cursor.is_shebang() {
            self.cursor.eat_shebang();
            return self.make_token(TokenKind::Shebang, TokenFlags::NONE);
        }
        let mut name = self.cursor;
        name.advance(1);
        if name.peek().is_some_and(is_identifier_start) {
            self.cursor.advance(1);
            self.cursor.eat_identifier();
            return self.make_token(TokenKind::PrivateIdentifier, TokenFlags::NONE);
        }
        self.cursor.advance(1);
        self.invalid(
            DiagnosticKind::UnexpectedCharacter,
            &messages::INVALID_CHARACTER,
            &["#"],
        )
    }

    fn scan_identifier(&mut self) -> Token<'a> {
        self.cursor.eat_identifier();
        let source = self.source;
        let text = &source[self.token_start..self.cursor.pos()];
        let kind = TokenKind::from_keyword(text).unwrap_or(TokenKind::Identifier);
        let member = matches!(
            self.lookback.prev(),
            Some(TokenKind::Dot | TokenKind::QuestionDot)
        );
        let token = self.make_token(kind, TokenFlags::NONE);
        // `a.default / 2` divides: a member name is a name whatever it spells
        if member && kind != TokenKind::Identifier {
            self.lookback.retag_prev(TokenKind::Identifier);
        }
        token
    }

    fn scan_less_than(&mut self) -> Token<'a> {
        let next = self.cursor.byte_at(1);
        if mem::take(&mut self.type_arguments_hint) && next != Some(b'=') {
            return self.open_generic();
        }
        if matches!(next, Some(b'<' | b'=')) {
            return self.scan_punctuator();
        }

        let site = AngleSite {
            cursor: self.cursor,
            lookback: self.lookback,
            top: self.contexts.top(),
            dialect: self.options.dialect,
        };
        match classify_angle(&site) {
            AngleRole::TypeArguments => self.open_generic(),
            AngleRole::JsxElement => {
                self.contexts.push(Context::JsxTag { closing: false });
                self.punctuation(TokenKind::JsxTagOpen, 1)
            }
            AngleRole::UnmatchedClose => {
                debug!(at = self.token_start, "closing tag without an open element");
                self.report(
                    DiagnosticKind::AmbiguousAngleFallback,
                    &messages::CLOSING_TAG_WITHOUT_OPEN_ELEMENT,
                    &[],
                    TextSpan::new(self.token_start as u32, 2),
                );
                let token = self.punctuation(TokenKind::LessThan, 1);
                self.no_regex_after = Some(self.last_end);
                token
            }
            AngleRole::LessThan => self.punctuation(TokenKind::LessThan, 1),
        }
    }

    fn open_generic(&mut self) -> Token<'a> {
        self.contexts.push(Context::Generic {
            start: self.token_start as u32,
        });
        self.punctuation(TokenKind::GenericOpen, 1)
    }

    /// Inside a type-argument list every `>` closes exactly one level, so
    /// `>>` in `A<B<C>>` comes out as two `GenericClose` tokens.
    fn scan_greater_than(&mut self) -> Token<'a> {
        if !self.contexts.top().is_some_and(Context::is_generic) {
            return self.scan_punctuator();
        }
        self.contexts.pop();
        self.cursor.advance(1);
        let splits_run = self.cursor.byte_at(0) == Some(b'>')
            && self.contexts.top().is_some_and(Context::is_generic);
        let ends_run = self.lookback.prev() == Some(TokenKind::GenericClose)
            && self.last_end == self.token_start;
        let flags = if splits_run || ends_run {
            TokenFlags::SPLIT_ANGLE
        } else {
            TokenFlags::NONE
        };
        self.make_token(TokenKind::GenericClose, flags)
    }

    fn scan_closer(&mut self, ch: char) -> Token<'a> {
        self.abandon_generics(ch);
        let top = self.contexts.top();
        match ch {
            ')' => {
                if top == Some(Context::Paren) {
                    self.contexts.pop();
                }
                self.punctuation(TokenKind::CloseParen, 1)
            }
            ']' => {
                if top == Some(Context::Bracket) {
                    self.contexts.pop();
                }
                self.punctuation(TokenKind::CloseBracket, 1)
            }
            _ => match top {
                Some(Context::TemplateHole) => {
                    self.contexts.pop();
                    self.cursor.advance(1);
                    self.scan_template(TokenKind::TemplateTail, TokenKind::TemplateMiddle)
                }
                Some(Context::Brace | Context::JsxExpression) => {
                    self.contexts.pop();
                    self.punctuation(TokenKind::CloseBrace, 1)
                }
                _ => self.punctuation(TokenKind::CloseBrace, 1),
            },
        }
    }

    /// A `;` or closing bracket cannot appear inside a type-argument list:
    /// the `<` that opened it was a comparison after all.
    fn abandon_generics(&mut self, at: char) {
        if let Some((dropped, start)) = self.contexts.pop_generics() {
            debug!(dropped, start, %at, "abandoning type argument list");
            let at = at.to_string();
            self.report(
                DiagnosticKind::AmbiguousAngleFallback,
                &messages::UNCLOSED_0_ABANDONED_AT_1,
                &["type argument list", &at],
                TextSpan::new(self.token_start as u32, 1),
            );
        }
    }

    // ========================================================================
    // JSX
    // ========================================================================

    /// Scan inside `<name ...>`. Returns `None` for anything that scans the
    /// same as in code (whitespace, comments, `=`, `.`).
    fn scan_jsx_tag_token(&mut self, closing: bool) -> Option<Token<'a>> {
        let ch = self.cursor.peek()?;
        let token = match ch {
            '>' => {
                self.contexts.pop();
                if !closing {
                    self.contexts.push(Context::JsxChildren);
                }
                self.punctuation(TokenKind::JsxTagEnd, 1)
            }
            '/' if self.cursor.byte_at(1) == Some(b'>') => {
                self.contexts.pop();
                self.punctuation(TokenKind::JsxSelfClose, 2)
            }
            '{' => {
                self.contexts.push(Context::JsxExpression);
                self.punctuation(TokenKind::OpenBrace, 1)
            }
            '"' | '\'' => {
                if self.cursor.eat_jsx_attribute_string(ch as u8) {
                    self.make_token(TokenKind::StringLiteral, TokenFlags::NONE)
                } else {
                    self.invalid(
                        DiagnosticKind::UnterminatedLiteral,
                        &messages::UNTERMINATED_STRING_LITERAL,
                        &[],
                    )
                }
            }
            '<' if self.is_component_type_arguments() => self.open_generic(),
            ';' | ')' | ']' | '}' => {
                self.abandon_jsx_tag(ch);
                return None;
            }
            ch if is_identifier_start(ch) => {
                self.cursor.eat_jsx_identifier();
                self.make_token(TokenKind::Identifier, TokenFlags::NONE)
            }
            _ => return None,
        };
        Some(token)
    }

    /// `<List<number> ...>` and `<ui.List<number> ...>`.
    fn is_component_type_arguments(&self) -> bool {
        self.lookback.prev() == Some(TokenKind::Identifier)
            && matches!(
                self.lookback.prev2(),
                Some(TokenKind::JsxTagOpen | TokenKind::Dot)
            )
    }

    fn abandon_jsx_tag(&mut self, at: char) {
        self.contexts.pop();
        debug!(%at, "abandoning JSX tag");
        let at = at.to_string();
        self.report(
            DiagnosticKind::AmbiguousAngleFallback,
            &messages::UNCLOSED_0_ABANDONED_AT_1,
            &["JSX tag", &at],
            TextSpan::new(self.token_start as u32, 1),
        );
    }

    /// Scan between an opening tag and its closing tag.
    fn scan_jsx_child(&mut self) -> Token<'a> {
        match (self.cursor.byte_at(0), self.cursor.byte_at(1)) {
            (Some(b'{'), _) => {
                self.contexts.push(Context::JsxExpression);
                self.punctuation(TokenKind::OpenBrace, 1)
            }
            (Some(b'<'), Some(b'/')) => {
                self.contexts.pop();
                self.contexts.push(Context::JsxTag { closing: true });
                self.punctuation(TokenKind::JsxTagClose, 2)
            }
            (Some(b'<'), _) => {
                self.contexts.push(Context::JsxTag { closing: false });
                self.punctuation(TokenKind::JsxTagOpen, 1)
            }
            _ => {
                let rest = self.cursor.rest().as_bytes();
                let len = memchr::memchr2(b'{', b'<', rest).unwrap_or(rest.len());
                self.cursor.advance(len);
                let source = self.source;
                let text = &source[self.token_start..self.cursor.pos()];
                let kind = if text.chars().all(is_white_space_like) {
                    TokenKind::JsxTextAllWhiteSpaces
                } else {
                    TokenKind::JsxText
                };
                self.make_token(kind, TokenFlags::NONE)
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    /// Every token up to and including a single EOF, then `None`.
    fn next(&mut self) -> Option<Token<'a>> {
        if self.exhausted {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::EndOfFile {
            self.exhausted = true;
        }
        Some(token)
    }
}

impl FusedIterator for Scanner<'_> {}
