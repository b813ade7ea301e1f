//! Raw lexical primitives over a byte offset into the source.
//!
//! A `Cursor` knows nothing about contexts or lookback. It is `Copy` so the
//! angle probe can run a throwaway cursor ahead of the real one.

use crate::char_codes::*;
use dependor_syntax::{TokenFlags, TokenKind};
use memchr::memmem;

const CONFLICT_MARKER_LENGTH: usize = 7;

/// How a template chunk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TemplateEnd {
    /// Closing backtick consumed.
    Tail,
    /// `${` consumed.
    Hole,
    Unterminated,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    #[cfg(test)]
    pub fn at(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The character at the current position.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The byte `offset` bytes past the current position.
    #[inline]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Skip `n` bytes. Only call with lengths of already inspected ASCII runs.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }

    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.byte_at(0) == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Whether the cursor sits at the start of a line.
    pub fn at_line_start(&self) -> bool {
        self.text[..self.pos]
            .chars()
            .next_back()
            .map_or(true, is_line_break)
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Consume one line break; `\r\n` counts as one.
    pub fn eat_newline(&mut self) -> bool {
        match self.peek() {
            Some(CARRIAGE_RETURN) => {
                self.pos += 1;
                self.eat(b'\n');
                true
            }
            Some(ch) if is_line_break(ch) => {
                self.pos += ch.len_utf8();
                true
            }
            _ => false,
        }
    }

    pub fn eat_whitespace(&mut self) {
        self.eat_while(is_white_space_single_line);
    }

    /// Consume `//...` up to (not including) the line break.
    pub fn eat_line_comment(&mut self) {
        self.advance(2);
        self.eat_while(|ch| !is_line_break(ch));
    }

    /// Consume `/* ... */`. Returns false if the comment runs to end of input.
    pub fn eat_block_comment(&mut self) -> bool {
        let body = &self.text.as_bytes()[self.pos + 2..];
        match memmem::find(body, b"*/") {
            Some(i) => {
                self.pos += 2 + i + 2;
                true
            }
            None => {
                self.pos = self.text.len();
                false
            }
        }
    }

    /// `#!...` at the very start of the file.
    pub fn is_shebang(&self) -> bool {
        self.pos == 0 && self.rest().starts_with("#!")
    }

    pub fn eat_shebang(&mut self) {
        self.advance(2);
        self.eat_while(|ch| !is_line_break(ch));
    }

    /// Seven `<`, `=`, `>` or `|` at the start of a line.
    pub fn is_conflict_marker(&self) -> bool {
        let bytes = self.rest().as_bytes();
        let Some(&first) = bytes.first() else {
            return false;
        };
        matches!(first, b'<' | b'=' | b'>' | b'|')
            && bytes.len() >= CONFLICT_MARKER_LENGTH
            && bytes[..CONFLICT_MARKER_LENGTH].iter().all(|&b| b == first)
            && bytes.get(CONFLICT_MARKER_LENGTH) != Some(&first)
            && self.at_line_start()
    }

    pub fn eat_conflict_marker(&mut self) {
        self.advance(CONFLICT_MARKER_LENGTH);
        self.eat_while(|ch| !is_line_break(ch));
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Consume a quoted string. An unescaped line break ends it unterminated,
    /// without consuming the break.
    pub fn eat_string(&mut self, quote: char) -> bool {
        self.bump();
        loop {
            match self.peek() {
                None => return false,
                Some(ch) if ch == quote => {
                    self.pos += 1;
                    return true;
                }
                Some('\\') => {
                    self.pos += 1;
                    if !self.eat_newline() {
                        self.bump();
                    }
                }
                Some(ch) if is_line_break(ch) => return false,
                Some(ch) => self.pos += ch.len_utf8(),
            }
        }
    }

    /// JSX attribute strings have no escapes and may span lines.
    pub fn eat_jsx_attribute_string(&mut self, quote: u8) -> bool {
        self.pos += 1;
        match memchr::memchr(quote, self.rest().as_bytes()) {
            Some(i) => {
                self.pos += i + 1;
                true
            }
            None => {
                self.pos = self.text.len();
                false
            }
        }
    }

    /// Consume template characters after a backtick or a hole-closing `}`.
    pub fn eat_template_chunk(&mut self) -> TemplateEnd {
        loop {
            let rest = self.rest().as_bytes();
            let Some(i) = memchr::memchr3(b'`', b'$', b'\\', rest) else {
                self.pos = self.text.len();
                return TemplateEnd::Unterminated;
            };
            self.pos += i + 1;
            match rest[i] {
                b'`' => return TemplateEnd::Tail,
                b'$' => {
                    if self.eat(b'{') {
                        return TemplateEnd::Hole;
                    }
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Scan a numeric literal starting at a digit or at `.digit`.
    pub fn eat_number(&mut self) -> (TokenKind, TokenFlags) {
        let mut flags = TokenFlags::NONE;
        if self.byte_at(0) == Some(b'0') {
            let radix = match self.byte_at(1) {
                Some(b'x' | b'X') => Some((TokenFlags::HEX_SPECIFIER, is_hex_digit as fn(char) -> bool)),
                Some(b'b' | b'B') => Some((TokenFlags::BINARY_SPECIFIER, is_binary_digit as fn(char) -> bool)),
                Some(b'o' | b'O') => Some((TokenFlags::OCTAL_SPECIFIER, is_octal_digit as fn(char) -> bool)),
                _ => None,
            };
            if let Some((specifier, is_radix_digit)) = radix {
                self.advance(2);
                flags |= specifier;
                self.eat_digits(is_radix_digit, &mut flags);
                return (self.eat_bigint_suffix(), flags);
            }
        }

        self.eat_digits(is_digit, &mut flags);
        let mut fractional = false;
        if self.eat(b'.') {
            fractional = true;
            self.eat_digits(is_digit, &mut flags);
        }

        // Exponent only when digits follow, so `1em` stays `1` `em`
        if matches!(self.byte_at(0), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.byte_at(1), Some(b'+' | b'-')));
            if self.byte_at(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                self.advance(1 + sign);
                flags |= TokenFlags::SCIENTIFIC;
                self.eat_digits(is_digit, &mut flags);
            }
        }

        if fractional || flags.contains(TokenFlags::SCIENTIFIC) {
            return (TokenKind::NumericLiteral, flags);
        }
        (self.eat_bigint_suffix(), flags)
    }

    fn eat_digits(&mut self, is_valid_digit: fn(char) -> bool, flags: &mut TokenFlags) {
        while let Some(b) = self.byte_at(0) {
            if b == b'_' {
                *flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else if !is_valid_digit(char::from(b)) {
                break;
            }
            self.pos += 1;
        }
    }

    fn eat_bigint_suffix(&mut self) -> TokenKind {
        if self.eat(b'n') {
            TokenKind::BigIntLiteral
        } else {
            TokenKind::NumericLiteral
        }
    }

    /// Consume a regular expression body and its flags, starting at `/`.
    /// A line break or end of input before the closing `/` leaves it
    /// unterminated; the break itself is not consumed.
    pub fn eat_regex(&mut self) -> bool {
        self.pos += 1;
        let mut in_class = false;
        loop {
            match self.peek() {
                None => return false,
                Some(ch) if is_line_break(ch) => return false,
                Some('\\') => {
                    self.pos += 1;
                    if self.peek().is_some_and(|ch| !is_line_break(ch)) {
                        self.bump();
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.pos += 1;
                }
                Some(']') => {
                    in_class = false;
                    self.pos += 1;
                }
                Some('/') if !in_class => {
                    self.pos += 1;
                    self.eat_while(is_identifier_part);
                    return true;
                }
                Some(ch) => self.pos += ch.len_utf8(),
            }
        }
    }

    // ========================================================================
    // Names and punctuation
    // ========================================================================

    pub fn eat_identifier(&mut self) {
        self.bump();
        self.eat_while(is_identifier_part);
    }

    /// JSX tag and attribute names may contain `-`.
    pub fn eat_jsx_identifier(&mut self) {
        self.bump();
        self.eat_while(|ch| is_identifier_part(ch) || ch == '-');
    }

    /// Maximal-munch punctuator at the cursor.
    pub fn eat_punctuator(&mut self) -> Option<TokenKind> {
        use TokenKind::*;

        let b = |i: usize| self.byte_at(i);
        let (len, kind) = match b(0)? {
            b'{' => (1, OpenBrace),
            b'}' => (1, CloseBrace),
            b'(' => (1, OpenParen),
            b')' => (1, CloseParen),
            b'[' => (1, OpenBracket),
            b']' => (1, CloseBracket),
            b';' => (1, Semicolon),
            b',' => (1, Comma),
            b'~' => (1, Tilde),
            b'@' => (1, At),
            b':' => (1, Colon),
            b'.' => match (b(1), b(2)) {
                (Some(b'.'), Some(b'.')) => (3, DotDotDot),
                _ => (1, Dot),
            },
            b'?' => match (b(1), b(2)) {
                (Some(b'?'), Some(b'=')) => (3, QuestionQuestionEquals),
                (Some(b'?'), _) => (2, QuestionQuestion),
                // `a?.5:b` is a conditional, not optional chaining
                (Some(b'.'), next) if !next.is_some_and(|c| c.is_ascii_digit()) => (2, QuestionDot),
                _ => (1, Question),
            },
            b'<' => match (b(1), b(2)) {
                (Some(b'<'), Some(b'=')) => (3, LessThanLessThanEquals),
                (Some(b'<'), _) => (2, LessThanLessThan),
                (Some(b'='), _) => (2, LessThanEquals),
                _ => (1, LessThan),
            },
            b'>' => match (b(1), b(2), b(3)) {
                (Some(b'>'), Some(b'>'), Some(b'=')) => (4, GreaterThanGreaterThanGreaterThanEquals),
                (Some(b'>'), Some(b'>'), _) => (3, GreaterThanGreaterThanGreaterThan),
                (Some(b'>'), Some(b'='), _) => (3, GreaterThanGreaterThanEquals),
                (Some(b'>'), _, _) => (2, GreaterThanGreaterThan),
                (Some(b'='), _, _) => (2, GreaterThanEquals),
                _ => (1, GreaterThan),
            },
            b'=' => match (b(1), b(2)) {
                (Some(b'='), Some(b'=')) => (3, EqualsEqualsEquals),
                (Some(b'='), _) => (2, EqualsEquals),
                (Some(b'>'), _) => (2, EqualsGreaterThan),
                _ => (1, Equals),
            },
            b'!' => match (b(1), b(2)) {
                (Some(b'='), Some(b'=')) => (3, ExclamationEqualsEquals),
                (Some(b'='), _) => (2, ExclamationEquals),
                _ => (1, Exclamation),
            },
            b'+' => match b(1) {
                Some(b'+') => (2, PlusPlus),
                Some(b'=') => (2, PlusEquals),
                _ => (1, Plus),
            },
            b'-' => match b(1) {
                Some(b'-') => (2, MinusMinus),
                Some(b'=') => (2, MinusEquals),
                _ => (1, Minus),
            },
            b'*' => match (b(1), b(2)) {
                (Some(b'*'), Some(b'=')) => (3, AsteriskAsteriskEquals),
                (Some(b'*'), _) => (2, AsteriskAsterisk),
                (Some(b'='), _) => (2, AsteriskEquals),
                _ => (1, Asterisk),
            },
            b'/' => match b(1) {
                Some(b'=') => (2, SlashEquals),
                _ => (1, Slash),
            },
            b'%' => match b(1) {
                Some(b'=') => (2, PercentEquals),
                _ => (1, Percent),
            },
            b'&' => match (b(1), b(2)) {
                (Some(b'&'), Some(b'=')) => (3, AmpersandAmpersandEquals),
                (Some(b'&'), _) => (2, AmpersandAmpersand),
                (Some(b'='), _) => (2, AmpersandEquals),
                _ => (1, Ampersand),
            },
            b'|' => match (b(1), b(2)) {
                (Some(b'|'), Some(b'=')) => (3, BarBarEquals),
                (Some(b'|'), _) => (2, BarBar),
                (Some(b'='), _) => (2, BarEquals),
                _ => (1, Bar),
            },
            b'^' => match b(1) {
                Some(b'=') => (2, CaretEquals),
                _ => (1, Caret),
            },
            _ => return None,
        };
        self.pos += len;
        Some(kind)
    }
}
