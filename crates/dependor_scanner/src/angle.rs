//! Ambiguous-angle dispatch: what a lone `<` in code means.
//!
//! The decision uses the lookback window, the top of the context stack and,
//! where those are not enough, a bounded probe that looks ahead over raw
//! characters without touching scanner state.

use crate::char_codes::*;
use crate::context::{ends_expression, is_identifier_like, Context, Lookback};
use crate::cursor::{Cursor, TemplateEnd};
use crate::options::Dialect;
use dependor_syntax::TokenKind;

/// Most tokens the probe will look at before giving up.
pub(crate) const MAX_PROBE_TOKENS: usize = 256;

/// What a `<` opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AngleRole {
    /// `GenericOpen`, pushing a `Generic` context.
    TypeArguments,
    /// `JsxTagOpen`, pushing a `JsxTag` context.
    JsxElement,
    /// `</` with no element open; scanned as `<`.
    UnmatchedClose,
    /// Plain `LessThan` operator.
    LessThan,
}

/// Outcome of looking ahead for a type-argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    /// The list closed. `follow_ok` tells whether what comes next can
    /// follow type arguments.
    Closed { follow_ok: bool },
    Rejected,
}

/// Everything the classifier needs to know about a `<`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AngleSite<'a> {
    /// Positioned on the `<`.
    pub cursor: Cursor<'a>,
    pub lookback: Lookback,
    pub top: Option<Context>,
    pub dialect: Dialect,
}

pub(crate) fn classify_angle(site: &AngleSite<'_>) -> AngleRole {
    if site.top.is_some_and(Context::is_generic) {
        return AngleRole::TypeArguments;
    }

    let lookback = &site.lookback;
    match lookback.prev() {
        Some(prev) if is_identifier_like(prev) => {
            if is_declaration_head(lookback) {
                return AngleRole::TypeArguments;
            }
            match probe_type_arguments(site.cursor) {
                Probe::Closed { follow_ok: true } => AngleRole::TypeArguments,
                Probe::Closed { .. } if follows_heritage_keyword(lookback) => {
                    AngleRole::TypeArguments
                }
                _ => AngleRole::LessThan,
            }
        }
        Some(prev) if ends_expression(prev) => AngleRole::LessThan,
        _ => classify_at_expression_start(site),
    }
}

/// `interface X<`, `class X<`, `type X<`, `function f<`, `function* f<`.
fn is_declaration_head(lookback: &Lookback) -> bool {
    match lookback.prev2() {
        Some(
            TokenKind::InterfaceKeyword
            | TokenKind::ClassKeyword
            | TokenKind::TypeKeyword
            | TokenKind::FunctionKeyword,
        ) => true,
        Some(TokenKind::Asterisk) => lookback.prev3() == Some(TokenKind::FunctionKeyword),
        _ => false,
    }
}

fn follows_heritage_keyword(lookback: &Lookback) -> bool {
    matches!(
        lookback.prev2(),
        Some(TokenKind::ExtendsKeyword | TokenKind::ImplementsKeyword | TokenKind::NewKeyword)
    )
}

fn classify_at_expression_start(site: &AngleSite<'_>) -> AngleRole {
    if site.dialect == Dialect::Plain {
        return match probe_type_arguments(site.cursor) {
            Probe::Closed { .. } => AngleRole::TypeArguments,
            Probe::Rejected => AngleRole::LessThan,
        };
    }

    let mut cursor = site.cursor;
    cursor.advance(1);
    match cursor.peek() {
        Some('/') => AngleRole::UnmatchedClose,
        Some('>') => AngleRole::JsxElement,
        Some(ch) if is_identifier_start(ch) => {
            if is_arrow_type_parameters(cursor) {
                AngleRole::TypeArguments
            } else {
                AngleRole::JsxElement
            }
        }
        _ => AngleRole::LessThan,
    }
}

/// `<T,` and `<T extends X>` start arrow-function type parameters, not an
/// element. The cursor is on the first name character.
fn is_arrow_type_parameters(mut cursor: Cursor<'_>) -> bool {
    cursor.eat_identifier();
    cursor.eat_whitespace();
    if cursor.eat(b',') {
        return true;
    }
    if !cursor.rest().starts_with("extends") {
        return false;
    }
    cursor.advance("extends".len());
    if cursor.peek().is_some_and(is_identifier_part) {
        return false;
    }
    cursor.eat_whitespace();
    // `<T extends="x">` is an attribute
    cursor.byte_at(0) != Some(b'=')
}

/// Skip whitespace and comments. Returns whether a line break was crossed,
/// or `None` if a block comment runs to end of input.
fn skip_trivia(cursor: &mut Cursor<'_>) -> Option<bool> {
    let mut crossed = false;
    loop {
        match cursor.peek() {
            Some(ch) if is_white_space_single_line(ch) => cursor.eat_whitespace(),
            Some(ch) if is_line_break(ch) => {
                cursor.eat_newline();
                crossed = true;
            }
            Some('/') => match cursor.byte_at(1) {
                Some(b'/') => cursor.eat_line_comment(),
                Some(b'*') => {
                    let start = cursor.pos();
                    if !cursor.eat_block_comment() {
                        return None;
                    }
                    crossed |= cursor.text()[start..cursor.pos()].contains(is_line_break);
                }
                _ => return Some(crossed),
            },
            _ => return Some(crossed),
        }
    }
}

/// Look ahead from the `<` under the cursor for a balanced type-argument
/// list made of type-legal tokens only.
pub(crate) fn probe_type_arguments(start: Cursor<'_>) -> Probe {
    let mut cursor = start;
    cursor.advance(1);
    let mut open: Vec<u8> = vec![b'<'];

    for _ in 0..MAX_PROBE_TOKENS {
        if skip_trivia(&mut cursor).is_none() {
            return Probe::Rejected;
        }
        let Some(ch) = cursor.peek() else {
            return Probe::Rejected;
        };
        let next = cursor.byte_at(1);
        match ch {
            '\'' | '"' => {
                if !cursor.eat_string(ch) {
                    return Probe::Rejected;
                }
            }
            '`' => {
                cursor.advance(1);
                if cursor.eat_template_chunk() != TemplateEnd::Tail {
                    return Probe::Rejected;
                }
            }
            ch if is_digit(ch) => {
                cursor.eat_number();
            }
            ch if is_identifier_start(ch) => cursor.eat_identifier(),
            '<' => {
                if matches!(next, Some(b'<' | b'=')) {
                    return Probe::Rejected;
                }
                open.push(b'<');
                cursor.advance(1);
            }
            '>' => {
                cursor.advance(1);
                if open.pop() != Some(b'<') {
                    return Probe::Rejected;
                }
                if open.is_empty() {
                    // `>>`, `>=` and `>>=` right after the close are operators.
                    if matches!(cursor.byte_at(0), Some(b'>' | b'=')) {
                        return Probe::Rejected;
                    }
                    let follow_ok = can_follow_type_arguments(cursor);
                    return Probe::Closed { follow_ok };
                }
            }
            '(' | '[' | '{' => {
                open.push(ch as u8);
                cursor.advance(1);
            }
            ')' | ']' | '}' => {
                let opener = match ch {
                    ')' => b'(',
                    ']' => b'[',
                    _ => b'{',
                };
                if open.pop() != Some(opener) {
                    return Probe::Rejected;
                }
                cursor.advance(1);
            }
            ';' => {
                if open.last() != Some(&b'{') {
                    return Probe::Rejected;
                }
                cursor.advance(1);
            }
            '=' => match next {
                Some(b'>') => cursor.advance(2),
                Some(b'=') => return Probe::Rejected,
                _ => cursor.advance(1),
            },
            '&' | '|' | '-' | '+' => {
                if next == Some(ch as u8) {
                    return Probe::Rejected;
                }
                cursor.advance(1);
            }
            ',' | '.' | '?' | ':' => cursor.advance(1),
            _ => return Probe::Rejected,
        }
    }
    Probe::Rejected
}

/// Whether the token after a closed list can follow type arguments.
fn can_follow_type_arguments(mut cursor: Cursor<'_>) -> bool {
    match skip_trivia(&mut cursor) {
        Some(true) => return true,
        Some(false) => {}
        None => return false,
    }
    match cursor.byte_at(0) {
        None => true,
        Some(
            b'(' | b'`' | b')' | b']' | b',' | b';' | b'.' | b':' | b'=' | b'?' | b'{' | b'}'
            | b'|' | b'&',
        ) => true,
        Some(b'!') => cursor.byte_at(1) == Some(b'='),
        _ => false,
    }
}
