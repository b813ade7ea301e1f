//! Scanner integration tests.

use dependor_scanner::{
    tokenize, Context, Dialect, DiagnosticKind, Scanner, ScannerOptions, Token, TokenFlags,
    TokenKind,
};

fn jsx() -> ScannerOptions {
    ScannerOptions::default().with_dialect(Dialect::Jsx)
}

fn scan_with(source: &str, options: ScannerOptions) -> Vec<Token<'_>> {
    Scanner::new(source, options)
        .unwrap()
        .filter(|t| t.kind != TokenKind::EndOfFile)
        .collect()
}

/// Helper: scan all significant tokens, excluding EOF.
fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
    scan_with(source, ScannerOptions::default())
        .into_iter()
        .map(|t| (t.kind, t.text.to_string()))
        .collect()
}

fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

fn scan_jsx_kinds(source: &str) -> Vec<TokenKind> {
    scan_with(source, jsx()).into_iter().map(|t| t.kind).collect()
}

fn count(tokens: &[Token<'_>], kind: TokenKind) -> usize {
    tokens.iter().filter(|t| t.kind == kind).count()
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_empty_source() {
    let tokens: Vec<_> = Scanner::new("", ScannerOptions::default()).unwrap().collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EndOfFile);
    assert_eq!((tokens[0].start, tokens[0].end), (0, 0));
}

#[test]
fn test_whitespace_only_has_no_significant_tokens() {
    assert!(scan_all("   \n\t  \r\n").is_empty());
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        scan_kinds("const foo = class"),
        vec![
            TokenKind::ConstKeyword,
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::ClassKeyword,
        ]
    );
    assert_eq!(scan_kinds("$el _x café"), vec![TokenKind::Identifier; 3]);
}

#[test]
fn test_require_is_an_identifier() {
    let tokens = scan_with("const require = 1; require < 2;", ScannerOptions::default());
    let requires: Vec<_> = tokens.iter().filter(|t| t.text == "require").collect();
    assert_eq!(requires.len(), 2);
    assert!(requires.iter().all(|t| t.kind == TokenKind::Identifier));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::LessThan));
}

#[test]
fn test_numeric_literals() {
    let cases = [
        ("42", TokenKind::NumericLiteral, TokenFlags::NONE),
        ("3.14", TokenKind::NumericLiteral, TokenFlags::NONE),
        (".5", TokenKind::NumericLiteral, TokenFlags::NONE),
        ("0xFF", TokenKind::NumericLiteral, TokenFlags::HEX_SPECIFIER),
        ("0b1010", TokenKind::NumericLiteral, TokenFlags::BINARY_SPECIFIER),
        ("0o77", TokenKind::NumericLiteral, TokenFlags::OCTAL_SPECIFIER),
        ("1_000_000", TokenKind::NumericLiteral, TokenFlags::CONTAINS_SEPARATOR),
        ("1e10", TokenKind::NumericLiteral, TokenFlags::SCIENTIFIC),
        ("10n", TokenKind::BigIntLiteral, TokenFlags::NONE),
    ];
    for (source, kind, flags) in cases {
        let tokens = scan_with(source, ScannerOptions::default());
        assert_eq!(tokens.len(), 1, "{source}");
        assert_eq!(tokens[0].kind, kind, "{source}");
        assert_eq!(tokens[0].flags, flags, "{source}");
        assert_eq!(tokens[0].text, source);
    }
}

#[test]
fn test_strings_keep_their_quotes() {
    let tokens = scan_all(r#"'single' "dou\"ble""#);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], (TokenKind::StringLiteral, "'single'".to_string()));
    assert_eq!(tokens[1], (TokenKind::StringLiteral, r#""dou\"ble""#.to_string()));
}

#[test]
fn test_private_identifier() {
    assert_eq!(
        scan_kinds("this.#count"),
        vec![TokenKind::ThisKeyword, TokenKind::Dot, TokenKind::PrivateIdentifier]
    );
}

#[test]
fn test_shebang_is_trivia() {
    let options = ScannerOptions::default().with_trivia(true);
    let kinds: Vec<_> = scan_with("#!/usr/bin/env node\nx", options)
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Shebang, TokenKind::NewLine, TokenKind::Identifier]
    );
    assert_eq!(scan_kinds("#!/usr/bin/env node\nx"), vec![TokenKind::Identifier]);
}

#[test]
fn test_conflict_markers_are_trivia() {
    let source = "<<<<<<< HEAD\na\n=======\nb\n>>>>>>> main\n";
    assert_eq!(scan_kinds(source), vec![TokenKind::Identifier; 2]);
    let options = ScannerOptions::default().with_trivia(true);
    let markers = scan_with(source, options)
        .into_iter()
        .filter(|t| t.kind == TokenKind::ConflictMarker)
        .map(|t| t.text)
        .collect::<Vec<_>>();
    assert_eq!(markers, vec!["<<<<<<< HEAD", "=======", ">>>>>>> main"]);
}

// ============================================================================
// Generics
// ============================================================================

#[test]
fn test_generic_with_angle_in_string() {
    let tokens = scan_all("Omit<MyComponentProps, '>'>");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Identifier, "Omit".to_string()),
            (TokenKind::GenericOpen, "<".to_string()),
            (TokenKind::Identifier, "MyComponentProps".to_string()),
            (TokenKind::Comma, ",".to_string()),
            (TokenKind::StringLiteral, "'>'".to_string()),
            (TokenKind::GenericClose, ">".to_string()),
        ]
    );
}

#[test]
fn test_generic_with_angles_in_comments() {
    let source = "/* > */Omit</* < */MyComponentProps, '>'>";
    let options = ScannerOptions::default().with_trivia(true);
    let result = tokenize(source, &options).unwrap();
    assert!(result.diagnostics.is_empty());
    let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::MultiLineComment,
            TokenKind::Identifier,
            TokenKind::GenericOpen,
            TokenKind::MultiLineComment,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Whitespace,
            TokenKind::StringLiteral,
            TokenKind::GenericClose,
            TokenKind::EndOfFile,
        ]
    );
    assert_eq!(result.text(), source);
}

#[test]
fn test_nested_generics_split_shift() {
    let tokens = scan_with("Foo<Bar<Baz>>", ScannerOptions::default());
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::GenericOpen,
            TokenKind::Identifier,
            TokenKind::GenericOpen,
            TokenKind::Identifier,
            TokenKind::GenericClose,
            TokenKind::GenericClose,
        ]
    );
    assert!(tokens[5].flags.contains(TokenFlags::SPLIT_ANGLE));
    assert!(tokens[6].flags.contains(TokenFlags::SPLIT_ANGLE));
    assert_eq!(tokens[5].text, ">");
    assert_eq!(tokens[6].start, tokens[5].end);
}

#[test]
fn test_triple_close_splits() {
    let tokens = scan_with("A<B<C<D>>>", ScannerOptions::default());
    let closes: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::GenericClose)
        .collect();
    assert_eq!(closes.len(), 3);
    assert!(closes.iter().all(|t| t.flags.contains(TokenFlags::SPLIT_ANGLE)));
}

#[test]
fn test_single_close_is_not_split() {
    let tokens = scan_with("Array<T>", ScannerOptions::default());
    assert_eq!(tokens[3].kind, TokenKind::GenericClose);
    assert!(!tokens[3].flags.contains(TokenFlags::SPLIT_ANGLE));
}

#[test]
fn test_shift_operators_outside_generics() {
    assert_eq!(
        scan_kinds("a >> b"),
        vec![TokenKind::Identifier, TokenKind::GreaterThanGreaterThan, TokenKind::Identifier]
    );
    assert_eq!(
        scan_kinds("x >>>= 1"),
        vec![
            TokenKind::Identifier,
            TokenKind::GreaterThanGreaterThanGreaterThanEquals,
            TokenKind::NumericLiteral,
        ]
    );
    assert_eq!(
        scan_kinds("a << 2"),
        vec![TokenKind::Identifier, TokenKind::LessThanLessThan, TokenKind::NumericLiteral]
    );
}

#[test]
fn test_generics_stay_balanced() {
    let sources = [
        "let m: Map<string, Array<Set<number>>> = new Map<string, Array<Set<number>>>();",
        "function id<T>(x: T): T { return x; }",
        "class Box<T extends Array<U>, U> {}",
        "type Fn = <T>(x: T) => Promise<T>;",
        "const x = foo<number>(1);",
        "Foo<Bar<Baz>>",
    ];
    for source in sources {
        let result = tokenize(source, &ScannerOptions::default()).unwrap();
        assert!(result.diagnostics.is_empty(), "{source}");
        let opens = count(&result.tokens, TokenKind::GenericOpen);
        let closes = count(&result.tokens, TokenKind::GenericClose);
        assert!(opens > 0, "{source}");
        assert_eq!(opens, closes, "{source}");
    }
}

#[test]
fn test_declaration_heads_open_generics() {
    assert_eq!(
        scan_kinds("interface X<T> {}"),
        vec![
            TokenKind::InterfaceKeyword,
            TokenKind::Identifier,
            TokenKind::GenericOpen,
            TokenKind::Identifier,
            TokenKind::GenericClose,
            TokenKind::OpenBrace,
            TokenKind::CloseBrace,
        ]
    );
    assert_eq!(
        scan_kinds("function* gen<T>() {}"),
        vec![
            TokenKind::FunctionKeyword,
            TokenKind::Asterisk,
            TokenKind::Identifier,
            TokenKind::GenericOpen,
            TokenKind::Identifier,
            TokenKind::GenericClose,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBrace,
            TokenKind::CloseBrace,
        ]
    );
}

#[test]
fn test_comparisons_are_not_generics() {
    for source in [
        "if (a < b && c > d) {}",
        "for (let i = 0; i < n; i++) {}",
        "a < b, c > d",
        "x <= y",
    ] {
        let kinds = scan_kinds(source);
        assert!(!kinds.contains(&TokenKind::GenericOpen), "{source}");
        assert!(!kinds.contains(&TokenKind::GenericClose), "{source}");
    }
    assert!(scan_kinds("if (a < b && c > d) {}").contains(&TokenKind::LessThan));
}

#[test]
fn test_comparison_followed_by_shift_or_compare() {
    let cases = [
        ("while (lo < hi >> 1) {}", TokenKind::GreaterThanGreaterThan),
        ("x = a < b >= c;", TokenKind::GreaterThanEquals),
        ("y = a < b >>= 2;", TokenKind::GreaterThanGreaterThanEquals),
    ];
    for (source, operator) in cases {
        let kinds = scan_kinds(source);
        assert!(kinds.contains(&TokenKind::LessThan), "{source}");
        assert!(kinds.contains(&operator), "{source}");
        assert!(!kinds.contains(&TokenKind::GenericOpen), "{source}");
        assert!(!kinds.contains(&TokenKind::GenericClose), "{source}");
    }
}

#[test]
fn test_hint_forces_type_arguments() {
    let mut scanner = Scanner::new("f < T > (x)", ScannerOptions::default()).unwrap();
    assert_eq!(scanner.next_token().kind, TokenKind::Identifier);
    scanner.expect_type_arguments();
    assert_eq!(scanner.next_token().kind, TokenKind::GenericOpen);
    assert_eq!(scanner.contexts(), &[Context::Generic { start: 2 }]);
    assert_eq!(scanner.next_token().kind, TokenKind::Identifier);
    assert_eq!(scanner.next_token().kind, TokenKind::GenericClose);
}

// ============================================================================
// Regular expressions and templates
// ============================================================================

#[test]
fn test_division_after_expression() {
    assert_eq!(
        scan_kinds("x = a / b / c"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
        ]
    );
    assert_eq!(
        scan_kinds("a.default / 2"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::DefaultKeyword,
            TokenKind::Slash,
            TokenKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_regex_in_expression_position() {
    let tokens = scan_all("x = /ab+c/gi.test(s)");
    assert_eq!(
        tokens[2],
        (TokenKind::RegularExpressionLiteral, "/ab+c/gi".to_string())
    );
    let tokens = scan_all("return /[/]/");
    assert_eq!(
        tokens[1],
        (TokenKind::RegularExpressionLiteral, "/[/]/".to_string())
    );
}

#[test]
fn test_template_with_substitutions() {
    let tokens = scan_all("`a${b}c${d}e`");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::TemplateHead, "`a${".to_string()),
            (TokenKind::Identifier, "b".to_string()),
            (TokenKind::TemplateMiddle, "}c${".to_string()),
            (TokenKind::Identifier, "d".to_string()),
            (TokenKind::TemplateTail, "}e`".to_string()),
        ]
    );
    assert_eq!(
        scan_kinds("`plain`"),
        vec![TokenKind::NoSubstitutionTemplateLiteral]
    );
}

#[test]
fn test_braces_inside_template_hole() {
    let tokens = scan_all("`x${ {a: 1}.a }y`");
    let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::TemplateHead,
            TokenKind::OpenBrace,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::NumericLiteral,
            TokenKind::CloseBrace,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::TemplateTail,
        ]
    );
    assert_eq!(tokens[8].1, "}y`");
}

#[test]
fn test_angles_inside_template_text() {
    let tokens = scan_with("`<div>${x}</div>`", jsx());
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].text, "`<div>${");
    assert_eq!(tokens[2].text, "}</div>`");
}

// ============================================================================
// JSX
// ============================================================================

#[test]
fn test_jsx_element_with_attributes() {
    let source = r#"const el = <div className="a">hi {name}</div>;"#;
    let tokens = scan_with(source, jsx());
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::ConstKeyword,
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::JsxTagOpen,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::StringLiteral,
            TokenKind::JsxTagEnd,
            TokenKind::JsxText,
            TokenKind::OpenBrace,
            TokenKind::Identifier,
            TokenKind::CloseBrace,
            TokenKind::JsxTagClose,
            TokenKind::Identifier,
            TokenKind::JsxTagEnd,
            TokenKind::Semicolon,
        ]
    );
    assert_eq!(tokens[9].text, "hi ");
    assert_eq!(tokens[13].text, "</");
}

#[test]
fn test_jsx_fragment_and_self_closing() {
    assert_eq!(
        scan_jsx_kinds("<><Item /></>"),
        vec![
            TokenKind::JsxTagOpen,
            TokenKind::JsxTagEnd,
            TokenKind::JsxTagOpen,
            TokenKind::Identifier,
            TokenKind::JsxSelfClose,
            TokenKind::JsxTagClose,
            TokenKind::JsxTagEnd,
        ]
    );
}

#[test]
fn test_jsx_hyphenated_attribute_names() {
    let tokens = scan_with(r#"<div data-id="1" aria-hidden />"#, jsx());
    assert_eq!(tokens[2].text, "data-id");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[5].text, "aria-hidden");
}

#[test]
fn test_jsx_text_with_apostrophe() {
    let tokens = scan_with("<p>don't</p>", jsx());
    assert_eq!(tokens[3].kind, TokenKind::JsxText);
    assert_eq!(tokens[3].text, "don't");
}

#[test]
fn test_jsx_same_inside_and_outside_expression() {
    let element = "<List<number> items={xs} />";
    let nested = format!("<div>{{{element}}}</div>");

    let slice = |tokens: Vec<Token<'_>>| -> Vec<(TokenKind, String)> {
        let start = tokens.iter().position(|t| t.text == "List").unwrap();
        let end = tokens
            .iter()
            .position(|t| t.kind == TokenKind::JsxSelfClose)
            .unwrap();
        tokens[start..=end]
            .iter()
            .map(|t| (t.kind, t.text.to_string()))
            .collect()
    };
    let outside = slice(scan_with(element, jsx()));
    let inside = slice(scan_with(&nested, jsx()));
    assert_eq!(outside, inside);
    assert_eq!(outside[1].0, TokenKind::GenericOpen);
    assert_eq!(outside[3].0, TokenKind::GenericClose);
}

#[test]
fn test_arrow_type_parameters_in_jsx_dialect() {
    let kinds = scan_jsx_kinds("const f = <T,>(x: T) => x;");
    assert_eq!(kinds[3], TokenKind::GenericOpen);
    assert!(!kinds.contains(&TokenKind::JsxTagOpen));
    let kinds = scan_jsx_kinds("const g = <T extends object>(x: T) => x;");
    assert_eq!(kinds[3], TokenKind::GenericOpen);
}

#[test]
fn test_plain_dialect_has_no_jsx() {
    let kinds = scan_kinds("x = <T>y;");
    assert!(!kinds.contains(&TokenKind::JsxTagOpen));
    assert_eq!(kinds[2], TokenKind::GenericOpen);
}

// ============================================================================
// Recovery
// ============================================================================

#[test]
fn test_unterminated_string_is_one_invalid_token() {
    let result = tokenize("'abc", &ScannerOptions::default()).unwrap();
    assert_eq!(result.tokens.len(), 2);
    let invalid = result.tokens[0];
    assert_eq!(invalid.kind, TokenKind::Invalid);
    assert_eq!(invalid.text, "'abc");
    assert!(invalid.flags.contains(TokenFlags::UNTERMINATED));
    assert_eq!(invalid.diagnostic, Some(DiagnosticKind::UnterminatedLiteral));
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnterminatedLiteral);
    assert_eq!(
        result.diagnostics[0].to_string(),
        "(1:1): error DP1002: Unterminated string literal."
    );
}

#[test]
fn test_string_stops_at_line_break() {
    let kinds = scan_kinds("'abc\nx");
    assert_eq!(kinds, vec![TokenKind::Invalid, TokenKind::Identifier]);
}

#[test]
fn test_unterminated_comment() {
    let result = tokenize("a /* b", &ScannerOptions::default()).unwrap();
    assert_eq!(result.tokens[1].kind, TokenKind::Invalid);
    assert_eq!(result.tokens[1].text, "/* b");
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnterminatedComment);
}

#[test]
fn test_unterminated_template_hole() {
    let result = tokenize("`a${b", &ScannerOptions::default()).unwrap();
    let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::TemplateHead, TokenKind::Identifier, TokenKind::EndOfFile]
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnterminatedLiteral);
}

#[test]
fn test_unexpected_character() {
    let result = tokenize("a \\ b", &ScannerOptions::default()).unwrap();
    let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Invalid,
            TokenKind::Identifier,
            TokenKind::EndOfFile,
        ]
    );
    assert!(result.tokens[1].flags.is_empty());
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnexpectedCharacter);
    assert_eq!(result.diagnostics[0].message_text, "Invalid character '\\'.");
}

#[test]
fn test_generic_abandoned_at_semicolon() {
    let mut scanner = Scanner::new("interface X<T; y", ScannerOptions::default()).unwrap();
    let tokens: Vec<_> = scanner.by_ref().collect();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::InterfaceKeyword,
            TokenKind::Identifier,
            TokenKind::GenericOpen,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::EndOfFile,
        ]
    );
    assert_eq!(tokens[4].diagnostic, Some(DiagnosticKind::AmbiguousAngleFallback));
    let diagnostics = scanner.diagnostics().diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message_text,
        "Unclosed type argument list abandoned at ';'; scanning continues as ordinary code."
    );
    assert!(!diagnostics[0].is_error());
}

#[test]
fn test_generic_abandoned_at_close_paren() {
    let result = tokenize("f(class X<T)", &ScannerOptions::default()).unwrap();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.tokens[result.tokens.len() - 2].kind,
        TokenKind::CloseParen
    );
}

#[test]
fn test_unmatched_closing_tag() {
    let result = tokenize("a = </div>", &jsx()).unwrap();
    let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::LessThan,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::GreaterThan,
            TokenKind::EndOfFile,
        ]
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, 9002);
}

#[test]
fn test_jsx_tag_abandoned_at_semicolon() {
    let mut scanner = Scanner::new("x = <a ; y", jsx()).unwrap();
    let kinds: Vec<_> = scanner.by_ref().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::JsxTagOpen,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::EndOfFile,
        ]
    );
    assert!(scanner.contexts().is_empty());
    assert_eq!(
        scanner.diagnostics().diagnostics()[0].message_text,
        "Unclosed JSX tag abandoned at ';'; scanning continues as ordinary code."
    );
}

#[test]
fn test_open_element_reported_once_at_eof() {
    let mut scanner = Scanner::new("<div>text", jsx()).unwrap();
    let kinds: Vec<_> = scanner.by_ref().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::JsxTagOpen,
            TokenKind::Identifier,
            TokenKind::JsxTagEnd,
            TokenKind::JsxText,
            TokenKind::EndOfFile,
        ]
    );
    assert_eq!(scanner.next_token().kind, TokenKind::EndOfFile);
    let diagnostics = scanner.diagnostics().diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message_text, "Unclosed JSX element at end of file.");
}

// ============================================================================
// Positions and stream properties
// ============================================================================

#[test]
fn test_positions_with_tabs_and_crlf() {
    let options = ScannerOptions::default().with_tab_width(4);
    let tokens = scan_with("a\n\tb\r\nc", options);
    let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(positions, vec![(1, 1), (2, 5), (3, 1)]);
    assert!(tokens[2].has_preceding_line_break());
}

#[test]
fn test_columns_count_characters() {
    let tokens = scan_with("é x", ScannerOptions::default());
    assert_eq!(tokens[1].column, 3);
    assert_eq!(tokens[1].start, 3);
}

#[test]
fn test_round_trip_with_trivia() {
    let sources = [
        "const x = 1;\r\n// done\n",
        "/* > */Omit</* < */MyComponentProps, '>'>",
        "`a${ {b: 1} }c` + /re/g",
        "'abc",
        "a /* b",
        "héllo \u{2028} wörld",
        "#!/bin/sh\n<<<<<<< HEAD\nx\n",
    ];
    let options = ScannerOptions::default().with_trivia(true);
    for source in sources {
        let result = tokenize(source, &options).unwrap();
        assert_eq!(result.text(), source);
        let mut offset = 0;
        for token in &result.tokens {
            assert_eq!(token.start, offset, "{source}");
            offset = token.end;
        }
        assert_eq!(offset as usize, source.len());
    }
    let result = tokenize("<p>a {b} c</p>", &jsx().with_trivia(true)).unwrap();
    assert_eq!(result.text(), "<p>a {b} c</p>");
}

#[test]
fn test_tokenizing_is_idempotent() {
    let source = "class A<T> { m(): Array<Array<T>> { return /x/.test(`${1}`) ? [] : []; } }";
    let options = ScannerOptions::default().with_trivia(true);
    let first = tokenize(source, &options).unwrap();
    let text = first.text();
    let second = tokenize(&text, &options).unwrap();
    let pairs = |tokens: &[Token<'_>]| -> Vec<(TokenKind, String)> {
        tokens.iter().map(|t| (t.kind, t.text.to_string())).collect()
    };
    assert_eq!(pairs(&first.tokens), pairs(&second.tokens));
}

#[test]
fn test_peek_past_end_returns_eof() {
    let mut scanner = Scanner::new("a", ScannerOptions::default()).unwrap();
    assert_eq!(scanner.peek(3).map(|t| t.kind), Some(TokenKind::EndOfFile));
    assert_eq!(scanner.next_token().kind, TokenKind::Identifier);
    assert_eq!(scanner.next_token().kind, TokenKind::EndOfFile);
}

#[test]
fn test_options_from_json() {
    let options = ScannerOptions::from_json(r#"{"emitTrivia":true,"dialect":"jsx"}"#).unwrap();
    let result = tokenize("<a/> ", &options).unwrap();
    let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::JsxTagOpen,
            TokenKind::Identifier,
            TokenKind::JsxSelfClose,
            TokenKind::Whitespace,
            TokenKind::EndOfFile,
        ]
    );
}
