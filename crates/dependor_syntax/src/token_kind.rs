//! TokenKind enum - every kind of token the scanner emits.

use serde::Serialize;

/// The kind of a scanned token.
///
/// Variants are grouped in contiguous ranges so category checks are two
/// integer comparisons. Keep the groups intact when adding variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum TokenKind {
    Invalid,
    EndOfFile,

    // Trivia
    Whitespace,
    NewLine,
    SingleLineComment,
    MultiLineComment,
    Shebang,
    ConflictMarker,
    JsxTextAllWhiteSpaces,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    JsxText,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // JSX structure
    JsxTagOpen,
    JsxTagClose,
    JsxSelfClose,
    JsxTagEnd,

    // Type argument / type parameter brackets
    GenericOpen,
    GenericClose,

    // Punctuation
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Dot,
    DotDotDot,
    Semicolon,
    Comma,
    QuestionDot,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    EqualsEquals,
    ExclamationEquals,
    EqualsEqualsEquals,
    ExclamationEqualsEquals,
    EqualsGreaterThan,
    Plus,
    Minus,
    Asterisk,
    AsteriskAsterisk,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    LessThanLessThan,
    GreaterThanGreaterThan,
    GreaterThanGreaterThanGreaterThan,
    Ampersand,
    Bar,
    Caret,
    Exclamation,
    Tilde,
    AmpersandAmpersand,
    BarBar,
    Question,
    Colon,
    At,
    QuestionQuestion,

    // Assignments
    Equals,
    PlusEquals,
    MinusEquals,
    AsteriskEquals,
    AsteriskAsteriskEquals,
    SlashEquals,
    PercentEquals,
    LessThanLessThanEquals,
    GreaterThanGreaterThanEquals,
    GreaterThanGreaterThanGreaterThanEquals,
    AmpersandEquals,
    BarEquals,
    CaretEquals,
    BarBarEquals,
    AmpersandAmpersandEquals,
    QuestionQuestionEquals,

    // Identifiers
    Identifier,
    PrivateIdentifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Strict mode reserved words
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AsKeyword,
    AssertsKeyword,
    AssertKeyword,
    AnyKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    InferKeyword,
    IntrinsicKeyword,
    IsKeyword,
    KeyOfKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    OutKeyword,
    ReadonlyKeyword,
    NumberKeyword,
    ObjectKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    UsingKeyword,
    FromKeyword,
    GlobalKeyword,
    BigIntKeyword,
    OverrideKeyword,
    OfKeyword,
}

impl TokenKind {
    pub const FIRST_TRIVIA: TokenKind = TokenKind::Whitespace;
    pub const LAST_TRIVIA: TokenKind = TokenKind::JsxTextAllWhiteSpaces;
    pub const FIRST_LITERAL: TokenKind = TokenKind::NumericLiteral;
    pub const LAST_LITERAL: TokenKind = TokenKind::TemplateTail;
    pub const FIRST_TEMPLATE: TokenKind = TokenKind::NoSubstitutionTemplateLiteral;
    pub const LAST_TEMPLATE: TokenKind = TokenKind::TemplateTail;
    pub const FIRST_JSX: TokenKind = TokenKind::JsxTagOpen;
    pub const LAST_JSX: TokenKind = TokenKind::JsxTagEnd;
    pub const FIRST_PUNCTUATION: TokenKind = TokenKind::OpenBrace;
    pub const LAST_PUNCTUATION: TokenKind = TokenKind::QuestionQuestionEquals;
    pub const FIRST_ASSIGNMENT: TokenKind = TokenKind::Equals;
    pub const LAST_ASSIGNMENT: TokenKind = TokenKind::QuestionQuestionEquals;
    pub const FIRST_KEYWORD: TokenKind = TokenKind::BreakKeyword;
    pub const LAST_KEYWORD: TokenKind = TokenKind::OfKeyword;
    pub const FIRST_RESERVED_WORD: TokenKind = TokenKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: TokenKind = TokenKind::WithKeyword;

    #[inline]
    fn in_range(self, first: TokenKind, last: TokenKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    /// Whether this kind represents a keyword (reserved, strict or contextual).
    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Whether this kind is a reserved word that can never be an identifier.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        self.in_range(Self::FIRST_RESERVED_WORD, Self::LAST_RESERVED_WORD)
    }

    /// Whether this kind represents a punctuation token.
    ///
    /// `GenericOpen`/`GenericClose` and the JSX structure kinds are not
    /// included; they are classified by context, not by spelling.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    /// Whether this kind represents a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        self.in_range(Self::FIRST_LITERAL, Self::LAST_LITERAL)
    }

    /// Whether this kind represents a template token.
    #[inline]
    pub fn is_template(self) -> bool {
        self.in_range(Self::FIRST_TEMPLATE, Self::LAST_TEMPLATE)
    }

    /// Whether this kind represents trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.in_range(Self::FIRST_TRIVIA, Self::LAST_TRIVIA)
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::SingleLineComment | TokenKind::MultiLineComment)
    }

    /// Whether this kind is one of the JSX tag delimiters.
    #[inline]
    pub fn is_jsx_tag(self) -> bool {
        self.in_range(Self::FIRST_JSX, Self::LAST_JSX)
    }

    /// Whether this kind represents an assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.in_range(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    /// Identifiers and every keyword: anything usable as a property name.
    #[inline]
    pub fn is_identifier_or_keyword(self) -> bool {
        self == TokenKind::Identifier || self.is_keyword()
    }

    /// The fixed spelling of this kind, if it has one.
    pub fn text(self) -> Option<&'static str> {
        self.keyword_text().or_else(|| self.punctuation_text())
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    /// Look up a keyword TokenKind from text.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        // Every keyword is 2..=11 lowercase ASCII letters.
        if !(2..=11).contains(&text.len()) || !text.as_bytes()[0].is_ascii_lowercase() {
            return None;
        }
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == text)
            .map(|(_, kind)| *kind)
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            TokenKind::OpenBrace => Some("{"),
            TokenKind::CloseBrace => Some("}"),
            TokenKind::OpenParen => Some("("),
            TokenKind::CloseParen => Some(")"),
            TokenKind::OpenBracket => Some("["),
            TokenKind::CloseBracket => Some("]"),
            TokenKind::Dot => Some("."),
            TokenKind::DotDotDot => Some("..."),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Comma => Some(","),
            TokenKind::QuestionDot => Some("?."),
            TokenKind::LessThan => Some("<"),
            TokenKind::GreaterThan => Some(">"),
            TokenKind::LessThanEquals => Some("<="),
            TokenKind::GreaterThanEquals => Some(">="),
            TokenKind::EqualsEquals => Some("=="),
            TokenKind::ExclamationEquals => Some("!="),
            TokenKind::EqualsEqualsEquals => Some("==="),
            TokenKind::ExclamationEqualsEquals => Some("!=="),
            TokenKind::EqualsGreaterThan => Some("=>"),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Asterisk => Some("*"),
            TokenKind::AsteriskAsterisk => Some("**"),
            TokenKind::Slash => Some("/"),
            TokenKind::Percent => Some("%"),
            TokenKind::PlusPlus => Some("++"),
            TokenKind::MinusMinus => Some("--"),
            TokenKind::LessThanLessThan => Some("<<"),
            TokenKind::GreaterThanGreaterThan => Some(">>"),
            TokenKind::GreaterThanGreaterThanGreaterThan => Some(">>>"),
            TokenKind::Ampersand => Some("&"),
            TokenKind::Bar => Some("|"),
            TokenKind::Caret => Some("^"),
            TokenKind::Exclamation => Some("!"),
            TokenKind::Tilde => Some("~"),
            TokenKind::AmpersandAmpersand => Some("&&"),
            TokenKind::BarBar => Some("||"),
            TokenKind::Question => Some("?"),
            TokenKind::Colon => Some(":"),
            TokenKind::At => Some("@"),
            TokenKind::QuestionQuestion => Some("??"),
            TokenKind::Equals => Some("="),
            TokenKind::PlusEquals => Some("+="),
            TokenKind::MinusEquals => Some("-="),
            TokenKind::AsteriskEquals => Some("*="),
            TokenKind::AsteriskAsteriskEquals => Some("**="),
            TokenKind::SlashEquals => Some("/="),
            TokenKind::PercentEquals => Some("%="),
            TokenKind::LessThanLessThanEquals => Some("<<="),
            TokenKind::GreaterThanGreaterThanEquals => Some(">>="),
            TokenKind::GreaterThanGreaterThanGreaterThanEquals => Some(">>>="),
            TokenKind::AmpersandEquals => Some("&="),
            TokenKind::BarEquals => Some("|="),
            TokenKind::CaretEquals => Some("^="),
            TokenKind::BarBarEquals => Some("||="),
            TokenKind::AmpersandAmpersandEquals => Some("&&="),
            TokenKind::QuestionQuestionEquals => Some("??="),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The closed keyword table, in declaration order.
static KEYWORDS: &[(&str, TokenKind)] = &[
    ("break", TokenKind::BreakKeyword),
    ("case", TokenKind::CaseKeyword),
    ("catch", TokenKind::CatchKeyword),
    ("class", TokenKind::ClassKeyword),
    ("const", TokenKind::ConstKeyword),
    ("continue", TokenKind::ContinueKeyword),
    ("debugger", TokenKind::DebuggerKeyword),
    ("default", TokenKind::DefaultKeyword),
    ("delete", TokenKind::DeleteKeyword),
    ("do", TokenKind::DoKeyword),
    ("else", TokenKind::ElseKeyword),
    ("enum", TokenKind::EnumKeyword),
    ("export", TokenKind::ExportKeyword),
    ("extends", TokenKind::ExtendsKeyword),
    ("false", TokenKind::FalseKeyword),
    ("finally", TokenKind::FinallyKeyword),
    ("for", TokenKind::ForKeyword),
    ("function", TokenKind::FunctionKeyword),
    ("if", TokenKind::IfKeyword),
    ("import", TokenKind::ImportKeyword),
    ("in", TokenKind::InKeyword),
    ("instanceof", TokenKind::InstanceOfKeyword),
    ("new", TokenKind::NewKeyword),
    ("null", TokenKind::NullKeyword),
    ("return", TokenKind::ReturnKeyword),
    ("super", TokenKind::SuperKeyword),
    ("switch", TokenKind::SwitchKeyword),
    ("this", TokenKind::ThisKeyword),
    ("throw", TokenKind::ThrowKeyword),
    ("true", TokenKind::TrueKeyword),
    ("try", TokenKind::TryKeyword),
    ("typeof", TokenKind::TypeOfKeyword),
    ("var", TokenKind::VarKeyword),
    ("void", TokenKind::VoidKeyword),
    ("while", TokenKind::WhileKeyword),
    ("with", TokenKind::WithKeyword),
    ("implements", TokenKind::ImplementsKeyword),
    ("interface", TokenKind::InterfaceKeyword),
    ("let", TokenKind::LetKeyword),
    ("package", TokenKind::PackageKeyword),
    ("private", TokenKind::PrivateKeyword),
    ("protected", TokenKind::ProtectedKeyword),
    ("public", TokenKind::PublicKeyword),
    ("static", TokenKind::StaticKeyword),
    ("yield", TokenKind::YieldKeyword),
    ("abstract", TokenKind::AbstractKeyword),
    ("accessor", TokenKind::AccessorKeyword),
    ("as", TokenKind::AsKeyword),
    ("asserts", TokenKind::AssertsKeyword),
    ("assert", TokenKind::AssertKeyword),
    ("any", TokenKind::AnyKeyword),
    ("async", TokenKind::AsyncKeyword),
    ("await", TokenKind::AwaitKeyword),
    ("boolean", TokenKind::BooleanKeyword),
    ("constructor", TokenKind::ConstructorKeyword),
    ("declare", TokenKind::DeclareKeyword),
    ("get", TokenKind::GetKeyword),
    ("infer", TokenKind::InferKeyword),
    ("intrinsic", TokenKind::IntrinsicKeyword),
    ("is", TokenKind::IsKeyword),
    ("keyof", TokenKind::KeyOfKeyword),
    ("module", TokenKind::ModuleKeyword),
    ("namespace", TokenKind::NamespaceKeyword),
    ("never", TokenKind::NeverKeyword),
    ("out", TokenKind::OutKeyword),
    ("readonly", TokenKind::ReadonlyKeyword),
    ("number", TokenKind::NumberKeyword),
    ("object", TokenKind::ObjectKeyword),
    ("satisfies", TokenKind::SatisfiesKeyword),
    ("set", TokenKind::SetKeyword),
    ("string", TokenKind::StringKeyword),
    ("symbol", TokenKind::SymbolKeyword),
    ("type", TokenKind::TypeKeyword),
    ("undefined", TokenKind::UndefinedKeyword),
    ("unique", TokenKind::UniqueKeyword),
    ("unknown", TokenKind::UnknownKeyword),
    ("using", TokenKind::UsingKeyword),
    ("from", TokenKind::FromKeyword),
    ("global", TokenKind::GlobalKeyword),
    ("bigint", TokenKind::BigIntKeyword),
    ("override", TokenKind::OverrideKeyword),
    ("of", TokenKind::OfKeyword),
];
