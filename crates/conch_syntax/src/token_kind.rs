//! TokenKind enum - all token kinds in the conch command language.

/// The kind of a lexed token.
///
/// Whitespace and newlines are real tokens, not discarded trivia: the parser
/// uses newlines as statement terminators and whitespace as the boundary of
/// path expressions and call arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// A token the lexer or parser could not make sense of.
    Unknown = 0,
    EndOfFileToken,

    // Trivia
    NewLineTrivia,
    WhitespaceTrivia,

    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,

    // Identifiers
    Identifier,

    // Punctuation
    EqualsToken,
    EqualsEqualsToken,
    GreaterThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanEqualsToken,
    LessThanToken,
    LessThanLessThanToken,
    LessThanEqualsToken,
    ExclamationToken,
    ExclamationEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    BackslashToken,
    PercentToken,
    AmpersandToken,
    AmpersandAmpersandToken,
    BarToken,
    BarBarToken,
    CaretToken,
    TildeToken,
    DotToken,
    ColonToken,
    SemicolonToken,
    DollarToken,
}

impl TokenKind {
    /// Whether this kind is whitespace or a newline.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::NewLineTrivia | TokenKind::WhitespaceTrivia)
    }

    /// Whether this kind terminates a statement.
    #[inline]
    pub fn is_statement_terminator(self) -> bool {
        matches!(
            self,
            TokenKind::NewLineTrivia | TokenKind::SemicolonToken | TokenKind::EndOfFileToken
        )
    }

    /// A short human-readable description, used in diagnostics.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::Unknown => "bad token",
            TokenKind::EndOfFileToken => "end of input",
            TokenKind::NewLineTrivia => "newline",
            TokenKind::WhitespaceTrivia => "whitespace",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::EqualsToken => "'='",
            TokenKind::EqualsEqualsToken => "'=='",
            TokenKind::GreaterThanToken => "'>'",
            TokenKind::GreaterThanGreaterThanToken => "'>>'",
            TokenKind::GreaterThanEqualsToken => "'>='",
            TokenKind::LessThanToken => "'<'",
            TokenKind::LessThanLessThanToken => "'<<'",
            TokenKind::LessThanEqualsToken => "'<='",
            TokenKind::ExclamationToken => "'!'",
            TokenKind::ExclamationEqualsToken => "'!='",
            TokenKind::PlusToken => "'+'",
            TokenKind::MinusToken => "'-'",
            TokenKind::AsteriskToken => "'*'",
            TokenKind::SlashToken => "'/'",
            TokenKind::BackslashToken => "'\\'",
            TokenKind::PercentToken => "'%'",
            TokenKind::AmpersandToken => "'&'",
            TokenKind::AmpersandAmpersandToken => "'&&'",
            TokenKind::BarToken => "'|'",
            TokenKind::BarBarToken => "'||'",
            TokenKind::CaretToken => "'^'",
            TokenKind::TildeToken => "'~'",
            TokenKind::DotToken => "'.'",
            TokenKind::ColonToken => "':'",
            TokenKind::SemicolonToken => "';'",
            TokenKind::DollarToken => "'$'",
        }
    }
}
