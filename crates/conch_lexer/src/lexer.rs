//! The lexer.
//!
//! Converts submitted source text into tokens one `lex()` call at a time.
//! Lexical errors are never fatal: a bad character becomes an `Unknown`
//! token plus a diagnostic and lexing resumes at the next position. The
//! only state carried between calls is the cursor.

use conch_core::text::{Span, TextPos};
use conch_diagnostics::{messages, DiagnosticCollection};
use conch_syntax::{Token, TokenKind, TokenValue};

#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Space, tab and carriage return. `\n` is not whitespace here: it is the
/// statement terminator and gets its own token kind.
#[inline]
fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

/// The lexer converts source text into tokens.
pub struct Lexer {
    /// The file (or pseudo-file) name used for diagnostics.
    file_name: String,
    /// The source text being lexed.
    text: String,
    /// Current byte position in the text.
    pos: usize,
    /// Accumulated diagnostics, in the order they were recorded.
    diagnostics: DiagnosticCollection,
}

impl Lexer {
    /// Create a new lexer over the given source text.
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
            pos: 0,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Look at the character at the current position without advancing.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Look at the character `offset` bytes past the current position.
    /// Only ever called with offsets that land on ASCII boundaries.
    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset..).and_then(|s| s.chars().next())
    }

    /// Consume the current character and return it.
    #[inline]
    fn next_char(&mut self) -> Option<char> {
        let c = self.current_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Lex the next token and advance past it.
    ///
    /// Returns `EndOfFileToken` at the end of input; calling again keeps
    /// returning the same EOF token.
    pub fn lex(&mut self) -> Token {
        let current = match self.current_char() {
            Some(c) => c,
            None => return Token::eof(self.pos as TextPos),
        };
        let start = self.pos;

        let kind = match current {
            '=' => self.lex_one_or_two('=', TokenKind::EqualsToken, TokenKind::EqualsEqualsToken),
            '>' => {
                if self.char_at(1) == Some('=') {
                    self.pos += 2;
                    TokenKind::GreaterThanEqualsToken
                } else if self.char_at(1) == Some('>') {
                    self.pos += 2;
                    TokenKind::GreaterThanGreaterThanToken
                } else {
                    self.pos += 1;
                    TokenKind::GreaterThanToken
                }
            }
            '<' => {
                if self.char_at(1) == Some('=') {
                    self.pos += 2;
                    TokenKind::LessThanEqualsToken
                } else if self.char_at(1) == Some('<') {
                    self.pos += 2;
                    TokenKind::LessThanLessThanToken
                } else {
                    self.pos += 1;
                    TokenKind::LessThanToken
                }
            }
            '!' => self.lex_one_or_two('=', TokenKind::ExclamationToken, TokenKind::ExclamationEqualsToken),
            '&' => self.lex_one_or_two('&', TokenKind::AmpersandToken, TokenKind::AmpersandAmpersandToken),
            '|' => self.lex_one_or_two('|', TokenKind::BarToken, TokenKind::BarBarToken),
            '+' => self.lex_single(TokenKind::PlusToken),
            '-' => self.lex_single(TokenKind::MinusToken),
            '*' => self.lex_single(TokenKind::AsteriskToken),
            '%' => self.lex_single(TokenKind::PercentToken),
            '/' => self.lex_single(TokenKind::SlashToken),
            '\\' => self.lex_single(TokenKind::BackslashToken),
            '^' => self.lex_single(TokenKind::CaretToken),
            '~' => self.lex_single(TokenKind::TildeToken),
            '.' => self.lex_single(TokenKind::DotToken),
            ':' => self.lex_single(TokenKind::ColonToken),
            ';' => self.lex_single(TokenKind::SemicolonToken),
            '$' => self.lex_single(TokenKind::DollarToken),
            '\n' => self.lex_single(TokenKind::NewLineTrivia),
            '"' => return self.lex_string(start),
            c if is_digit(c) => return self.lex_number(start),
            c if is_alpha(c) => {
                self.next_char();
                while matches!(self.current_char(), Some(c) if is_alpha(c) || c == '_') {
                    self.next_char();
                }
                TokenKind::Identifier
            }
            c if is_whitespace(c) => {
                self.next_char();
                while matches!(self.current_char(), Some(c) if is_whitespace(c)) {
                    self.next_char();
                }
                TokenKind::WhitespaceTrivia
            }
            c => {
                self.next_char();
                let span = Span::new(start as TextPos, self.pos as TextPos);
                self.diagnostics.report(
                    &self.file_name,
                    span,
                    &messages::UNKNOWN_TOKEN,
                    &[&c.to_string()],
                );
                TokenKind::Unknown
            }
        };

        self.token_from(kind, start)
    }

    /// Lex a single-character token.
    #[inline]
    fn lex_single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    /// Lex a token that is doubled (or extended) when followed by `second`.
    /// The longer match always wins.
    #[inline]
    fn lex_one_or_two(&mut self, second: char, one: TokenKind, two: TokenKind) -> TokenKind {
        if self.char_at(1) == Some(second) {
            self.pos += 2;
            two
        } else {
            self.pos += 1;
            one
        }
    }

    /// Lex a `"`-delimited string literal. Content is taken verbatim; there
    /// is no escape processing. Reaching end of input before the closing
    /// quote yields an `Unknown` token and an unterminated-string
    /// diagnostic whose span runs from the opening quote to the end.
    fn lex_string(&mut self, start: usize) -> Token {
        self.next_char(); // opening quote
        while !matches!(self.current_char(), None | Some('"')) {
            self.next_char();
        }

        if self.is_eof() {
            let span = Span::new(start as TextPos, self.pos as TextPos);
            self.diagnostics
                .report(&self.file_name, span, &messages::UNTERMINATED_STRING, &[]);
            return Token::new(
                TokenKind::Unknown,
                &self.text[start..self.pos],
                TokenValue::None,
                span,
            );
        }

        self.next_char(); // closing quote
        let span = Span::new(start as TextPos, self.pos as TextPos);
        let text = &self.text[start..self.pos];
        let value = TokenValue::String(text[1..text.len() - 1].to_string());
        Token::new(TokenKind::StringLiteral, text, value, span)
    }

    /// Lex a numeric literal: a run of digits and at most one `.`. A second
    /// `.` ends the run without being consumed. One dot makes a float,
    /// none makes an int.
    fn lex_number(&mut self, start: usize) -> Token {
        let mut dots = 0;
        self.next_char();
        while matches!(self.current_char(), Some(c) if is_digit(c) || c == '.') {
            if self.current_char() == Some('.') {
                dots += 1;
                if dots > 1 {
                    break;
                }
            }
            self.next_char();
        }

        let span = Span::new(start as TextPos, self.pos as TextPos);
        let text = &self.text[start..self.pos];
        if dots == 1 {
            let value = TokenValue::Float(text.parse().unwrap_or(0.0));
            Token::new(TokenKind::FloatLiteral, text, value, span)
        } else {
            let value = TokenValue::Int(text.parse().unwrap_or(0));
            Token::new(TokenKind::IntLiteral, text, value, span)
        }
    }

    /// Build a valueless token from a kind and start offset.
    fn token_from(&self, kind: TokenKind, start: usize) -> Token {
        let span = Span::new(start as TextPos, self.pos as TextPos);
        Token::new(kind, &self.text[start..self.pos], TokenValue::None, span)
    }
}
