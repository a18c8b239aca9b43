//! The parser implementation.
//!
//! Token handling follows two rules the grammar depends on:
//! - runs of consecutive newline tokens are collapsed to one at buffer time,
//!   and bad tokens are dropped (their lexer diagnostics are kept);
//! - whitespace is significant only where the grammar says so (path glue,
//!   call-argument boundaries); everywhere else the cursor helpers skip it.

use crate::precedence::{binary_operator_precedence, unary_operator_precedence, OperatorPrecedence};
use conch_diagnostics::{messages, DiagnosticCollection};
use conch_lexer::Lexer;
use conch_syntax::{
    BinaryExpression, CallStatement, Expression, LiteralExpression, PathExpression, Statement,
    Token, TokenKind, UnaryExpression, VariableAccessExpression, VariableDeclarationStatement,
};

/// The parser consumes the full token stream eagerly at construction time
/// and produces an ordered sequence of statements.
pub struct Parser {
    /// The file (or pseudo-file) name used for diagnostics.
    file_name: String,
    /// The buffered tokens. Always ends with an end-of-file token.
    tokens: Vec<Token>,
    /// Current position in the token buffer.
    pos: usize,
    /// Lexer diagnostics merged with the parser's own, in order.
    diagnostics: DiagnosticCollection,
}

impl Parser {
    /// Create a parser for one submission, draining the lexer up front.
    pub fn new(file_name: impl Into<String>, text: &str) -> Self {
        let file_name = file_name.into();
        let mut lexer = Lexer::new(file_name.clone(), text);
        let mut tokens = Vec::new();
        let mut last_kind = TokenKind::Unknown;

        loop {
            let token = lexer.lex();
            let kind = token.kind;
            if kind != TokenKind::Unknown {
                // Collapse every run of newline tokens down to a single one.
                if !(kind == TokenKind::NewLineTrivia && last_kind == TokenKind::NewLineTrivia) {
                    tokens.push(token);
                }
                last_kind = kind;
            }
            if kind == TokenKind::EndOfFileToken {
                break;
            }
        }

        Self {
            file_name,
            tokens,
            pos: 0,
            diagnostics: lexer.take_diagnostics(),
        }
    }

    /// Get the buffered tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the accumulated diagnostics (lexer's plus the parser's own).
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// The token at the cursor. Past the end of the buffer this clamps to
    /// the final end-of-file token.
    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| &self.tokens[self.tokens.len() - 1])
    }

    fn peek(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.pos + offset)
            .unwrap_or_else(|| &self.tokens[self.tokens.len() - 1])
    }

    /// Consume the current token.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token, then skip any whitespace that follows it.
    /// Newlines are left in place: the statement loop consumes them as
    /// terminators.
    fn advance_skipping_whitespace(&mut self) -> Token {
        let token = self.advance();
        self.skip_whitespace();
        token
    }

    fn skip_whitespace(&mut self) {
        while self.current().kind == TokenKind::WhitespaceTrivia {
            self.pos += 1;
        }
    }

    /// Expect the current token to be one of `kinds`. On success the token
    /// is consumed along with trailing whitespace. On failure a diagnostic
    /// names the unexpected kind and the expected set, the cursor advances
    /// exactly one token, and a synthetic bad token is substituted so tree
    /// construction can continue.
    fn match_token(&mut self, kinds: &[TokenKind]) -> Token {
        if kinds.contains(&self.current().kind) {
            return self.advance_skipping_whitespace();
        }

        let span = self.current().span;
        let found = self.current().kind.description();
        let expected = kinds
            .iter()
            .map(|k| k.description())
            .collect::<Vec<_>>()
            .join(", ");
        self.diagnostics.report(
            &self.file_name,
            span,
            &messages::UNEXPECTED_TOKEN,
            &[found, &expected],
        );

        self.pos += 1;
        Token::bad(span)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse the whole submission into an ordered sequence of statements.
    pub fn parse(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            while self.current().kind.is_trivia() {
                self.pos += 1;
            }
            if self.current().kind == TokenKind::EndOfFileToken {
                break;
            }

            statements.push(self.parse_statement());
            self.skip_whitespace();
            self.match_token(&[
                TokenKind::NewLineTrivia,
                TokenKind::SemicolonToken,
                TokenKind::EndOfFileToken,
            ]);
        }
        statements
    }

    fn parse_statement(&mut self) -> Statement {
        // A declaration starts `IDENTIFIER IDENTIFIER =`. Anything else that
        // merely begins with an identifier is a call statement, so the
        // lookahead is speculative: save the cursor, try, restore on a miss.
        if self.current().kind == TokenKind::Identifier {
            let reset = self.pos;
            let type_token = self.advance_skipping_whitespace();
            if self.current().kind == TokenKind::Identifier {
                let name = self.advance_skipping_whitespace();
                if self.current().kind == TokenKind::EqualsToken {
                    let equals = self.advance_skipping_whitespace();
                    let initializer = self.parse_expression();
                    return Statement::VariableDeclaration(VariableDeclarationStatement {
                        type_token,
                        name,
                        equals,
                        initializer,
                    });
                }
            }
            self.pos = reset;
        }

        let caller = self.parse_expression();
        self.skip_whitespace();
        let mut arguments = Vec::new();
        while !self.current().kind.is_statement_terminator() {
            arguments.push(self.parse_expression());
            self.skip_whitespace();
        }
        Statement::Call(CallStatement { caller, arguments })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> Expression {
        if self.is_path_start() {
            return self.parse_path_expression();
        }

        self.parse_binary_expression(OperatorPrecedence::Invalid)
    }

    /// Whether the current token can open a path expression: a leading `.`,
    /// `/` or `\`, a drive-letter pattern (`X:/` or `X:\`), or a bare
    /// identifier.
    fn is_path_start(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::DotToken
                | TokenKind::SlashToken
                | TokenKind::BackslashToken
                | TokenKind::Identifier
        )
    }

    fn is_drive_letter_start(&self) -> bool {
        self.current().kind == TokenKind::Identifier
            && self.current().text.len() == 1
            && self.peek(1).kind == TokenKind::ColonToken
            && matches!(
                self.peek(2).kind,
                TokenKind::SlashToken | TokenKind::BackslashToken
            )
    }

    /// Glue consecutive path tokens into one node. The path ends at the
    /// first token that cannot be part of it - in particular at whitespace,
    /// which is what separates call arguments.
    fn parse_path_expression(&mut self) -> Expression {
        let mut parts = Vec::new();

        if self.is_drive_letter_start() {
            parts.push(self.advance()); // drive letter
            parts.push(self.advance()); // colon
        }
        parts.push(self.advance());

        while matches!(
            self.current().kind,
            TokenKind::DotToken
                | TokenKind::SlashToken
                | TokenKind::BackslashToken
                | TokenKind::Identifier
                | TokenKind::StringLiteral
        ) {
            parts.push(self.advance());
        }

        Expression::Path(PathExpression { parts })
    }

    /// Precedence-climbing binary/unary expression parser. Unary prefix
    /// operators bind tighter than any binary operator; equal binary
    /// precedence associates to the left.
    fn parse_binary_expression(&mut self, parent_precedence: OperatorPrecedence) -> Expression {
        let unary_precedence = unary_operator_precedence(self.current().kind);
        let mut left = if unary_precedence != OperatorPrecedence::Invalid
            && unary_precedence >= parent_precedence
        {
            let operator = self.advance_skipping_whitespace();
            let operand = self.parse_binary_expression(unary_precedence);
            Expression::Unary(UnaryExpression {
                operator,
                operand: Box::new(operand),
            })
        } else {
            self.parse_literal()
        };

        loop {
            let precedence = binary_operator_precedence(self.current().kind);
            if precedence == OperatorPrecedence::Invalid || precedence <= parent_precedence {
                break;
            }

            let operator = self.advance_skipping_whitespace();
            let right = self.parse_binary_expression(precedence);
            left = Expression::Binary(BinaryExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            });
        }

        left
    }

    /// A literal token, or a `$name` variable access.
    fn parse_literal(&mut self) -> Expression {
        if self.current().kind == TokenKind::DollarToken {
            let dollar = self.match_token(&[TokenKind::DollarToken]);
            let name = self.match_token(&[TokenKind::Identifier]);
            return Expression::VariableAccess(VariableAccessExpression { dollar, name });
        }

        let token = self.match_token(&[
            TokenKind::IntLiteral,
            TokenKind::FloatLiteral,
            TokenKind::StringLiteral,
        ]);
        Expression::Literal(LiteralExpression { token })
    }
}
