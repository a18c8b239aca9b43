//! Syntax-tree node definitions.
//!
//! Every node's span is derived from its children: the start of the first
//! child and the end of the last. Nodes own their children outright; a
//! submission is one line of input, so the tree is small and short-lived.

use crate::token::Token;
use conch_core::text::Span;

// ============================================================================
// Statements
// ============================================================================

/// A top-level statement in a submission.
#[derive(Debug, Clone)]
pub enum Statement {
    VariableDeclaration(VariableDeclarationStatement),
    Call(CallStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::VariableDeclaration(s) => s.span(),
            Statement::Call(s) => s.span(),
        }
    }
}

/// `<type> <name> = <initializer>`
#[derive(Debug, Clone)]
pub struct VariableDeclarationStatement {
    pub type_token: Token,
    pub name: Token,
    pub equals: Token,
    pub initializer: Expression,
}

impl VariableDeclarationStatement {
    pub fn span(&self) -> Span {
        Span::new(self.type_token.span.start, self.initializer.span().end)
    }
}

/// `<caller> <arg> <arg> ...` - a command invocation.
#[derive(Debug, Clone)]
pub struct CallStatement {
    pub caller: Expression,
    pub arguments: Vec<Expression>,
}

impl CallStatement {
    pub fn span(&self) -> Span {
        let end = self
            .arguments
            .last()
            .map(|a| a.span().end)
            .unwrap_or_else(|| self.caller.span().end);
        Span::new(self.caller.span().start, end)
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// An expression node.
#[derive(Debug, Clone)]
pub enum Expression {
    Path(PathExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Literal(LiteralExpression),
    VariableAccess(VariableAccessExpression),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Path(e) => e.span(),
            Expression::Binary(e) => e.span(),
            Expression::Unary(e) => e.span(),
            Expression::Literal(e) => e.span(),
            Expression::VariableAccess(e) => e.span(),
        }
    }
}

/// A bare word or filesystem-path-like sequence of tokens glued together
/// with no intervening whitespace, e.g. `ls`, `./bin/tool`, `C:\temp`.
#[derive(Debug, Clone)]
pub struct PathExpression {
    /// The consecutive tokens making up the path. Never empty.
    pub parts: Vec<Token>,
}

impl PathExpression {
    pub fn span(&self) -> Span {
        Span::new(
            self.parts[0].span.start,
            self.parts[self.parts.len() - 1].span.end,
        )
    }

    /// The path as written, with all parts concatenated.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// `<left> <operator> <right>`
#[derive(Debug, Clone)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

impl BinaryExpression {
    pub fn span(&self) -> Span {
        Span::new(self.left.span().start, self.right.span().end)
    }
}

/// `<operator> <operand>`
#[derive(Debug, Clone)]
pub struct UnaryExpression {
    pub operator: Token,
    pub operand: Box<Expression>,
}

impl UnaryExpression {
    pub fn span(&self) -> Span {
        Span::new(self.operator.span.start, self.operand.span().end)
    }
}

/// An `int`, `float` or `string` literal token.
#[derive(Debug, Clone)]
pub struct LiteralExpression {
    pub token: Token,
}

impl LiteralExpression {
    pub fn span(&self) -> Span {
        self.token.span
    }
}

/// `$<name>` - a variable reference.
#[derive(Debug, Clone)]
pub struct VariableAccessExpression {
    pub dollar: Token,
    pub name: Token,
}

impl VariableAccessExpression {
    pub fn span(&self) -> Span {
        Span::new(self.dollar.span.start, self.name.span.end)
    }
}
