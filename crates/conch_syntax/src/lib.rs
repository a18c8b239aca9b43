//! conch_syntax: Tokens and syntax-tree nodes for the conch command language.
//!
//! The parser produces the node types defined here; the binder consumes them.
//! Node families are closed sum types so every dispatch site is an exhaustive
//! `match` and an unhandled variant is a compile-time error.

pub mod node;
pub mod token;
pub mod token_kind;

pub use node::{
    BinaryExpression, CallStatement, Expression, LiteralExpression, PathExpression, Statement,
    UnaryExpression, VariableAccessExpression, VariableDeclarationStatement,
};
pub use token::{Token, TokenValue};
pub use token_kind::TokenKind;
