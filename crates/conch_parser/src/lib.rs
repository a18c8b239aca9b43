//! conch_parser: Statement and expression parser for the conch command
//! language.
//!
//! The parser drains the lexer eagerly into a token buffer, then produces an
//! ordered sequence of statements. Syntax errors never stop the parse: the
//! parser records a diagnostic, substitutes a placeholder token and keeps
//! going, so one submission reports all of its independent problems.

mod parser;
mod precedence;

pub use parser::Parser;
pub use precedence::{binary_operator_precedence, unary_operator_precedence, OperatorPrecedence};
