//! conch_binder: Semantic analysis for the conch command language.
//!
//! The binder walks the syntax tree once, resolves type names, checks every
//! operation against the operator relation tables, and produces a bound tree
//! in which each expression carries a resolved static type. Type errors
//! degrade to `any` rather than aborting, so one submission reports all of
//! its independent problems.

mod binder;
mod bound;
mod operations;
mod scope;
mod symbol;
mod types;

pub use binder::Binder;
pub use bound::{
    BoundBinaryExpression, BoundCallStatement, BoundCastExpression, BoundExpression,
    BoundLiteralExpression, BoundPathExpression, BoundProgram, BoundStatement,
    BoundUnaryExpression, BoundVariableAccessExpression, BoundVariableDeclaration, Constant,
};
pub use operations::{binary_result_type, unary_result_type, Operation, BINARY_RULES, UNARY_RULES};
pub use scope::Scope;
pub use symbol::{Symbol, SymbolKind};
pub use types::Type;
