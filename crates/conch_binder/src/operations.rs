//! Operations and the operator relation tables.
//!
//! Typing of binary and unary expressions is an exact lookup into a finite
//! relation over operand types: `(left, operation, right) -> result` and
//! `(operation, operand) -> result`. No entry means the operation is invalid
//! for those types and the binder reports it.

use crate::types::Type;
use conch_syntax::TokenKind;

/// A semantic operation, independent of surface token spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    LogicalAnd,
    LogicalOr,
    LogicalNot,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
    ShiftLeft,
    ShiftRight,
    Greater,
    GreaterEquals,
    Less,
    LessEquals,
    Equals,
    NotEquals,
}

impl Operation {
    /// Map an operator token kind to its operation. Returns `None` for
    /// kinds that are not operators; the parser never hands those to the
    /// binder as operators, so a `None` there is a contract violation.
    pub fn from_token_kind(kind: TokenKind) -> Option<Operation> {
        match kind {
            TokenKind::PlusToken => Some(Operation::Addition),
            TokenKind::MinusToken => Some(Operation::Subtraction),
            TokenKind::AsteriskToken => Some(Operation::Multiplication),
            TokenKind::SlashToken => Some(Operation::Division),
            TokenKind::PercentToken => Some(Operation::Modulo),
            TokenKind::AmpersandAmpersandToken => Some(Operation::LogicalAnd),
            TokenKind::BarBarToken => Some(Operation::LogicalOr),
            TokenKind::ExclamationToken => Some(Operation::LogicalNot),
            TokenKind::AmpersandToken => Some(Operation::BitwiseAnd),
            TokenKind::BarToken => Some(Operation::BitwiseOr),
            TokenKind::CaretToken => Some(Operation::BitwiseXor),
            TokenKind::TildeToken => Some(Operation::BitwiseNot),
            TokenKind::LessThanLessThanToken => Some(Operation::ShiftLeft),
            TokenKind::GreaterThanGreaterThanToken => Some(Operation::ShiftRight),
            TokenKind::GreaterThanToken => Some(Operation::Greater),
            TokenKind::GreaterThanEqualsToken => Some(Operation::GreaterEquals),
            TokenKind::LessThanToken => Some(Operation::Less),
            TokenKind::LessThanEqualsToken => Some(Operation::LessEquals),
            TokenKind::EqualsEqualsToken => Some(Operation::Equals),
            TokenKind::ExclamationEqualsToken => Some(Operation::NotEquals),
            _ => None,
        }
    }
}

/// The valid `(left, operation, right) -> result` typings.
#[rustfmt::skip]
pub const BINARY_RULES: &[(Type, Operation, Type, Type)] = &[
    // Arithmetic: same-type stays, any int/float mix promotes to float.
    (Type::Int,    Operation::Addition,       Type::Int,    Type::Int),
    (Type::Float,  Operation::Addition,       Type::Float,  Type::Float),
    (Type::Int,    Operation::Addition,       Type::Float,  Type::Float),
    (Type::Float,  Operation::Addition,       Type::Int,    Type::Float),

    (Type::Int,    Operation::Subtraction,    Type::Int,    Type::Int),
    (Type::Float,  Operation::Subtraction,    Type::Float,  Type::Float),
    (Type::Int,    Operation::Subtraction,    Type::Float,  Type::Float),
    (Type::Float,  Operation::Subtraction,    Type::Int,    Type::Float),

    (Type::Int,    Operation::Multiplication, Type::Int,    Type::Int),
    (Type::Float,  Operation::Multiplication, Type::Float,  Type::Float),
    (Type::Int,    Operation::Multiplication, Type::Float,  Type::Float),
    (Type::Float,  Operation::Multiplication, Type::Int,    Type::Float),

    (Type::Int,    Operation::Division,       Type::Int,    Type::Int),
    (Type::Float,  Operation::Division,       Type::Float,  Type::Float),
    (Type::Int,    Operation::Division,       Type::Float,  Type::Float),
    (Type::Float,  Operation::Division,       Type::Int,    Type::Float),

    (Type::Int,    Operation::Modulo,         Type::Int,    Type::Int),
    (Type::Float,  Operation::Modulo,         Type::Float,  Type::Float),
    (Type::Int,    Operation::Modulo,         Type::Float,  Type::Float),
    (Type::Float,  Operation::Modulo,         Type::Int,    Type::Float),

    // Comparisons: all six, over every int/float pairing.
    (Type::Int,    Operation::Equals,         Type::Int,    Type::Bool),
    (Type::Int,    Operation::NotEquals,      Type::Int,    Type::Bool),
    (Type::Int,    Operation::Less,           Type::Int,    Type::Bool),
    (Type::Int,    Operation::LessEquals,     Type::Int,    Type::Bool),
    (Type::Int,    Operation::Greater,        Type::Int,    Type::Bool),
    (Type::Int,    Operation::GreaterEquals,  Type::Int,    Type::Bool),

    (Type::Float,  Operation::Equals,         Type::Float,  Type::Bool),
    (Type::Float,  Operation::NotEquals,      Type::Float,  Type::Bool),
    (Type::Float,  Operation::Less,           Type::Float,  Type::Bool),
    (Type::Float,  Operation::LessEquals,     Type::Float,  Type::Bool),
    (Type::Float,  Operation::Greater,        Type::Float,  Type::Bool),
    (Type::Float,  Operation::GreaterEquals,  Type::Float,  Type::Bool),

    (Type::Int,    Operation::Equals,         Type::Float,  Type::Bool),
    (Type::Int,    Operation::NotEquals,      Type::Float,  Type::Bool),
    (Type::Int,    Operation::Less,           Type::Float,  Type::Bool),
    (Type::Int,    Operation::LessEquals,     Type::Float,  Type::Bool),
    (Type::Int,    Operation::Greater,        Type::Float,  Type::Bool),
    (Type::Int,    Operation::GreaterEquals,  Type::Float,  Type::Bool),

    (Type::Float,  Operation::Equals,         Type::Int,    Type::Bool),
    (Type::Float,  Operation::NotEquals,      Type::Int,    Type::Bool),
    (Type::Float,  Operation::Less,           Type::Int,    Type::Bool),
    (Type::Float,  Operation::LessEquals,     Type::Int,    Type::Bool),
    (Type::Float,  Operation::Greater,        Type::Int,    Type::Bool),
    (Type::Float,  Operation::GreaterEquals,  Type::Int,    Type::Bool),

    // Booleans.
    (Type::Bool,   Operation::Equals,         Type::Bool,   Type::Bool),
    (Type::Bool,   Operation::NotEquals,      Type::Bool,   Type::Bool),
    (Type::Bool,   Operation::LogicalAnd,     Type::Bool,   Type::Bool),
    (Type::Bool,   Operation::LogicalOr,      Type::Bool,   Type::Bool),
    (Type::Bool,   Operation::BitwiseAnd,     Type::Bool,   Type::Bool),
    (Type::Bool,   Operation::BitwiseOr,      Type::Bool,   Type::Bool),
    (Type::Bool,   Operation::BitwiseXor,     Type::Bool,   Type::Bool),

    // Integer bit manipulation.
    (Type::Int,    Operation::BitwiseAnd,     Type::Int,    Type::Int),
    (Type::Int,    Operation::BitwiseOr,      Type::Int,    Type::Int),
    (Type::Int,    Operation::BitwiseXor,     Type::Int,    Type::Int),
    (Type::Int,    Operation::ShiftLeft,      Type::Int,    Type::Int),
    (Type::Int,    Operation::ShiftRight,     Type::Int,    Type::Int),

    // Strings: concatenation and equality.
    (Type::String, Operation::Addition,       Type::String, Type::String),
    (Type::String, Operation::Equals,         Type::String, Type::Bool),
    (Type::String, Operation::NotEquals,      Type::String, Type::Bool),
];

/// The valid `(operation, operand) -> result` typings.
#[rustfmt::skip]
pub const UNARY_RULES: &[(Operation, Type, Type)] = &[
    (Operation::BitwiseNot,  Type::Int,   Type::Int),
    (Operation::Addition,    Type::Int,   Type::Int),
    (Operation::Subtraction, Type::Int,   Type::Int),

    (Operation::Addition,    Type::Float, Type::Float),
    (Operation::Subtraction, Type::Float, Type::Float),

    (Operation::LogicalNot,  Type::Bool,  Type::Bool),
];

/// Look up the result type of a binary operation, if it is valid.
pub fn binary_result_type(left: Type, operation: Operation, right: Type) -> Option<Type> {
    BINARY_RULES
        .iter()
        .find(|(l, op, r, _)| *l == left && *op == operation && *r == right)
        .map(|(_, _, _, result)| *result)
}

/// Look up the result type of a unary operation, if it is valid.
pub fn unary_result_type(operation: Operation, operand: Type) -> Option<Type> {
    UNARY_RULES
        .iter()
        .find(|(op, t, _)| *op == operation && *t == operand)
        .map(|(_, _, result)| *result)
}
