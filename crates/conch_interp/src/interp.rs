//! The interpreter implementation.
//!
//! Statements are executed in order; a recoverable runtime diagnostic (an
//! unresolved command name) never stops the remaining statements. A
//! variable lookup miss, by contrast, is an internal invariant violation:
//! the binder has already proven every referenced variable reachable, so
//! the interpreter treats a miss as a panic, not a diagnostic.

use crate::registry::NativeRegistry;
use crate::value::Value;
use conch_binder::{
    BoundBinaryExpression, BoundCallStatement, BoundCastExpression, BoundExpression,
    BoundProgram, BoundStatement, BoundUnaryExpression, BoundVariableDeclaration, Constant,
    Operation,
};
use conch_diagnostics::{messages, DiagnosticCollection};
use rustc_hash::FxHashMap;

/// One runtime scope: a name-to-value mapping.
type RuntimeScope = FxHashMap<String, Value>;

/// The tree-walking interpreter. Owns a stack of runtime scopes that
/// persists across submissions.
pub struct Interpreter {
    /// The runtime scope stack, outermost first. Never empty: one root
    /// scope is pushed at construction.
    scopes: Vec<RuntimeScope>,
}

impl Interpreter {
    /// Create an interpreter with one root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![RuntimeScope::default()],
        }
    }

    /// Run one bound program against the given native-function registry.
    /// Returns the recoverable runtime diagnostics the run produced.
    pub fn interpret(
        &mut self,
        file_name: &str,
        program: &BoundProgram,
        registry: &mut dyn NativeRegistry,
    ) -> DiagnosticCollection {
        let mut diagnostics = DiagnosticCollection::new();
        for statement in &program.statements {
            self.interpret_statement(file_name, statement, registry, &mut diagnostics);
        }
        diagnostics
    }

    /// Look up a variable by its sigil-prefixed name, innermost scope
    /// first. Exposed so the host and tests can inspect session state.
    pub fn lookup_variable(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn interpret_statement(
        &mut self,
        file_name: &str,
        statement: &BoundStatement,
        registry: &mut dyn NativeRegistry,
        diagnostics: &mut DiagnosticCollection,
    ) {
        match statement {
            BoundStatement::VariableDeclaration(s) => self.interpret_variable_declaration(s),
            BoundStatement::Call(s) => {
                self.interpret_call_statement(file_name, s, registry, diagnostics)
            }
        }
    }

    fn interpret_variable_declaration(&mut self, statement: &BoundVariableDeclaration) {
        let value = self.evaluate(&statement.initializer);
        let innermost = self
            .scopes
            .last_mut()
            .unwrap_or_else(|| unreachable!("the root scope always exists"));
        innermost.insert(statement.symbol.name.clone(), value);
    }

    /// Evaluate caller and arguments in order, then dispatch. Only a bare
    /// command name (no path separators) known to the registry dispatches;
    /// anything else is a recoverable runtime diagnostic.
    fn interpret_call_statement(
        &mut self,
        file_name: &str,
        statement: &BoundCallStatement,
        registry: &mut dyn NativeRegistry,
        diagnostics: &mut DiagnosticCollection,
    ) {
        let caller = match self.evaluate(&statement.caller) {
            Value::String(name) => name,
            other => other.to_string(),
        };
        let arguments: Vec<Value> = statement
            .arguments
            .iter()
            .map(|argument| self.evaluate(argument))
            .collect();

        let is_bare_name = !caller.contains(['/', '\\']);
        if is_bare_name && registry.has(&caller) {
            let _exit_code = registry.exec(&caller, &arguments);
            return;
        }

        diagnostics.report(
            file_name,
            statement.span,
            &messages::NOT_EXECUTABLE,
            &[&caller],
        );
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn evaluate(&self, expression: &BoundExpression) -> Value {
        match expression {
            BoundExpression::Path(e) => Value::String(e.value.clone()),
            BoundExpression::Binary(e) => self.evaluate_binary(e),
            BoundExpression::Unary(e) => self.evaluate_unary(e),
            BoundExpression::Literal(e) => match &e.value {
                Constant::Int(value) => Value::Int(*value),
                Constant::Float(value) => Value::Float(*value),
                Constant::String(value) => Value::String(value.clone()),
                Constant::Bool(value) => Value::Bool(*value),
                Constant::None => unreachable!("bad literal survived binding"),
            },
            BoundExpression::VariableAccess(e) => match self.lookup_variable(&e.symbol.name) {
                Some(value) => value.clone(),
                // The binder proved this variable reachable; a miss here is
                // an internal fault, never a user error.
                None => panic!("variable '{}' missing from runtime scopes", e.symbol.name),
            },
            BoundExpression::Cast(e) => self.evaluate_cast(e),
        }
    }

    fn evaluate_binary(&self, expression: &BoundBinaryExpression) -> Value {
        // Logical and/or short-circuit: the right operand is only
        // evaluated when the left does not already decide the result.
        match expression.operator {
            Operation::LogicalAnd => {
                return match self.evaluate(&expression.left) {
                    Value::Bool(false) => Value::Bool(false),
                    Value::Bool(true) => self.evaluate(&expression.right),
                    other => unreachable!("logical and over {:?}", other),
                };
            }
            Operation::LogicalOr => {
                return match self.evaluate(&expression.left) {
                    Value::Bool(true) => Value::Bool(true),
                    Value::Bool(false) => self.evaluate(&expression.right),
                    other => unreachable!("logical or over {:?}", other),
                };
            }
            _ => {}
        }

        let left = self.evaluate(&expression.left);
        let right = self.evaluate(&expression.right);

        match expression.operator {
            Operation::Addition => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_add(r)),
                (Value::String(l), Value::String(r)) => Value::String(l + &r),
                (l, r) => Value::Float(l.as_f64() + r.as_f64()),
            },
            Operation::Subtraction => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_sub(r)),
                (l, r) => Value::Float(l.as_f64() - r.as_f64()),
            },
            Operation::Multiplication => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_mul(r)),
                (l, r) => Value::Float(l.as_f64() * r.as_f64()),
            },
            Operation::Division => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l.checked_div(r).unwrap_or(0)),
                (l, r) => Value::Float(l.as_f64() / r.as_f64()),
            },
            Operation::Modulo => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l.checked_rem(r).unwrap_or(0)),
                (l, r) => Value::Float(l.as_f64() % r.as_f64()),
            },
            Operation::BitwiseAnd => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l & r),
                (Value::Bool(l), Value::Bool(r)) => Value::Bool(l & r),
                (l, r) => unreachable!("bitwise and over {:?} and {:?}", l, r),
            },
            Operation::BitwiseOr => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l | r),
                (Value::Bool(l), Value::Bool(r)) => Value::Bool(l | r),
                (l, r) => unreachable!("bitwise or over {:?} and {:?}", l, r),
            },
            Operation::BitwiseXor => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l ^ r),
                (Value::Bool(l), Value::Bool(r)) => Value::Bool(l ^ r),
                (l, r) => unreachable!("bitwise xor over {:?} and {:?}", l, r),
            },
            Operation::ShiftLeft => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_shl(r as u32)),
                (l, r) => unreachable!("shift left over {:?} and {:?}", l, r),
            },
            Operation::ShiftRight => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_shr(r as u32)),
                (l, r) => unreachable!("shift right over {:?} and {:?}", l, r),
            },
            Operation::Equals => Value::Bool(Self::values_equal(&left, &right)),
            Operation::NotEquals => Value::Bool(!Self::values_equal(&left, &right)),
            Operation::Greater => Self::compare(&left, &right, |o| o == std::cmp::Ordering::Greater),
            Operation::GreaterEquals => {
                Self::compare(&left, &right, |o| o != std::cmp::Ordering::Less)
            }
            Operation::Less => Self::compare(&left, &right, |o| o == std::cmp::Ordering::Less),
            Operation::LessEquals => {
                Self::compare(&left, &right, |o| o != std::cmp::Ordering::Greater)
            }
            Operation::LogicalAnd | Operation::LogicalOr => {
                unreachable!("short-circuit operators are handled above")
            }
            op @ (Operation::LogicalNot | Operation::BitwiseNot) => {
                unreachable!("{:?} is not a binary operation", op)
            }
        }
    }

    fn values_equal(left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Int(l), Value::Int(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            // float/float and mixed int/float compare numerically.
            (l, r) => l.as_f64() == r.as_f64(),
        }
    }

    fn compare(left: &Value, right: &Value, accept: impl Fn(std::cmp::Ordering) -> bool) -> Value {
        let ordering = match (left, right) {
            (Value::Int(l), Value::Int(r)) => l.cmp(r),
            // NaN compares false against everything.
            (l, r) => match l.as_f64().partial_cmp(&r.as_f64()) {
                Some(ordering) => ordering,
                None => return Value::Bool(false),
            },
        };
        Value::Bool(accept(ordering))
    }

    fn evaluate_unary(&self, expression: &BoundUnaryExpression) -> Value {
        let operand = self.evaluate(&expression.operand);
        match expression.operator {
            Operation::Addition => operand,
            Operation::Subtraction => match operand {
                Value::Int(value) => Value::Int(value.wrapping_neg()),
                Value::Float(value) => Value::Float(-value),
                other => unreachable!("negation of {:?}", other),
            },
            Operation::BitwiseNot => match operand {
                Value::Int(value) => Value::Int(!value),
                other => unreachable!("bitwise not of {:?}", other),
            },
            Operation::LogicalNot => match operand {
                Value::Bool(value) => Value::Bool(!value),
                other => unreachable!("logical not of {:?}", other),
            },
            op => unreachable!("{:?} is not a unary operation", op),
        }
    }

    /// A cast truncates a numeric value toward zero.
    fn evaluate_cast(&self, expression: &BoundCastExpression) -> Value {
        match self.evaluate(&expression.expression) {
            Value::Int(value) => Value::Int(value),
            Value::Float(value) => Value::Int(value.trunc() as i64),
            other => unreachable!("cast of {:?}", other),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
