//! The binder implementation.
//!
//! Walks the statement sequence once, maintaining one active scope. The
//! scope lives as long as the binder, so declarations made in an earlier
//! submission stay resolvable in later ones - the static mirror of the
//! interpreter's persistent runtime scopes. A submission that produces any
//! diagnostic leaves the scope untouched, because the host will not
//! interpret it and the runtime scopes will not see its declarations.

use crate::bound::{
    BoundBinaryExpression, BoundCallStatement, BoundCastExpression, BoundExpression,
    BoundLiteralExpression, BoundPathExpression, BoundProgram, BoundStatement,
    BoundUnaryExpression, BoundVariableAccessExpression, BoundVariableDeclaration, Constant,
};
use crate::operations::{binary_result_type, unary_result_type, Operation};
use crate::scope::Scope;
use crate::symbol::{Symbol, SymbolKind};
use crate::types::Type;
use conch_diagnostics::{messages, DiagnosticCollection};
use conch_parser::Parser;
use conch_syntax::{
    BinaryExpression, CallStatement, Expression, LiteralExpression, PathExpression, Statement,
    Token, TokenValue, UnaryExpression, VariableAccessExpression, VariableDeclarationStatement,
};

/// The binder resolves types and symbols, producing a bound tree.
pub struct Binder {
    /// The active scope chain. Persists across submissions.
    scope: Scope,
    /// The file name of the submission currently being bound.
    file_name: String,
    /// Diagnostics for the submission currently being bound.
    diagnostics: DiagnosticCollection,
}

impl Binder {
    /// Create a binder with an empty root scope.
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            file_name: String::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// The active scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Lex, parse and bind one submission.
    ///
    /// Lexical and syntactic diagnostics suppress binding entirely
    /// (`None`). Otherwise the bound program is returned together with any
    /// binding diagnostics; the host decides whether to interpret it (the
    /// shell only does so when the collection is empty).
    pub fn bind_source(
        &mut self,
        file_name: &str,
        text: &str,
    ) -> (Option<BoundProgram>, DiagnosticCollection) {
        let mut parser = Parser::new(file_name, text);
        if !parser.diagnostics().is_empty() {
            return (None, parser.take_diagnostics());
        }

        let statements = parser.parse();
        if !parser.diagnostics().is_empty() {
            return (None, parser.take_diagnostics());
        }

        let (program, diagnostics) = self.bind(file_name, &statements);
        (Some(program), diagnostics)
    }

    /// Bind an already-parsed statement sequence.
    ///
    /// Returns the bound program and the binding diagnostics. If any
    /// diagnostic was produced, declarations made while binding are rolled
    /// back so the static scope keeps mirroring the runtime scopes.
    pub fn bind(
        &mut self,
        file_name: &str,
        statements: &[Statement],
    ) -> (BoundProgram, DiagnosticCollection) {
        self.file_name = file_name.to_string();
        let snapshot = self.scope.clone();

        let statements = statements
            .iter()
            .map(|statement| self.bind_statement(statement))
            .collect();

        let diagnostics = std::mem::take(&mut self.diagnostics);
        if !diagnostics.is_empty() {
            self.scope = snapshot;
        }
        (BoundProgram { statements }, diagnostics)
    }

    // ========================================================================
    // Statement binding
    // ========================================================================

    fn bind_statement(&mut self, statement: &Statement) -> BoundStatement {
        match statement {
            Statement::VariableDeclaration(s) => self.bind_variable_declaration(s),
            Statement::Call(s) => self.bind_call_statement(s),
        }
    }

    fn bind_variable_declaration(&mut self, statement: &VariableDeclarationStatement) -> BoundStatement {
        let ty = self.bind_type(&statement.type_token);
        let initializer = self.bind_expression_with_expected(&statement.initializer, ty);
        let symbol = Symbol::variable(&statement.name.text, ty);
        self.scope.declare(symbol.clone());

        BoundStatement::VariableDeclaration(BoundVariableDeclaration {
            symbol,
            initializer,
            span: statement.span(),
        })
    }

    fn bind_call_statement(&mut self, statement: &CallStatement) -> BoundStatement {
        let caller = self.bind_expression(&statement.caller);
        let arguments = statement
            .arguments
            .iter()
            .map(|argument| self.bind_expression(argument))
            .collect();

        BoundStatement::Call(BoundCallStatement {
            caller,
            arguments,
            span: statement.span(),
        })
    }

    /// Map a type-name token to a static type by exact keyword match. Any
    /// other text is a diagnostic and binds as `any`.
    fn bind_type(&mut self, token: &Token) -> Type {
        match Type::from_name(&token.text) {
            Some(ty) => ty,
            None => {
                self.diagnostics.report(
                    &self.file_name,
                    token.span,
                    &messages::UNKNOWN_TYPE,
                    &[&token.text],
                );
                Type::Any
            }
        }
    }

    // ========================================================================
    // Expression binding
    // ========================================================================

    fn bind_expression(&mut self, expression: &Expression) -> BoundExpression {
        self.bind_expression_with_expected(expression, Type::Any)
    }

    /// Bind an expression, then check its inferred type against `expected`
    /// (unless `expected` is `any`). A mismatch is a diagnostic, but the
    /// bound expression keeps its actually-inferred type.
    fn bind_expression_with_expected(
        &mut self,
        expression: &Expression,
        expected: Type,
    ) -> BoundExpression {
        let bound = self.bind_expression_internal(expression);
        if expected != Type::Any && bound.ty() != expected {
            self.diagnostics.report(
                &self.file_name,
                expression.span(),
                &messages::EXPRESSION_TYPE_MISMATCH,
                &[bound.ty().name(), expected.name()],
            );
        }
        bound
    }

    fn bind_expression_internal(&mut self, expression: &Expression) -> BoundExpression {
        match expression {
            Expression::Path(e) => self.bind_path_expression(e),
            Expression::Binary(e) => self.bind_binary_expression(e),
            Expression::Unary(e) => self.bind_unary_expression(e),
            Expression::Literal(e) => self.bind_literal_expression(e),
            Expression::VariableAccess(e) => self.bind_variable_access(e),
        }
    }

    fn bind_path_expression(&mut self, expression: &PathExpression) -> BoundExpression {
        BoundExpression::Path(BoundPathExpression {
            value: expression.text(),
            span: expression.span(),
        })
    }

    fn bind_binary_expression(&mut self, expression: &BinaryExpression) -> BoundExpression {
        let left = self.bind_expression(&expression.left);
        let right = self.bind_expression(&expression.right);
        let operator = self.bind_operator(&expression.operator);

        let ty = match binary_result_type(left.ty(), operator, right.ty()) {
            Some(ty) => ty,
            None => {
                self.diagnostics.report(
                    &self.file_name,
                    expression.span(),
                    &messages::INVALID_BINARY_OPERANDS,
                    &[left.ty().name(), right.ty().name()],
                );
                Type::Any
            }
        };

        let binary = BoundExpression::Binary(BoundBinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            ty,
            span: expression.span(),
        });

        // Integer division truncates toward zero; make that explicit.
        if operator == Operation::Division && ty == Type::Int {
            BoundExpression::Cast(BoundCastExpression {
                expression: Box::new(binary),
                ty: Type::Int,
            })
        } else {
            binary
        }
    }

    fn bind_unary_expression(&mut self, expression: &UnaryExpression) -> BoundExpression {
        let operand = self.bind_expression(&expression.operand);
        let operator = self.bind_operator(&expression.operator);

        let ty = match unary_result_type(operator, operand.ty()) {
            Some(ty) => ty,
            None => {
                self.diagnostics.report(
                    &self.file_name,
                    expression.span(),
                    &messages::INVALID_UNARY_OPERAND,
                    &[operand.ty().name()],
                );
                Type::Any
            }
        };

        BoundExpression::Unary(BoundUnaryExpression {
            operator,
            operand: Box::new(operand),
            ty,
            span: expression.span(),
        })
    }

    fn bind_literal_expression(&mut self, expression: &LiteralExpression) -> BoundExpression {
        let value = match &expression.token.value {
            TokenValue::Int(value) => Constant::Int(*value),
            // A numeric value with no fractional remainder infers int.
            TokenValue::Float(value) if value.fract() == 0.0 => Constant::Int(*value as i64),
            TokenValue::Float(value) => Constant::Float(*value),
            TokenValue::String(value) => Constant::String(value.clone()),
            TokenValue::None => Constant::None,
        };

        BoundExpression::Literal(BoundLiteralExpression {
            value,
            span: expression.token.span,
        })
    }

    fn bind_variable_access(&mut self, expression: &VariableAccessExpression) -> BoundExpression {
        let name = format!("${}", expression.name.text);
        let symbol = match self.scope.lookup(&name, &[SymbolKind::Variable]) {
            Some(symbol) => symbol.clone(),
            None => {
                self.diagnostics.report(
                    &self.file_name,
                    expression.span(),
                    &messages::CANNOT_FIND_VARIABLE,
                    &[&expression.name.text],
                );
                Symbol {
                    name,
                    ty: Type::Any,
                    kind: SymbolKind::Variable,
                }
            }
        };

        BoundExpression::VariableAccess(BoundVariableAccessExpression {
            symbol,
            span: expression.span(),
        })
    }

    /// Map an operator token to its operation. The parser only builds
    /// operator nodes from operator tokens, so a miss here is a
    /// parser/binder contract violation, not a user error.
    fn bind_operator(&self, token: &Token) -> Operation {
        match Operation::from_token_kind(token.kind) {
            Some(operation) => operation,
            None => unreachable!("token kind {:?} is not an operator", token.kind),
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}
