//! Parser integration tests.
//!
//! Tests the token buffering rules, statement recognition, path expressions
//! and operator precedence.

use conch_parser::Parser;
use conch_syntax::{Expression, Statement, TokenKind, TokenValue};

/// Helper: parse source into statements, asserting no diagnostics.
fn parse_clean(source: &str) -> Vec<Statement> {
    let mut parser = Parser::new("test", source);
    let statements = parser.parse();
    assert!(
        parser.diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.diagnostics().diagnostics()
    );
    statements
}

/// Helper: parse source and return (statements, diagnostic count).
fn parse_with_errors(source: &str) -> (Vec<Statement>, usize) {
    let mut parser = Parser::new("test", source);
    let statements = parser.parse();
    (statements, parser.diagnostics().len())
}

/// Helper: dig the single expression out of a single call statement.
fn parse_single_expression(source: &str) -> Expression {
    let mut statements = parse_clean(source);
    assert_eq!(statements.len(), 1);
    match statements.remove(0) {
        Statement::Call(call) => {
            assert!(call.arguments.is_empty(), "expected a lone expression");
            call.caller
        }
        other => panic!("expected a call statement, got {:?}", other),
    }
}

/// Render an expression as a fully parenthesized string for shape checks.
fn render(expr: &Expression) -> String {
    match expr {
        Expression::Path(p) => p.text(),
        Expression::Binary(b) => {
            format!("({} {} {})", render(&b.left), b.operator.text, render(&b.right))
        }
        Expression::Unary(u) => format!("({}{})", u.operator.text, render(&u.operand)),
        Expression::Literal(l) => l.token.text.clone(),
        Expression::VariableAccess(v) => format!("${}", v.name.text),
    }
}

// ============================================================================
// Token buffering
// ============================================================================

#[test]
fn test_newline_runs_collapse() {
    let parser = Parser::new("test", "a\n\n\nb");
    let newlines = parser
        .tokens()
        .iter()
        .filter(|t| t.kind == TokenKind::NewLineTrivia)
        .count();
    assert_eq!(newlines, 1);
}

#[test]
fn test_bad_tokens_dropped_but_diagnosed() {
    let parser = Parser::new("test", "a ? b");
    assert!(parser
        .tokens()
        .iter()
        .all(|t| t.kind != TokenKind::Unknown));
    assert_eq!(parser.diagnostics().len(), 1);
}

#[test]
fn test_buffer_ends_with_eof() {
    let parser = Parser::new("test", "a b c");
    assert_eq!(
        parser.tokens().last().map(|t| t.kind),
        Some(TokenKind::EndOfFileToken)
    );
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_variable_declaration() {
    let statements = parse_clean("int x = 5");
    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Statement::VariableDeclaration(decl) => {
            assert_eq!(decl.type_token.text, "int");
            assert_eq!(decl.name.text, "x");
            match &decl.initializer {
                Expression::Literal(lit) => assert_eq!(lit.token.value, TokenValue::Int(5)),
                other => panic!("expected literal initializer, got {:?}", other),
            }
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn test_declaration_lookahead_backtracks() {
    // Two identifiers without '=' fall through to a call statement.
    let statements = parse_clean("echo hello");
    match &statements[0] {
        Statement::Call(call) => {
            assert_eq!(call.arguments.len(), 1);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_call_with_mixed_arguments() {
    let statements = parse_clean(r#"echo "hi" 5 $x"#);
    match &statements[0] {
        Statement::Call(call) => {
            assert_eq!(call.arguments.len(), 3);
            assert!(matches!(call.arguments[0], Expression::Literal(_)));
            assert!(matches!(call.arguments[1], Expression::Literal(_)));
            assert!(matches!(call.arguments[2], Expression::VariableAccess(_)));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_bare_command_without_arguments() {
    let statements = parse_clean("pwd");
    match &statements[0] {
        Statement::Call(call) => assert!(call.arguments.is_empty()),
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_semicolon_separates_statements() {
    let statements = parse_clean("int x = 1; int y = 2");
    assert_eq!(statements.len(), 2);
}

#[test]
fn test_newline_separates_statements() {
    let statements = parse_clean("pwd\npwd");
    assert_eq!(statements.len(), 2);
}

#[test]
fn test_blank_lines_are_ignored() {
    let statements = parse_clean("\n\npwd\n\n");
    assert_eq!(statements.len(), 1);
}

// ============================================================================
// Path expressions
// ============================================================================

#[test]
fn test_relative_path() {
    let expr = parse_single_expression("./bin/tool");
    match &expr {
        Expression::Path(p) => assert_eq!(p.text(), "./bin/tool"),
        other => panic!("expected path, got {:?}", other),
    }
}

#[test]
fn test_absolute_path() {
    let expr = parse_single_expression("/usr/local/bin");
    assert!(matches!(expr, Expression::Path(_)));
}

#[test]
fn test_drive_letter_path() {
    let expr = parse_single_expression(r"C:\temp\x");
    match &expr {
        Expression::Path(p) => {
            assert_eq!(p.text(), r"C:\temp\x");
            assert_eq!(p.parts[0].text, "C");
            assert_eq!(p.parts[1].kind, TokenKind::ColonToken);
        }
        other => panic!("expected path, got {:?}", other),
    }
}

#[test]
fn test_path_stops_at_whitespace() {
    let statements = parse_clean("./run now");
    match &statements[0] {
        Statement::Call(call) => {
            match &call.caller {
                Expression::Path(p) => assert_eq!(p.text(), "./run"),
                other => panic!("expected path caller, got {:?}", other),
            }
            assert_eq!(call.arguments.len(), 1);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

// ============================================================================
// Operator precedence
// ============================================================================

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    assert_eq!(render(&parse_single_expression("2 + 3 * 4")), "(2 + (3 * 4))");
    assert_eq!(render(&parse_single_expression("2 * 3 + 4")), "((2 * 3) + 4)");
}

#[test]
fn test_equal_precedence_is_left_associative() {
    assert_eq!(render(&parse_single_expression("1 - 2 - 3")), "((1 - 2) - 3)");
    assert_eq!(render(&parse_single_expression("8 / 4 / 2")), "((8 / 4) / 2)");
}

#[test]
fn test_comparison_binds_looser_than_arithmetic() {
    assert_eq!(
        render(&parse_single_expression("1 + 2 == 3")),
        "((1 + 2) == 3)"
    );
}

#[test]
fn test_logical_and_binds_looser_than_comparison() {
    assert_eq!(
        render(&parse_single_expression("1 < 2 && 3 < 4")),
        "((1 < 2) && (3 < 4))"
    );
}

#[test]
fn test_bitwise_group_is_loosest() {
    assert_eq!(
        render(&parse_single_expression("1 && 2 | 3 && 4")),
        "((1 && 2) | (3 && 4))"
    );
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(render(&parse_single_expression("-2 * 3")), "((-2) * 3)");
    assert_eq!(render(&parse_single_expression("!1 == 2")), "((!1) == 2)");
}

#[test]
fn test_nested_unary() {
    assert_eq!(render(&parse_single_expression("- -5")), "(-(-5))");
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_missing_right_operand() {
    let (statements, errors) = parse_with_errors("1 + ");
    assert_eq!(errors, 1);
    // The parser still produced a complete statement.
    assert_eq!(statements.len(), 1);
}

#[test]
fn test_two_independent_errors_in_one_pass() {
    let (_, errors) = parse_with_errors("1 + ; 2 * ");
    assert!(errors >= 2, "expected at least 2 diagnostics, got {}", errors);
}

#[test]
fn test_error_recovery_produces_tree() {
    let (statements, errors) = parse_with_errors("int x = ");
    assert_eq!(errors, 1);
    assert_eq!(statements.len(), 1);
    assert!(matches!(statements[0], Statement::VariableDeclaration(_)));
}
