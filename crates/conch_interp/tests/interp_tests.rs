//! End-to-end pipeline tests: lex -> parse -> bind -> interpret.
//!
//! Drives whole submissions through a session the way the shell does,
//! using a recording fake registry in place of the real builtins.

use conch_binder::Binder;
use conch_diagnostics::{Diagnostic, DiagnosticKind};
use conch_interp::{Interpreter, NativeRegistry, Value};

/// A fake registry that records every dispatch.
struct FakeRegistry {
    known: Vec<String>,
    calls: Vec<(String, Vec<Value>)>,
    exit_code: i32,
}

impl FakeRegistry {
    fn new(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(|s| s.to_string()).collect(),
            calls: Vec::new(),
            exit_code: 0,
        }
    }
}

impl NativeRegistry for FakeRegistry {
    fn has(&self, name: &str) -> bool {
        self.known.iter().any(|k| k == name)
    }

    fn exec(&mut self, name: &str, args: &[Value]) -> i32 {
        self.calls.push((name.to_string(), args.to_vec()));
        self.exit_code
    }
}

/// One shell session: a persistent binder, interpreter and registry, with
/// the host's gate policy (any diagnostic suppresses interpretation).
struct Session {
    binder: Binder,
    interpreter: Interpreter,
    registry: FakeRegistry,
}

impl Session {
    fn new(commands: &[&str]) -> Self {
        Self {
            binder: Binder::new(),
            interpreter: Interpreter::new(),
            registry: FakeRegistry::new(commands),
        }
    }

    /// Submit one line. Returns all diagnostics the submission produced.
    fn run(&mut self, line: &str) -> Vec<Diagnostic> {
        let (program, diagnostics) = self.binder.bind_source("<stdin>", line);
        if !diagnostics.is_empty() {
            return diagnostics.into_diagnostics();
        }
        let program = match program {
            Some(program) => program,
            None => return Vec::new(),
        };
        self.interpreter
            .interpret("<stdin>", &program, &mut self.registry)
            .into_diagnostics()
    }

    /// Submit a line and assert it was completely clean.
    fn run_clean(&mut self, line: &str) {
        let diagnostics = self.run(line);
        assert!(
            diagnostics.is_empty(),
            "unexpected diagnostics for {:?}: {:?}",
            line,
            diagnostics
        );
    }

    fn variable(&self, name: &str) -> Option<&Value> {
        self.interpreter.lookup_variable(name)
    }
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_int_declaration_binds_and_stores() {
    let mut session = Session::new(&[]);
    session.run_clean("int x = 5");
    assert_eq!(session.variable("$x"), Some(&Value::Int(5)));
}

#[test]
fn test_type_mismatch_is_one_diagnostic_not_an_abort() {
    let mut session = Session::new(&[]);
    let diagnostics = session.run("string x = 5");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Semantic);
    // Interpretation was suppressed, so nothing was stored.
    assert_eq!(session.variable("$x"), None);
}

#[test]
fn test_float_declaration() {
    let mut session = Session::new(&[]);
    session.run_clean("float f = 2.5");
    assert_eq!(session.variable("$f"), Some(&Value::Float(2.5)));
}

#[test]
fn test_string_declaration() {
    let mut session = Session::new(&[]);
    session.run_clean(r#"string s = "hello""#);
    assert_eq!(
        session.variable("$s"),
        Some(&Value::String("hello".to_string()))
    );
}

#[test]
fn test_any_declaration_skips_checking() {
    let mut session = Session::new(&[]);
    session.run_clean("any a = 5");
    assert_eq!(session.variable("$a"), Some(&Value::Int(5)));
}

// ============================================================================
// Arithmetic and operators
// ============================================================================

#[test]
fn test_operator_precedence_evaluation() {
    let mut session = Session::new(&[]);
    session.run_clean("int a = 2 + 3 * 4");
    session.run_clean("int b = 2 * 3 + 4");
    assert_eq!(session.variable("$a"), Some(&Value::Int(14)));
    assert_eq!(session.variable("$b"), Some(&Value::Int(10)));
}

#[test]
fn test_mixed_arithmetic_promotes_to_float() {
    let mut session = Session::new(&[]);
    session.run_clean("float y = 1 + 2.5");
    assert_eq!(session.variable("$y"), Some(&Value::Float(3.5)));
}

#[test]
fn test_integer_division_truncates_toward_zero() {
    let mut session = Session::new(&[]);
    session.run_clean("int q = 7 / 2");
    session.run_clean("int n = -7 / 2");
    assert_eq!(session.variable("$q"), Some(&Value::Int(3)));
    assert_eq!(session.variable("$n"), Some(&Value::Int(-3)));
}

#[test]
fn test_division_by_zero_does_not_panic() {
    let mut session = Session::new(&[]);
    session.run_clean("int z = 1 / 0");
    assert_eq!(session.variable("$z"), Some(&Value::Int(0)));
}

#[test]
fn test_modulo() {
    let mut session = Session::new(&[]);
    session.run_clean("int m = 7 % 3");
    assert_eq!(session.variable("$m"), Some(&Value::Int(1)));
}

#[test]
fn test_bit_manipulation() {
    let mut session = Session::new(&[]);
    session.run_clean("int a = 1 << 3");
    session.run_clean("int b = 5 & 3");
    session.run_clean("int c = 5 | 2");
    session.run_clean("int d = 5 ^ 3");
    session.run_clean("int e = 16 >> 2");
    assert_eq!(session.variable("$a"), Some(&Value::Int(8)));
    assert_eq!(session.variable("$b"), Some(&Value::Int(1)));
    assert_eq!(session.variable("$c"), Some(&Value::Int(7)));
    assert_eq!(session.variable("$d"), Some(&Value::Int(6)));
    assert_eq!(session.variable("$e"), Some(&Value::Int(4)));
}

#[test]
fn test_unary_operators() {
    let mut session = Session::new(&[]);
    session.run_clean("int a = ~5");
    session.run_clean("int b = -5");
    session.run_clean("int c = +5");
    assert_eq!(session.variable("$a"), Some(&Value::Int(-6)));
    assert_eq!(session.variable("$b"), Some(&Value::Int(-5)));
    assert_eq!(session.variable("$c"), Some(&Value::Int(5)));
}

#[test]
fn test_comparisons() {
    let mut session = Session::new(&[]);
    session.run_clean("bool a = 1 < 2.5");
    session.run_clean("bool b = 2 >= 2");
    session.run_clean("bool c = 1 == 2");
    assert_eq!(session.variable("$a"), Some(&Value::Bool(true)));
    assert_eq!(session.variable("$b"), Some(&Value::Bool(true)));
    assert_eq!(session.variable("$c"), Some(&Value::Bool(false)));
}

#[test]
fn test_string_concatenation_and_equality() {
    let mut session = Session::new(&[]);
    session.run_clean(r#"string s = "con" + "ch""#);
    session.run_clean(r#"bool eq = "a" == "a""#);
    assert_eq!(
        session.variable("$s"),
        Some(&Value::String("conch".to_string()))
    );
    assert_eq!(session.variable("$eq"), Some(&Value::Bool(true)));
}

#[test]
fn test_boolean_operators_on_variables() {
    let mut session = Session::new(&[]);
    session.run_clean("bool t = 1 == 1");
    session.run_clean("bool f = 1 == 0");
    session.run_clean("bool and = $t && $f");
    session.run_clean("bool or = $t || $f");
    session.run_clean("bool xor = $t ^ $t");
    session.run_clean("bool not = !$f");
    assert_eq!(session.variable("$and"), Some(&Value::Bool(false)));
    assert_eq!(session.variable("$or"), Some(&Value::Bool(true)));
    assert_eq!(session.variable("$xor"), Some(&Value::Bool(false)));
    assert_eq!(session.variable("$not"), Some(&Value::Bool(true)));
}

// ============================================================================
// Call statements
// ============================================================================

#[test]
fn test_registered_command_dispatches() {
    let mut session = Session::new(&["echo"]);
    session.run_clean("echo hello");
    assert_eq!(session.registry.calls.len(), 1);
    let (name, args) = &session.registry.calls[0];
    assert_eq!(name, "echo");
    assert_eq!(args, &[Value::String("hello".to_string())]);
}

#[test]
fn test_arguments_evaluate_in_order() {
    let mut session = Session::new(&["echo"]);
    session.run_clean("int x = 2");
    session.run_clean(r#"echo "a" 1 + 1 $x"#);
    let (_, args) = &session.registry.calls[0];
    assert_eq!(
        args,
        &[
            Value::String("a".to_string()),
            Value::Int(2),
            Value::Int(2),
        ]
    );
}

#[test]
fn test_unknown_command_is_a_recoverable_diagnostic() {
    let mut session = Session::new(&[]);
    let diagnostics = session.run("unknownCmd");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Runtime);
    assert!(diagnostics[0].message.contains("unknownCmd"));
}

#[test]
fn test_path_caller_never_hits_the_registry() {
    // A caller containing path separators is not a bare name, so it is not
    // dispatched even if the registry knows a command of that text.
    let mut session = Session::new(&["tool"]);
    let diagnostics = session.run("./tool");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Runtime);
    assert!(session.registry.calls.is_empty());
}

#[test]
fn test_runtime_diagnostic_does_not_stop_later_statements() {
    let mut session = Session::new(&["echo"]);
    let diagnostics = session.run("nope; echo after");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(session.registry.calls.len(), 1);
}

// ============================================================================
// Suppression gates
// ============================================================================

#[test]
fn test_lexical_error_suppresses_parsing() {
    let mut session = Session::new(&[]);
    let diagnostics = session.run("\"unterminated");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Lexical);
}

#[test]
fn test_syntax_error_suppresses_binding_and_interpretation() {
    let mut session = Session::new(&["echo"]);
    let diagnostics = session.run("1 + ");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Syntax);
    assert!(session.registry.calls.is_empty());
}

// ============================================================================
// Session persistence
// ============================================================================

#[test]
fn test_variables_persist_across_submissions() {
    let mut session = Session::new(&["echo"]);
    session.run_clean("int x = 5");
    session.run_clean("echo $x");
    let (_, args) = &session.registry.calls[0];
    assert_eq!(args, &[Value::Int(5)]);

    session.run_clean("int y = $x + 1");
    assert_eq!(session.variable("$y"), Some(&Value::Int(6)));
}

#[test]
fn test_redeclaration_shadows_with_last_write() {
    let mut session = Session::new(&[]);
    session.run_clean("int x = 1");
    session.run_clean("float x = 2.5");
    assert_eq!(session.variable("$x"), Some(&Value::Float(2.5)));
}

#[test]
fn test_failed_submission_leaves_no_declaration_behind() {
    let mut session = Session::new(&[]);
    let first = session.run("string s = 5");
    assert_eq!(first.len(), 1);

    // The declaration was rolled back, so referencing it is a bind-time
    // diagnostic rather than a runtime fault.
    let second = session.run("echo $s");
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].kind, DiagnosticKind::Semantic);
}

#[test]
fn test_unused_variable_produces_no_diagnostic() {
    let mut session = Session::new(&[]);
    session.run_clean("int unused = 1");
}
