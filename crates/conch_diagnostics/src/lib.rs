//! conch_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Diagnostics are purely additive: every stage of the pipeline records the
//! problems it finds and keeps going, so a single submission surfaces all of
//! its independent errors at once. Nothing in this crate ever aborts.

use conch_core::text::Span;
use std::fmt;

/// The pipeline stage family a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Produced by the lexer (unterminated string, unknown character).
    Lexical,
    /// Produced by the parser (unexpected token).
    Syntax,
    /// Produced by the binder (unknown type, type mismatch, bad operands).
    Semantic,
    /// Produced by the interpreter (unresolved command name).
    Runtime,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical | DiagnosticKind::Syntax => write!(f, "SyntaxError"),
            DiagnosticKind::Semantic => write!(f, "TypeError"),
            DiagnosticKind::Runtime => write!(f, "RuntimeError"),
        }
    }
}

/// A diagnostic message template. May contain `{0}`, `{1}`, ... placeholders.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    /// The kind of diagnostic this template produces.
    pub kind: DiagnosticKind,
    /// The message template string.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
///
/// Every diagnostic is attributable to exactly one file and span.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file (or pseudo-file, e.g. `<stdin>`) this diagnostic refers to.
    pub file: String,
    /// The source span this diagnostic covers.
    pub span: Span,
    /// The resolved message text.
    pub message: String,
    /// The stage family that produced this diagnostic.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a diagnostic from a message template.
    pub fn new(file: impl Into<String>, span: Span, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: file.into(),
            span,
            message: format_message(message.message, args),
            kind: message.kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:({}:{}) {}: {}",
            self.file, self.span.start, self.span.end, self.kind, self.message
        )
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An ordered collection of diagnostics accumulated during a submission.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report a templated diagnostic at the given location.
    pub fn report(&mut self, file: impl Into<String>, span: Span, message: &DiagnosticMessage, args: &[&str]) {
        self.add(Diagnostic::new(file, span, message, args));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort diagnostics by file and start position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.span.start.cmp(&b.span.start))
        });
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($kind:ident, $msg:expr) => {
            DiagnosticMessage {
                kind: DiagnosticKind::$kind,
                message: $msg,
            }
        };
    }

    // Lexer
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(Lexical, "Unterminated string");
    pub const UNKNOWN_TOKEN: DiagnosticMessage = diag!(Lexical, "Unknown token '{0}'");

    // Parser
    pub const UNEXPECTED_TOKEN: DiagnosticMessage =
        diag!(Syntax, "Unexpected token '{0}' expected: {1}");

    // Binder
    pub const UNKNOWN_TYPE: DiagnosticMessage = diag!(Semantic, "Unknown type '{0}'");
    pub const EXPRESSION_TYPE_MISMATCH: DiagnosticMessage =
        diag!(Semantic, "Expression returns '{0}' but required is '{1}'");
    pub const INVALID_BINARY_OPERANDS: DiagnosticMessage = diag!(
        Semantic,
        "Cannot use type '{0}' and type '{1}' in a binary operation"
    );
    pub const INVALID_UNARY_OPERAND: DiagnosticMessage =
        diag!(Semantic, "Cannot use type '{0}' in a unary operation");
    pub const CANNOT_FIND_VARIABLE: DiagnosticMessage =
        diag!(Semantic, "Cannot find variable '${0}'");

    // Interpreter
    pub const NOT_EXECUTABLE: DiagnosticMessage = diag!(
        Runtime,
        "'{0}' is not a function, script or path to an executable"
    );
}
