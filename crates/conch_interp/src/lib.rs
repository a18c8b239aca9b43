//! conch_interp: The tree-walking evaluator for the conch command language.
//!
//! Consumes bound programs one at a time, together with a caller-supplied
//! native-function registry. Runtime scopes persist for the life of the
//! interpreter instance, so variable bindings accumulate across submissions.

mod interp;
mod registry;
mod value;

pub use interp::Interpreter;
pub use registry::NativeRegistry;
pub use value::Value;
