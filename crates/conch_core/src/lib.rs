//! conch_core: Core utilities for the conch shell language pipeline.
//!
//! Provides source spans and line maps used by every stage of the
//! lexer -> parser -> binder -> interpreter pipeline.

pub mod text;

// Re-export commonly used types
pub use text::{LineAndColumn, LineMap, Span, TextPos};
