//! Host-side errors.

use thiserror::Error;

/// Errors the shell host itself can hit. Language-level problems are never
/// errors - they are diagnostics rendered to the user.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not detect a home directory")]
    NoHomeDirectory,
}
