//! Define error types for IR → Rust rendering.
//!
//! These errors mean the emitters produced IR that does not form valid Rust; they indicate a compiler bug or an
//! identifier that escaping could not repair, never a problem the schema author can fix.

use thiserror::Error;

/// Error during IR rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// The generated tokens did not parse as a Rust file.
    #[error("syn parse error: {0}")]
    SynParse(String),

    #[error("invalid identifier `{0}`")]
    InvalidIdent(String),
}
