//! Error types for the parsing edges of the store
//!
//! Store operations themselves are total and never fail. Errors only come
//! from turning text into store inputs: positions, kind and strategy names,
//! and session scripts.

use thiserror::Error;

/// Errors raised while preparing input for the store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid position: {input:?} (expected `x,y` or `(x, y)`)")]
    InvalidPosition { input: String },

    #[error("Unknown element kind: {kind}")]
    UnknownElementKind { kind: String },

    #[error("Unknown id strategy: {strategy}")]
    UnknownIdStrategy { strategy: String },

    #[error("Script error at line {line}: {message}")]
    ScriptError { line: usize, message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Create a new invalid position error
    pub fn invalid_position(input: impl Into<String>) -> Self {
        Self::InvalidPosition {
            input: input.into(),
        }
    }

    /// Create a new script error
    pub fn script_error(line: usize, message: impl Into<String>) -> Self {
        Self::ScriptError {
            line,
            message: message.into(),
        }
    }
}
