use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the c2p-core crate and dependents.
#[derive(Debug, Error)]
pub enum C2pError {
    /// A vocabulary row that could not be indexed. Collected, never fatal.
    #[error("malformed input row {row}: {reason}")]
    MalformedInputRow { row: usize, reason: String },

    /// A Hanzi character with no derivable romanization.
    #[error("no romanization for character {0:?}")]
    UnrecognizedCharacter(char),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("document compiler failed: {0}")]
    CompileFailed(String),

    #[error("document compiler produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, C2pError>;
