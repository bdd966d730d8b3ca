//! Error types for game data loading.

use thiserror::Error;

/// Errors that can occur when loading RON data files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File or directory could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A definition refers to another definition that was never loaded.
    #[error("Unknown {kind} '{name}'")]
    UnknownReference { kind: &'static str, name: String },

    /// A required entry in `game.ron` is not set.
    #[error("Setting '{0}' is not configured")]
    MissingSetting(&'static str),

    /// A wave has nothing it could spawn.
    #[error("Wave '{0}' has an empty enemy pool")]
    EmptyPool(String),
}
