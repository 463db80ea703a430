//! Error types for codetint

use thiserror::Error;

/// Result type alias for codetint operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("pattern for category `{category}` failed to compile: {reason}")]
    PatternCompile { category: String, reason: String },

    #[error("invalid highlight request `{request}`: {reason}")]
    InvalidHighlightRequest { request: String, reason: String },

    #[error("language definition: {0}")]
    Definition(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Message(String),
}
