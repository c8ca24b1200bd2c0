//! Error types for the chunked copy engine.

use thiserror::Error;

/// Main error type for chunked copy operations.
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Configuration error (impossible chunk bounds, bad stride, bad identifiers, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection or query error surfaced by a [`Connection`](crate::Connection).
    #[error("Connection error: {message}\n  Context: {context}")]
    Connection { message: String, context: String },

    /// The interrupt handler could not be installed.
    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[source] std::io::Error),

    /// IO error (operator console, option files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ChunkerError {
    /// Create a Connection error with context about where it occurred
    pub fn connection(message: impl ToString, context: impl Into<String>) -> Self {
        ChunkerError::Connection {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for chunker operations.
pub type Result<T> = std::result::Result<T, ChunkerError>;
