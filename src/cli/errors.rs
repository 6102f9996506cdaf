use thiserror::Error;

use crate::{
    config::ConfigError,
    document::DocumentError,
    output::OutputError,
    semantic::{EmbeddingError, SearchError},
};

/// Domain-specific errors for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Nothing to search: {message}")]
    EmptyCorpus { message: String },

    #[error("Document error: {message}")]
    Document { message: String },

    #[error("Embedding provider failed: {message}")]
    Provider { message: String },

    #[error("Could not write results: {message}")]
    OutputWrite { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CliError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

impl From<DocumentError> for CliError {
    fn from(err: DocumentError) -> Self {
        if err.is_empty_corpus() {
            Self::EmptyCorpus { message: err.to_string() }
        } else {
            Self::Document { message: err.to_string() }
        }
    }
}

impl From<EmbeddingError> for CliError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::InvalidModel(message) => Self::Configuration { message },
            other => Self::Provider { message: other.to_string() },
        }
    }
}

impl From<SearchError> for CliError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyCorpus => Self::EmptyCorpus { message: err.to_string() },
            SearchError::Provider(e) => e.into(),
            SearchError::VectorCountMismatch { .. } => Self::Provider { message: err.to_string() },
            SearchError::Rank(e) => Self::internal(e.to_string()),
        }
    }
}

impl From<OutputError> for CliError {
    fn from(err: OutputError) -> Self {
        Self::OutputWrite { message: err.to_string() }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}
