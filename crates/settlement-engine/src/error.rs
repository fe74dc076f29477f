//! Error types for the operator binary.
//!
//! [`EngineError`] wraps every failure mode of a single invocation so that
//! `main` can propagate with `?`.

/// Top-level error for the operator binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: settlement_core::ConfigError,
    },

    /// A service operation failed.
    #[error("{source}")]
    Service {
        /// The underlying service error.
        #[from]
        source: settlement_core::ServiceError,
    },

    /// The command line could not be understood.
    #[error("usage: {message}")]
    Usage {
        /// What was wrong with the arguments.
        message: String,
    },

    /// A blueprint file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file being read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// JSON input or output failed.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

impl EngineError {
    /// A [`EngineError::Usage`] with the given message.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }
}
