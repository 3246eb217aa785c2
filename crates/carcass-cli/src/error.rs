//! Error types for carcass-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from carcass-core
    #[error(transparent)]
    Core(#[from] carcass_core::Error),

    /// Configuration error from carcass-meta
    #[error(transparent)]
    Meta(#[from] carcass_meta::Error),

    /// HTTP client could not be built
    #[error(transparent)]
    Artifacts(#[from] carcass_artifacts::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
