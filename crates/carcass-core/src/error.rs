//! Error types for carcass-core

use std::path::PathBuf;

/// Result type for carcass-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while provisioning a network
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Minecraft EULA was not accepted; nothing was touched
    #[error("You must agree to the Minecraft EULA (--eula true)")]
    EulaNotAccepted,

    /// A proxy needs at least one backend to route to
    #[error("Proxy '{proxy}' has no backends to route to")]
    EmptyTopology { proxy: String },

    /// Plugin update requested for a server that was never provisioned
    #[error("Server '{server}' does not exist at {path}")]
    ServerMissing { server: String, path: PathBuf },

    /// A configuration document could not be rendered
    #[error("Failed to render {document}: {reason}")]
    Document { document: String, reason: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from carcass-fs
    #[error(transparent)]
    Fs(#[from] carcass_fs::Error),

    /// Configuration error from carcass-meta
    #[error(transparent)]
    Meta(#[from] carcass_meta::Error),

    /// Artifact resolution or download error
    #[error(transparent)]
    Artifacts(#[from] carcass_artifacts::Error),

    /// Plugin staging error
    #[error(transparent)]
    Plugins(#[from] carcass_plugins::Error),
}

impl Error {
    pub(crate) fn document(document: impl Into<String>, reason: impl ToString) -> Self {
        Self::Document {
            document: document.into(),
            reason: reason.to_string(),
        }
    }
}
