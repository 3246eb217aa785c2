//! Error types for carcass-plugins

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Plugin folder destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    #[error("Plugin folder {path} has no usable name")]
    UnnamedFolder { path: PathBuf },

    #[error("Filesystem error: {0}")]
    Fs(#[from] carcass_fs::Error),
}
