#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("build metadata for {project} {version} unavailable: {reason}")]
    MetadataUnavailable {
        project: String,
        version: String,
        reason: String,
    },

    #[error("no builds found for {project} {version}")]
    NoBuildsFound { project: String, version: String },

    #[error("download of {url} failed: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
