use std::path::Path;

use async_trait::async_trait;

use crate::client::PaperClient;
use crate::error::Result;
use crate::types::{ArtifactIdentity, ResolvedArtifact};

/// Anything that can resolve and deliver server artifacts.
///
/// The provisioner only talks to this trait, so tests can stage artifacts
/// without a network.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    async fn resolve(&self, identity: &ArtifactIdentity) -> Result<ResolvedArtifact>;

    /// Write the artifact to `destination`, returning the bytes written.
    async fn fetch(&self, artifact: &ResolvedArtifact, destination: &Path) -> Result<u64>;
}

#[async_trait]
impl ArtifactSource for PaperClient {
    async fn resolve(&self, identity: &ArtifactIdentity) -> Result<ResolvedArtifact> {
        PaperClient::resolve(self, identity).await
    }

    async fn fetch(&self, artifact: &ResolvedArtifact, destination: &Path) -> Result<u64> {
        PaperClient::fetch(self, &artifact.download_url, destination).await
    }
}
