//! [`FakeArtifactSource`]: resolves and "downloads" artifacts without a network.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use carcass_artifacts::{
    ArtifactIdentity, ArtifactSource, Error, ResolvedArtifact, Result, build_download_url,
};

const FAKE_BASE_URL: &str = "http://artifacts.invalid/v2";

/// How a project should fail, when it should.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    MetadataUnavailable,
    NoBuilds,
    Download,
}

/// An [`ArtifactSource`] that pins every project to one build and writes a
/// fixed body on fetch.
///
/// Records every fetch so tests can assert which artifacts were delivered.
pub struct FakeArtifactSource {
    build: u32,
    body: Vec<u8>,
    failures: HashMap<String, FailureMode>,
    fetched: Mutex<Vec<String>>,
}

impl Default for FakeArtifactSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeArtifactSource {
    pub fn new() -> Self {
        Self {
            build: 1,
            body: b"fake-jar".to_vec(),
            failures: HashMap::new(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn with_build(mut self, build: u32) -> Self {
        self.build = build;
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Make every request for `project` fail the given way.
    pub fn failing(mut self, project: &str, mode: FailureMode) -> Self {
        self.failures.insert(project.to_string(), mode);
        self
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// File names of every artifact fetched so far, in order.
    ///
    /// # Panics
    /// Panics if the record lock is poisoned.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched
            .lock()
            .unwrap_or_else(|e| panic!("FakeArtifactSource::fetched: {e}"))
            .clone()
    }
}

#[async_trait]
impl ArtifactSource for FakeArtifactSource {
    async fn resolve(&self, identity: &ArtifactIdentity) -> Result<ResolvedArtifact> {
        match self.failures.get(&identity.project) {
            Some(FailureMode::MetadataUnavailable) => {
                return Err(Error::MetadataUnavailable {
                    project: identity.project.clone(),
                    version: identity.version.clone(),
                    reason: "connection refused".to_string(),
                });
            }
            Some(FailureMode::NoBuilds) => {
                return Err(Error::NoBuildsFound {
                    project: identity.project.clone(),
                    version: identity.version.clone(),
                });
            }
            _ => {}
        }

        let file_name = format!(
            "{}-{}-{}.jar",
            identity.project, identity.version, self.build
        );
        Ok(ResolvedArtifact {
            identity: identity.clone(),
            build: self.build,
            file_name,
            download_url: build_download_url(
                FAKE_BASE_URL,
                &identity.project,
                &identity.version,
                self.build,
            ),
        })
    }

    async fn fetch(&self, artifact: &ResolvedArtifact, destination: &Path) -> Result<u64> {
        if self.failures.get(&artifact.identity.project) == Some(&FailureMode::Download) {
            return Err(Error::DownloadFailed {
                url: artifact.download_url.clone(),
                reason: "500 Internal Server Error".to_string(),
            });
        }

        tokio::fs::write(destination, &self.body)
            .await
            .map_err(|e| Error::DownloadFailed {
                url: artifact.download_url.clone(),
                reason: e.to_string(),
            })?;

        self.fetched
            .lock()
            .unwrap_or_else(|e| panic!("FakeArtifactSource::fetch: {e}"))
            .push(artifact.file_name.clone());
        Ok(self.body.len() as u64)
    }
}
