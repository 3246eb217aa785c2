//! Build resolution: version → latest build → download URL

use crate::client::PaperClient;
use crate::error::{Error, Result};
use crate::types::{ArtifactIdentity, BuildRecord, BuildsResponse, ResolvedArtifact};

/// Download URL for a specific build. Pure string construction.
pub fn build_download_url(base_url: &str, project: &str, version: &str, build: u32) -> String {
    format!(
        "{}/projects/{project}/versions/{version}/builds/{build}/downloads/{}",
        base_url.trim_end_matches('/'),
        artifact_file_name(project, version, build)
    )
}

pub(crate) fn artifact_file_name(project: &str, version: &str, build: u32) -> String {
    format!("{project}-{version}-{build}.jar")
}

/// The latest build is the last record in the order the metadata service
/// returned them. The list is deliberately not sorted.
pub fn latest_build(records: &[BuildRecord]) -> Option<u32> {
    records.last().map(|record| record.build)
}

impl PaperClient {
    /// Fetch the build list for a project version and return the latest build.
    pub async fn resolve_latest_build(&self, project: &str, version: &str) -> Result<u32> {
        let unavailable = |reason: String| Error::MetadataUnavailable {
            project: project.to_string(),
            version: version.to_string(),
            reason,
        };

        let url = self.builds_url(project, version);
        tracing::debug!(%url, "Fetching build metadata");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(unavailable(format!("{status}: {body}")));
        }

        let metadata: BuildsResponse = resp
            .json()
            .await
            .map_err(|e| unavailable(format!("malformed metadata: {e}")))?;

        let build = latest_build(&metadata.builds).ok_or_else(|| Error::NoBuildsFound {
            project: project.to_string(),
            version: version.to_string(),
        })?;

        tracing::debug!(project, version, build, "Resolved latest build");
        Ok(build)
    }

    /// Resolve an identity to its latest build and download location.
    pub async fn resolve(&self, identity: &ArtifactIdentity) -> Result<ResolvedArtifact> {
        let build = self
            .resolve_latest_build(&identity.project, &identity.version)
            .await?;

        Ok(ResolvedArtifact {
            identity: identity.clone(),
            build,
            file_name: artifact_file_name(&identity.project, &identity.version, build),
            download_url: build_download_url(
                &self.base_url,
                &identity.project,
                &identity.version,
                build,
            ),
        })
    }
}
