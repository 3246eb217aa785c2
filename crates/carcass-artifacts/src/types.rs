use serde::Deserialize;

// ── Artifact identity ────────────────────────────────────────────────

/// A project version whose latest build should be provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactIdentity {
    pub project: String,
    pub version: String,
}

impl ArtifactIdentity {
    pub fn new(project: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            version: version.into(),
        }
    }
}

/// An identity pinned to a concrete build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub identity: ArtifactIdentity,
    pub build: u32,
    /// Remote file name, `{project}-{version}-{build}.jar`
    pub file_name: String,
    pub download_url: String,
}

// ── Metadata wire types ──────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct BuildsResponse {
    pub builds: Vec<BuildRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildRecord {
    pub build: u32,
    #[serde(default)]
    pub channel: Option<String>,
}
