//! Outcome of a provisioning run

use std::fmt;

use carcass_plugins::PluginWarning;

use crate::error::Error;

/// Which side of the network a server is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerRole {
    Backend,
    Proxy,
}

impl fmt::Display for ServerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerRole::Backend => write!(f, "backend"),
            ServerRole::Proxy => write!(f, "proxy"),
        }
    }
}

/// Steps every server goes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProvisionStage {
    /// Directory wiped and recreated
    Created,
    /// Family subdirectories exist
    Scaffolded,
    /// Server jar downloaded
    ArtifactFetched,
    /// Configuration documents written
    Configured,
    /// Plugins copied into `plugins/`
    PluginsStaged,
    /// `start.bat` and `start.ps1` written
    ScriptsEmitted,
}

impl fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProvisionStage::Created => "created",
            ProvisionStage::Scaffolded => "scaffolded",
            ProvisionStage::ArtifactFetched => "artifact fetched",
            ProvisionStage::Configured => "configured",
            ProvisionStage::PluginsStaged => "plugins staged",
            ProvisionStage::ScriptsEmitted => "scripts emitted",
        };
        f.write_str(name)
    }
}

/// What kind of run produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Full wipe-and-recreate of every server
    Provision,
    /// Only backend `plugins/` directories are replaced
    UpdatePlugins,
}

/// Why a single server could not be finished.
#[derive(Debug)]
pub struct ServerFailure {
    /// The stage that could not be reached
    pub stage: ProvisionStage,
    pub error: Error,
}

impl fmt::Display for ServerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed before '{}': {}", self.stage, self.error)
    }
}

/// Result of provisioning one server.
#[derive(Debug)]
pub struct ServerReport {
    pub name: String,
    pub role: ServerRole,
    /// Last stage completed
    pub reached: Option<ProvisionStage>,
    /// Entries copied into `plugins/`
    pub plugins_staged: usize,
    pub warnings: Vec<PluginWarning>,
    pub failure: Option<ServerFailure>,
}

impl ServerReport {
    pub fn new(name: impl Into<String>, role: ServerRole) -> Self {
        Self {
            name: name.into(),
            role,
            reached: None,
            plugins_staged: 0,
            warnings: Vec::new(),
            failure: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Result of a whole run, one report per server in processing order.
#[derive(Debug)]
pub struct RunReport {
    pub mode: RunMode,
    pub servers: Vec<ServerReport>,
}

impl RunReport {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            servers: Vec::new(),
        }
    }

    /// A run succeeds when no server failed. Warnings do not count.
    pub fn is_success(&self) -> bool {
        self.servers.iter().all(ServerReport::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ServerReport> {
        self.servers.iter().filter(|s| !s.is_success())
    }

    pub fn warning_count(&self) -> usize {
        self.servers.iter().map(|s| s.warnings.len()).sum()
    }

    pub fn server(&self, name: &str) -> Option<&ServerReport> {
        self.servers.iter().find(|s| s.name == name)
    }
}
