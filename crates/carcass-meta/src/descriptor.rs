//! Server descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::family::{BackendFamily, ProxyFamily};

/// A plugin file or folder reference exactly as the user wrote it.
///
/// Interpretation (literal file, literal directory, or `<dir>/<prefix>*`
/// pattern) happens lazily when plugins are staged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginReference(String);

impl PluginReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginReference {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PluginReference {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One backend server in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
    /// Unique within a run. Used as directory name and routing key.
    pub name: String,
    /// Unique within a run.
    pub port: u16,
    pub family: BackendFamily,
    pub memory_mb: u32,
    pub plugin_files: Vec<PluginReference>,
    pub plugin_folders: Vec<PluginReference>,
}

/// The proxy fronting every backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub family: ProxyFamily,
    pub memory_mb: u32,
    pub plugin_files: Vec<PluginReference>,
    pub plugin_folders: Vec<PluginReference>,
}

impl ProxyDescriptor {
    /// `host:port` the proxy listens on.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
