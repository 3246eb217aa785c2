//! On-disk configuration file (`carcass.toml`)
//!
//! Every field is optional; anything left out falls back to the built-in
//! defaults or is supplied by command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::descriptor::PluginReference;
use crate::error::{Error, Result};
use crate::family::{BackendFamily, ProxyFamily};

/// Config files larger than this are rejected before parsing.
pub const MAX_CONFIG_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory the server directories are created in
    pub root: Option<PathBuf>,
    /// Whether the Minecraft EULA is accepted
    pub eula: Option<bool>,
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub proxy: ProxySection,
    #[serde(default)]
    pub operators: OperatorSection,
    #[serde(default)]
    pub http: HttpSection,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    pub version: Option<String>,
    pub family: Option<BackendFamily>,
    pub memory_mb: Option<u32>,
    /// Plugin files staged into every backend
    #[serde(default)]
    pub plugins: Vec<PluginReference>,
    /// Plugin data folders staged into every backend
    #[serde(default)]
    pub plugin_folders: Vec<PluginReference>,
    pub servers: Option<Vec<BackendEntry>>,
}

/// A single backend declared in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendEntry {
    pub name: String,
    pub port: u16,
    /// Extra plugin files for this backend only
    #[serde(default)]
    pub plugins: Vec<PluginReference>,
    /// Extra plugin folders for this backend only
    #[serde(default)]
    pub plugin_folders: Vec<PluginReference>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxySection {
    pub name: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub version: Option<String>,
    pub family: Option<ProxyFamily>,
    pub memory_mb: Option<u32>,
    #[serde(default)]
    pub plugins: Vec<PluginReference>,
    #[serde(default)]
    pub plugin_folders: Vec<PluginReference>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorSection {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub uuids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Parse a config file from TOML text.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Load a `carcass.toml` from disk.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(carcass_fs::Error::io(path, e).into()),
    };

    if metadata.len() > MAX_CONFIG_SIZE {
        return Err(Error::ConfigTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_CONFIG_SIZE,
        });
    }

    tracing::debug!(?path, "Loading config file");
    let content = fs::read_to_string(path).map_err(|e| carcass_fs::Error::io(path, e))?;
    ConfigFile::parse(&content, path)
}
