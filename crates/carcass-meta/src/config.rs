//! The immutable provisioning configuration
//!
//! A [`ProvisioningConfig`] is resolved once per run from three layers,
//! lowest precedence first:
//!
//! 1. built-in [`defaults`]
//! 2. an optional [`ConfigFile`]
//! 3. command-line [`Overrides`]
//!
//! It is validated as a whole before anything touches the filesystem and is
//! only ever shared by reference afterwards.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;

use carcass_fs::{NormalizedPath, validate_segment};

use crate::descriptor::{BackendDescriptor, PluginReference, ProxyDescriptor};
use crate::error::{Error, Result};
use crate::family::{BackendFamily, ProxyFamily};
use crate::file::{BackendEntry, ConfigFile};
use crate::operator::{Operator, pair_operators};

/// Built-in defaults, matching a stock two-backend network.
pub mod defaults {
    pub const ROOT: &str = "./servers/";
    pub const BACKEND_VERSION: &str = "1.19.1";
    pub const PROXY_VERSION: &str = "1.19";
    pub const BACKEND_NAMES: [&str; 2] = ["alpha", "beta"];
    pub const BACKEND_PORTS: [u16; 2] = [25566, 25567];
    pub const BACKEND_MEMORY_MB: u32 = 2048;
    pub const PROXY_NAME: &str = "proxy";
    pub const PROXY_HOST: &str = "0.0.0.0";
    pub const PROXY_PORT: u16 = 25565;
    pub const PROXY_MEMORY_MB: u32 = 512;
    pub const METADATA_BASE_URL: &str = "https://api.papermc.io/v2";
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;
}

/// Values supplied on the command line. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub eula: Option<bool>,
    pub backend_family: Option<BackendFamily>,
    pub proxy_family: Option<ProxyFamily>,
    pub backend_names: Option<Vec<String>>,
    pub backend_ports: Option<Vec<u16>>,
    pub backend_version: Option<String>,
    pub proxy_version: Option<String>,
    pub backend_memory_mb: Option<u32>,
    pub proxy_memory_mb: Option<u32>,
    pub proxy_name: Option<String>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    pub backend_plugins: Option<Vec<PluginReference>>,
    pub backend_plugin_folders: Option<Vec<PluginReference>>,
    pub proxy_plugins: Option<Vec<PluginReference>>,
    pub proxy_plugin_folders: Option<Vec<PluginReference>>,
    pub operator_names: Option<Vec<String>>,
    pub operator_uuids: Option<Vec<String>>,
}

/// Where artifacts are resolved from and how long network calls may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: defaults::METADATA_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Complete input to a provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    /// Directory every server directory is created under
    pub root: NormalizedPath,
    /// Version identifier used for backend artifacts
    pub backend_version: String,
    /// Version identifier used for the proxy artifact
    pub proxy_version: String,
    pub eula_accepted: bool,
    /// Backends in provisioning order. The first one is the proxy's default.
    pub backends: Vec<BackendDescriptor>,
    pub proxy: ProxyDescriptor,
    pub operators: Vec<Operator>,
    pub http: HttpSettings,
}

impl ProvisioningConfig {
    /// Resolve and validate a configuration from all layers.
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self> {
        let root = overrides
            .root
            .or(file.root)
            .map(NormalizedPath::new)
            .unwrap_or_else(|| NormalizedPath::new(defaults::ROOT));

        let eula_accepted = overrides.eula.or(file.eula).unwrap_or(false);

        let backend_family = overrides
            .backend_family
            .or(file.backend.family)
            .unwrap_or_default();
        let backend_memory_mb = overrides
            .backend_memory_mb
            .or(file.backend.memory_mb)
            .unwrap_or(defaults::BACKEND_MEMORY_MB);
        let backend_plugins = overrides
            .backend_plugins
            .unwrap_or(file.backend.plugins);
        let backend_plugin_folders = overrides
            .backend_plugin_folders
            .unwrap_or(file.backend.plugin_folders);

        let entries = resolve_backend_entries(
            file.backend.servers,
            overrides.backend_names,
            overrides.backend_ports,
        )?;

        let backends = entries
            .into_iter()
            .map(|entry| BackendDescriptor {
                name: entry.name,
                port: entry.port,
                family: backend_family,
                memory_mb: backend_memory_mb,
                plugin_files: backend_plugins
                    .iter()
                    .cloned()
                    .chain(entry.plugins)
                    .collect(),
                plugin_folders: backend_plugin_folders
                    .iter()
                    .cloned()
                    .chain(entry.plugin_folders)
                    .collect(),
            })
            .collect();

        let proxy = ProxyDescriptor {
            name: overrides
                .proxy_name
                .or(file.proxy.name)
                .unwrap_or_else(|| defaults::PROXY_NAME.to_string()),
            host: overrides
                .proxy_host
                .or(file.proxy.host)
                .unwrap_or_else(|| defaults::PROXY_HOST.to_string()),
            port: overrides
                .proxy_port
                .or(file.proxy.port)
                .unwrap_or(defaults::PROXY_PORT),
            family: overrides
                .proxy_family
                .or(file.proxy.family)
                .unwrap_or_default(),
            memory_mb: overrides
                .proxy_memory_mb
                .or(file.proxy.memory_mb)
                .unwrap_or(defaults::PROXY_MEMORY_MB),
            plugin_files: overrides.proxy_plugins.unwrap_or(file.proxy.plugins),
            plugin_folders: overrides
                .proxy_plugin_folders
                .unwrap_or(file.proxy.plugin_folders),
        };

        let operator_names = overrides.operator_names.unwrap_or(file.operators.names);
        let operator_uuids = overrides.operator_uuids.unwrap_or(file.operators.uuids);
        let operators = pair_operators(&operator_names, &operator_uuids);

        let http_defaults = HttpSettings::default();
        let http = HttpSettings {
            base_url: file
                .http
                .base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(http_defaults.base_url),
            connect_timeout: file
                .http
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(http_defaults.connect_timeout),
            request_timeout: file
                .http
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(http_defaults.request_timeout),
        };

        let config = Self {
            root,
            backend_version: overrides
                .backend_version
                .or(file.backend.version)
                .unwrap_or_else(|| defaults::BACKEND_VERSION.to_string()),
            proxy_version: overrides
                .proxy_version
                .or(file.proxy.version)
                .unwrap_or_else(|| defaults::PROXY_VERSION.to_string()),
            eula_accepted,
            backends,
            proxy,
            operators,
            http,
        };

        config.validate()?;
        Ok(config)
    }

    /// Directory of the named server under the output root.
    pub fn server_dir(&self, name: &str) -> NormalizedPath {
        self.root.join(name)
    }

    /// Check cross-server invariants.
    ///
    /// Duplicate names or ports would make two servers share a directory or
    /// a listening socket, so they are rejected rather than overwritten.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut ports = HashSet::new();

        for backend in &self.backends {
            validate_segment(&backend.name).map_err(|e| Error::validation(e.to_string()))?;
            if !names.insert(backend.name.as_str()) {
                return Err(Error::validation(format!(
                    "duplicate backend name '{}'",
                    backend.name
                )));
            }
            if backend.port == 0 {
                return Err(Error::validation(format!(
                    "backend '{}' has port 0",
                    backend.name
                )));
            }
            if !ports.insert(backend.port) {
                return Err(Error::validation(format!(
                    "duplicate port {} (backend '{}')",
                    backend.port, backend.name
                )));
            }
            if backend.memory_mb == 0 {
                return Err(Error::validation(format!(
                    "backend '{}' has no memory allocated",
                    backend.name
                )));
            }
        }

        validate_segment(&self.proxy.name).map_err(|e| Error::validation(e.to_string()))?;
        if names.contains(self.proxy.name.as_str()) {
            return Err(Error::validation(format!(
                "proxy name '{}' is also used by a backend",
                self.proxy.name
            )));
        }
        if self.proxy.port == 0 || ports.contains(&self.proxy.port) {
            return Err(Error::validation(format!(
                "proxy port {} is invalid or used by a backend",
                self.proxy.port
            )));
        }
        if self.proxy.host.trim().is_empty() {
            return Err(Error::validation("proxy host must not be empty"));
        }
        if self.proxy.memory_mb == 0 {
            return Err(Error::validation("proxy has no memory allocated"));
        }

        for operator in &self.operators {
            uuid::Uuid::parse_str(&operator.uuid).map_err(|e| {
                Error::validation(format!(
                    "operator '{}' has invalid uuid '{}': {}",
                    operator.name, operator.uuid, e
                ))
            })?;
        }

        Ok(())
    }
}

/// Decide the backend list.
///
/// Command-line names or ports replace the file's list wholesale; any side
/// not given on the command line falls back to the file, then the defaults.
/// Per-backend plugin extras from the file follow their backend by name.
fn resolve_backend_entries(
    file_servers: Option<Vec<BackendEntry>>,
    names: Option<Vec<String>>,
    ports: Option<Vec<u16>>,
) -> Result<Vec<BackendEntry>> {
    if names.is_none() && ports.is_none() {
        return Ok(file_servers.unwrap_or_else(default_entries));
    }

    let base = file_servers.unwrap_or_else(default_entries);
    let names = names.unwrap_or_else(|| base.iter().map(|e| e.name.clone()).collect());
    let ports = ports.unwrap_or_else(|| base.iter().map(|e| e.port).collect());

    if names.len() != ports.len() {
        return Err(Error::validation(format!(
            "{} backend names but {} backend ports",
            names.len(),
            ports.len()
        )));
    }

    let mut extras: HashMap<String, BackendEntry> =
        base.into_iter().map(|e| (e.name.clone(), e)).collect();

    Ok(names
        .into_iter()
        .zip(ports)
        .map(|(name, port)| {
            let (plugins, plugin_folders) = extras
                .remove(&name)
                .map(|e| (e.plugins, e.plugin_folders))
                .unwrap_or_default();
            BackendEntry {
                name,
                port,
                plugins,
                plugin_folders,
            }
        })
        .collect())
}

fn default_entries() -> Vec<BackendEntry> {
    defaults::BACKEND_NAMES
        .iter()
        .zip(defaults::BACKEND_PORTS)
        .map(|(name, port)| BackendEntry {
            name: name.to_string(),
            port,
            plugins: Vec::new(),
            plugin_folders: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProvisioningConfig::resolve(ConfigFile::default(), Overrides::default()).unwrap();

        assert_eq!(config.root.as_str(), "./servers/");
        assert!(!config.eula_accepted);
        assert_eq!(config.backend_version, "1.19.1");
        assert_eq!(config.proxy_version, "1.19");
        let names: Vec<_> = config.backends.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(config.backends[0].port, 25566);
        assert_eq!(config.backends[1].memory_mb, 2048);
        assert_eq!(config.proxy.port, 25565);
        assert_eq!(config.proxy.memory_mb, 512);
        assert_eq!(config.http.base_url, "https://api.papermc.io/v2");
    }

    #[test]
    fn test_server_dir_joins_root() {
        let config = ProvisioningConfig::resolve(ConfigFile::default(), Overrides::default()).unwrap();
        assert_eq!(config.server_dir("alpha").as_str(), "./servers/alpha");
    }

    #[test]
    fn test_mismatched_names_and_ports_rejected() {
        let overrides = Overrides {
            backend_names: Some(vec!["a".into(), "b".into(), "c".into()]),
            ..Default::default()
        };
        let err = ProvisioningConfig::resolve(ConfigFile::default(), overrides).unwrap_err();
        assert!(err.to_string().contains("3 backend names but 2 backend ports"));
    }

    #[test]
    fn test_global_plugins_precede_per_backend_extras() {
        let file = ConfigFile {
            backend: crate::file::BackendSection {
                plugins: vec!["jars/common.jar".into()],
                servers: Some(vec![BackendEntry {
                    name: "lobby".into(),
                    port: 30000,
                    plugins: vec!["jars/lobby.jar".into()],
                    plugin_folders: vec![],
                }]),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = ProvisioningConfig::resolve(file, Overrides::default()).unwrap();

        let plugins: Vec<_> = config.backends[0]
            .plugin_files
            .iter()
            .map(|p| p.as_str())
            .collect();
        assert_eq!(plugins, vec!["jars/common.jar", "jars/lobby.jar"]);
    }
}
