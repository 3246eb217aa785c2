//! CLI argument parsing using clap derive

use std::path::PathBuf;

use carcass_meta::{BackendFamily, Overrides, PluginReference, ProxyFamily};
use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};

/// Carcass - Spin up a local network of Minecraft servers behind a proxy
#[derive(Parser, Debug)]
#[command(name = "carcass")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// TOML configuration file (defaults to ./carcass.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// The command to run (default: provision)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Wipe and recreate every server directory
    Provision,

    /// Replace only the plugins/ directory of existing backends
    ///
    /// Server configuration, jars and worlds are left untouched.
    UpdatePlugins,
}

/// Network layout flags. Anything left out falls back to the config file,
/// then to built-in defaults.
#[derive(Args, Debug, Default)]
pub struct NetworkArgs {
    /// Whether you agree to the Minecraft EULA
    #[arg(
        short,
        long,
        global = true,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    pub eula: Option<bool>,

    /// Type of backend servers (e.g. paper)
    #[arg(short = 't', long = "type", visible_alias = "backend-type", global = true)]
    pub backend_type: Option<BackendFamily>,

    /// Type of proxy server (e.g. waterfall)
    #[arg(long, global = true)]
    pub proxy_type: Option<ProxyFamily>,

    /// Names of backend servers
    #[arg(short, long, global = true, num_args = 1..)]
    pub backends: Option<Vec<String>>,

    /// Ports of backend servers, one per name
    #[arg(short, long, visible_alias = "backend-ports", global = true, num_args = 1..)]
    pub ports: Option<Vec<u16>>,

    /// Minecraft version to run (e.g. 1.19.2)
    #[arg(short = 'v', long, global = true)]
    pub minecraft_version: Option<String>,

    /// Proxy version to run (e.g. 1.19)
    #[arg(long, global = true)]
    pub proxy_version: Option<String>,

    /// RAM in MB for each backend server
    #[arg(short, long, visible_alias = "backend-ram", global = true)]
    pub ram: Option<u32>,

    /// RAM in MB for the proxy server
    #[arg(long, global = true)]
    pub proxy_ram: Option<u32>,

    /// Port of the proxy server
    #[arg(long, global = true)]
    pub proxy_port: Option<u16>,

    /// Host the proxy binds to
    #[arg(long, global = true)]
    pub proxy_host: Option<String>,

    /// Name of the proxy server
    #[arg(long, global = true)]
    pub proxy_name: Option<String>,

    /// Backend plugin jars; `dir/prefix*` picks the first match
    #[arg(long, visible_alias = "backend-plugins", global = true, num_args = 1..)]
    pub plugins: Option<Vec<String>>,

    /// Proxy plugin jars; `dir/prefix*` picks the first match
    #[arg(long, global = true, num_args = 1..)]
    pub proxy_plugins: Option<Vec<String>>,

    /// Backend plugin data folders
    #[arg(long, visible_alias = "backend-plugin-folders", global = true, num_args = 1..)]
    pub plugin_folders: Option<Vec<String>>,

    /// Proxy plugin data folders
    #[arg(long, global = true, num_args = 1..)]
    pub proxy_plugin_folders: Option<Vec<String>>,

    /// Directory to create the server folders in
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Operator names, paired in order with --op-uuids
    #[arg(long, global = true, num_args = 1..)]
    pub op_names: Option<Vec<String>>,

    /// Operator UUIDs, paired in order with --op-names
    #[arg(long, global = true, num_args = 1..)]
    pub op_uuids: Option<Vec<String>>,
}

fn references(raw: Option<Vec<String>>) -> Option<Vec<PluginReference>> {
    raw.map(|refs| refs.into_iter().map(PluginReference::from).collect())
}

impl NetworkArgs {
    /// The command-line layer of the configuration.
    pub fn into_overrides(self) -> Overrides {
        Overrides {
            root: self.output,
            eula: self.eula,
            backend_family: self.backend_type,
            proxy_family: self.proxy_type,
            backend_names: self.backends,
            backend_ports: self.ports,
            backend_version: self.minecraft_version,
            proxy_version: self.proxy_version,
            backend_memory_mb: self.ram,
            proxy_memory_mb: self.proxy_ram,
            proxy_name: self.proxy_name,
            proxy_host: self.proxy_host,
            proxy_port: self.proxy_port,
            backend_plugins: references(self.plugins),
            backend_plugin_folders: references(self.plugin_folders),
            proxy_plugins: references(self.proxy_plugins),
            proxy_plugin_folders: references(self.proxy_plugin_folders),
            operator_names: self.op_names,
            operator_uuids: self.op_uuids,
        }
    }
}
