//! Provisioning configuration for Carcass.
//!
//! This crate owns the immutable [`ProvisioningConfig`] every provisioning
//! component reads from, the server descriptors it contains, and the layered
//! loading (built-in defaults, TOML file, command-line overrides) that
//! produces it.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod family;
pub mod file;
pub mod operator;

pub use config::{HttpSettings, Overrides, ProvisioningConfig, defaults};
pub use descriptor::{BackendDescriptor, PluginReference, ProxyDescriptor};
pub use error::{Error, Result};
pub use family::{BackendFamily, ProxyFamily};
pub use file::{ConfigFile, load_config_file};
pub use operator::{Operator, pair_operators};
