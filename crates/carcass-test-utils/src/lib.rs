//! Shared test utilities for the Carcass workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`plugins`]: [`PluginTree`] builder for plugin source directories
//! - [`source`]: [`FakeArtifactSource`], an offline [`carcass_artifacts::ArtifactSource`]
//! - [`network`]: [`network_config`] for a small provisioning topology

pub mod network;
pub mod plugins;
pub mod source;

pub use network::{network_config, network_config_with, references};
pub use plugins::PluginTree;
pub use source::{FailureMode, FakeArtifactSource};
