//! Provisioning engine for Carcass.
//!
//! Turns a validated [`carcass_meta::ProvisioningConfig`] into a directory
//! per server: the proxy and every backend get their artifact, agreeing
//! configuration, plugins and start scripts.
//!
//! # Modules
//!
//! - [`topology`]: routing table and backend trust settings
//! - [`document`]: properties, YAML and JSON documents
//! - [`launch`]: JVM arguments and start scripts
//! - [`provisioner`]: the per-server state machine and plugin-only updates
//! - [`report`]: run and per-server outcomes

pub mod document;
pub mod error;
pub mod launch;
pub mod provisioner;
pub mod report;
pub mod topology;

pub use error::{Error, Result};
pub use provisioner::Provisioner;
pub use report::{ProvisionStage, RunMode, RunReport, ServerFailure, ServerReport, ServerRole};
pub use topology::{
    BackendTrustConfig, RoutingEntry, RoutingTable, build_backend_trust_config,
    build_proxy_routing,
};
