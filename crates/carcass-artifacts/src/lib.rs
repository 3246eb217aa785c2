//! Typed client for the PaperMC downloads API.
//!
//! Covers the subset needed to provision servers: resolving the latest
//! build of a project version and streaming its jar to disk.

mod client;
mod error;
mod fetcher;
mod resolver;
mod source;
mod types;

pub use client::{ClientConfig, PaperClient};
pub use error::{Error, Result};
pub use resolver::{build_download_url, latest_build};
pub use source::ArtifactSource;
pub use types::*;
