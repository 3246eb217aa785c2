//! Plugin staging for Carcass.
//!
//! Resolves user-supplied plugin references (literal files, literal
//! folders, and `<dir>/<prefix>*` patterns) and copies them into a server's
//! `plugins/` directory. Unresolvable references become [`PluginWarning`]s;
//! only a folder that would overwrite an existing one is fatal.

pub mod error;
pub mod reference;
pub mod stager;

pub use error::{Error, Result};
pub use reference::ReferencePattern;
pub use stager::{PluginWarning, StagingReport, UnresolvedReason, stage_plugins};
