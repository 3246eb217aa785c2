//! Command implementations for the Carcass CLI

mod provision;

pub use provision::{load_config, run_provision, run_update_plugins};
