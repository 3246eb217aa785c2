//! Provisioning configurations for tests.

use std::path::Path;

use carcass_meta::{ConfigFile, Overrides, PluginReference, ProvisioningConfig};

/// A validated two-backend network (`alpha` on 25566, `beta` on 25567)
/// rooted at `root`, with the EULA accepted.
///
/// # Panics
/// Panics if the resulting configuration does not validate.
pub fn network_config(root: &Path) -> ProvisioningConfig {
    network_config_with(root, Overrides::default())
}

/// Like [`network_config`], with extra overrides layered on top.
///
/// `root` and `eula` are always taken from the arguments unless the
/// overrides set them.
///
/// # Panics
/// Panics if the resulting configuration does not validate.
pub fn network_config_with(root: &Path, overrides: Overrides) -> ProvisioningConfig {
    let overrides = Overrides {
        root: overrides.root.or_else(|| Some(root.to_path_buf())),
        eula: overrides.eula.or(Some(true)),
        ..overrides
    };
    ProvisioningConfig::resolve(ConfigFile::default(), overrides)
        .unwrap_or_else(|e| panic!("network_config: invalid test configuration: {e}"))
}

/// Plugin references from plain strings.
pub fn references(raw: &[&str]) -> Vec<PluginReference> {
    raw.iter().map(|r| PluginReference::from(*r)).collect()
}
