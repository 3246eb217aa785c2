//! Cross-crate scenarios: fixture config file -> resolved configuration ->
//! provisioned network on disk.

use std::fs;
use std::path::{Path, PathBuf};

use carcass_core::{ProvisionStage, Provisioner};
use carcass_fs::NormalizedPath;
use carcass_meta::{ConfigFile, Overrides, PluginReference, ProvisioningConfig, load_config_file};
use carcass_test_utils::FakeArtifactSource;
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

fn plugin_fixture(relative: &str) -> PluginReference {
    let path = fixtures().join("plugins").join(relative);
    PluginReference::new(NormalizedPath::new(path).as_str())
}

/// Load a network fixture with its relative plugin references anchored at
/// the plugin fixture tree.
fn load_network(name: &str) -> ConfigFile {
    let mut file = load_config_file(&fixtures().join("networks").join(name)).unwrap();
    for server in file.backend.servers.iter_mut().flatten() {
        server.plugins = server
            .plugins
            .iter()
            .map(|r| plugin_fixture(r.as_str()))
            .collect();
        server.plugin_folders = server
            .plugin_folders
            .iter()
            .map(|r| plugin_fixture(r.as_str()))
            .collect();
    }
    file
}

fn resolve_into(file: ConfigFile, root: &Path, overrides: Overrides) -> ProvisioningConfig {
    ProvisioningConfig::resolve(
        file,
        Overrides {
            root: Some(root.to_path_buf()),
            ..overrides
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_survival_network_from_fixture() {
    let temp = TempDir::new().unwrap();
    let config = resolve_into(load_network("survival.toml"), temp.path(), Overrides::default());
    let source = FakeArtifactSource::new().with_build(77);

    let run = Provisioner::new(&config, &source).provision().await.unwrap();

    assert!(run.is_success());
    let order: Vec<&str> = run.servers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(order, vec!["lobby", "survival", "creative", "hub"]);
    assert!(
        run.servers
            .iter()
            .all(|s| s.reached == Some(ProvisionStage::ScriptsEmitted))
    );

    // Routing
    let hub: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(temp.path().join("hub/config.yml")).unwrap())
            .unwrap();
    let servers: Vec<&str> = hub["servers"]
        .as_mapping()
        .unwrap()
        .keys()
        .map(|k| k.as_str().unwrap())
        .collect();
    assert_eq!(servers, vec!["lobby", "survival", "creative"]);
    assert_eq!(hub["listeners"][0]["priorities"][0].as_str(), Some("lobby"));
    assert_eq!(hub["listeners"][0]["host"].as_str(), Some("127.0.0.1:30000"));
    assert_eq!(
        hub["servers"]["creative"]["address"].as_str(),
        Some("localhost:30003")
    );

    // Per-backend plugin extras
    let creative_plugins = temp.path().join("creative/plugins");
    assert_eq!(
        fs::read_to_string(creative_plugins.join("worldedit-bukkit-7.2.12.jar")).unwrap(),
        "worldedit 7.2.12"
    );
    assert!(!creative_plugins.join("worldedit-bukkit-7.3.0.jar").exists());
    assert!(
        temp.path()
            .join("survival/plugins/Essentials/kits.yml")
            .is_file()
    );
    assert_eq!(
        fs::read_dir(temp.path().join("lobby/plugins")).unwrap().count(),
        0
    );

    // Operators: the third name has no uuid
    let ops: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("lobby/ops.json")).unwrap())
            .unwrap();
    assert_eq!(ops.as_array().unwrap().len(), 2);

    // Launch profiles
    let lobby_start = fs::read_to_string(temp.path().join("lobby/start.bat")).unwrap();
    assert!(lobby_start.contains("-Xms3072M -Xmx3072M"));
    let hub_start = fs::read_to_string(temp.path().join("hub/start.ps1")).unwrap();
    assert!(hub_start.contains("-Xmx768M"));
    assert!(hub_start.contains("./waterfall.jar"));

    assert_eq!(
        fs::read_to_string(temp.path().join("lobby/server.properties"))
            .unwrap()
            .lines()
            .find(|l| l.starts_with("server-port=")),
        Some("server-port=30001")
    );
}

#[tokio::test]
async fn test_update_plugins_keeps_server_state() {
    let temp = TempDir::new().unwrap();
    let source = FakeArtifactSource::new();

    let config = resolve_into(load_network("survival.toml"), temp.path(), Overrides::default());
    Provisioner::new(&config, &source).provision().await.unwrap();

    let eula = fs::read(temp.path().join("survival/eula.txt")).unwrap();
    let properties = fs::read(temp.path().join("survival/server.properties")).unwrap();

    let config = resolve_into(
        load_network("survival.toml"),
        temp.path(),
        Overrides {
            backend_plugins: Some(vec![plugin_fixture("jars/LuckPerms*")]),
            ..Default::default()
        },
    );
    let run = Provisioner::new(&config, &source)
        .update_plugins()
        .await
        .unwrap();

    assert!(run.is_success());
    assert_eq!(fs::read(temp.path().join("survival/eula.txt")).unwrap(), eula);
    assert_eq!(
        fs::read(temp.path().join("survival/server.properties")).unwrap(),
        properties
    );
    for backend in ["lobby", "survival", "creative"] {
        assert!(
            temp.path()
                .join(backend)
                .join("plugins/LuckPerms-Bukkit-5.4.jar")
                .is_file(),
            "{backend} is missing LuckPerms"
        );
    }
    // per-backend extras are staged again alongside the global list
    assert!(
        temp.path()
            .join("survival/plugins/Essentials/motd.txt")
            .is_file()
    );
}

#[test]
fn test_duplicate_port_fixture_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file = load_network("duplicate-port.toml");
    let err = ProvisioningConfig::resolve(
        file,
        Overrides {
            root: Some(temp.path().to_path_buf()),
            ..Default::default()
        },
    )
    .unwrap_err();

    assert!(matches!(err, carcass_meta::Error::Validation { .. }));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_key_fixture_is_rejected() {
    let err = load_config_file(&fixtures().join("networks/unknown-key.toml")).unwrap_err();
    assert!(matches!(err, carcass_meta::Error::InvalidConfig { .. }));
}
