//! Integration tests for configuration loading and layering

use carcass_meta::{
    BackendFamily, ConfigFile, Error, Overrides, ProvisioningConfig, load_config_file,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join("carcass.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_full_config_file() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
root = "./net"
eula = true

[backend]
version = "1.20.4"
family = "paper"
memory_mb = 4096
plugins = ["jars/worldedit*"]
plugin_folders = ["data/WorldEdit"]

[[backend.servers]]
name = "lobby"
port = 30001

[[backend.servers]]
name = "survival"
port = 30002
plugins = ["jars/survival-only.jar"]

[proxy]
name = "edge"
host = "127.0.0.1"
port = 30000
version = "1.20"
memory_mb = 1024

[operators]
names = ["Notch"]
uuids = ["069a79f4-44e9-4726-a5be-fca90e38aaf5"]

[http]
base_url = "http://localhost:9999/v2/"
connect_timeout_secs = 3
request_timeout_secs = 30
"#,
    );

    let file = load_config_file(&path).unwrap();
    let config = ProvisioningConfig::resolve(file, Overrides::default()).unwrap();

    assert_eq!(config.root.as_str(), "./net");
    assert!(config.eula_accepted);
    assert_eq!(config.backend_version, "1.20.4");
    assert_eq!(config.proxy_version, "1.20");
    assert_eq!(config.backends.len(), 2);
    assert_eq!(config.backends[0].name, "lobby");
    assert_eq!(config.backends[0].memory_mb, 4096);
    assert_eq!(config.backends[0].family, BackendFamily::Paper);
    assert_eq!(config.backends[0].plugin_files.len(), 1);
    assert_eq!(config.backends[1].plugin_files.len(), 2);
    assert_eq!(config.backends[1].plugin_folders[0].as_str(), "data/WorldEdit");
    assert_eq!(config.proxy.name, "edge");
    assert_eq!(config.proxy.bind_address(), "127.0.0.1:30000");
    assert_eq!(config.operators.len(), 1);
    assert_eq!(config.http.base_url, "http://localhost:9999/v2");
    assert_eq!(config.http.connect_timeout, Duration::from_secs(3));
    assert_eq!(config.http.request_timeout, Duration::from_secs(30));
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    let err = load_config_file(&temp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound { .. }), "got {err:?}");
}

#[test]
fn test_oversized_config_file_rejected() {
    let temp = TempDir::new().unwrap();
    let padding = "#".repeat(1024 * 1024 + 1);
    let path = write_config(&temp, &padding);

    let err = load_config_file(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigTooLarge { .. }), "got {err:?}");
}

#[test]
fn test_overrides_win_over_file() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
eula = false

[proxy]
port = 30000
"#,
    );
    let file = load_config_file(&path).unwrap();
    let overrides = Overrides {
        eula: Some(true),
        proxy_port: Some(40000),
        backend_names: Some(vec!["one".into()]),
        backend_ports: Some(vec![40001]),
        ..Default::default()
    };

    let config = ProvisioningConfig::resolve(file, overrides).unwrap();

    assert!(config.eula_accepted);
    assert_eq!(config.proxy.port, 40000);
    assert_eq!(config.backends.len(), 1);
    assert_eq!(config.backends[0].name, "one");
    assert_eq!(config.backends[0].port, 40001);
}

#[test]
fn test_cli_names_keep_file_extras_by_name() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[[backend.servers]]
name = "lobby"
port = 30001
plugins = ["jars/lobby.jar"]
"#,
    );
    let file = load_config_file(&path).unwrap();
    let overrides = Overrides {
        backend_names: Some(vec!["lobby".into()]),
        backend_ports: Some(vec![31001]),
        ..Default::default()
    };

    let config = ProvisioningConfig::resolve(file, overrides).unwrap();

    assert_eq!(config.backends[0].port, 31001);
    assert_eq!(config.backends[0].plugin_files[0].as_str(), "jars/lobby.jar");
}

#[rstest]
#[case::duplicate_names(&["alpha", "alpha"], &[1, 2], 3, "duplicate backend name")]
#[case::duplicate_ports(&["alpha", "beta"], &[1, 1], 3, "duplicate port")]
#[case::proxy_port_clash(&["alpha"], &[3], 3, "proxy port")]
#[case::bad_name(&["../escape"], &[1], 3, "path separators")]
#[case::port_zero(&["alpha"], &[0], 3, "port 0")]
#[case::newline_in_name(&["alpha\ninjected-key: pwned"], &[1], 3, "control characters")]
#[case::carriage_return_in_name(&["beta\rmotd=evil"], &[1], 3, "control characters")]
fn test_invalid_topologies_rejected(
    #[case] names: &[&str],
    #[case] ports: &[u16],
    #[case] proxy_port: u16,
    #[case] expected: &str,
) {
    let overrides = Overrides {
        backend_names: Some(names.iter().map(|s| s.to_string()).collect()),
        backend_ports: Some(ports.to_vec()),
        proxy_port: Some(proxy_port),
        ..Default::default()
    };

    let err = ProvisioningConfig::resolve(ConfigFile::default(), overrides).unwrap_err();

    assert!(matches!(err, Error::Validation { .. }), "got {err:?}");
    assert!(
        err.to_string().contains(expected),
        "expected '{expected}' in '{err}'"
    );
}

#[test]
fn test_proxy_name_clashing_with_backend_rejected() {
    let overrides = Overrides {
        proxy_name: Some("alpha".into()),
        ..Default::default()
    };
    let err = ProvisioningConfig::resolve(ConfigFile::default(), overrides).unwrap_err();
    assert!(err.to_string().contains("also used by a backend"));
}

#[test]
fn test_invalid_operator_uuid_rejected() {
    let overrides = Overrides {
        operator_names: Some(vec!["Notch".into()]),
        operator_uuids: Some(vec!["not-a-uuid".into()]),
        ..Default::default()
    };
    let err = ProvisioningConfig::resolve(ConfigFile::default(), overrides).unwrap_err();
    assert!(err.to_string().contains("invalid uuid"));
}

#[test]
fn test_empty_backend_list_is_allowed_at_config_level() {
    let overrides = Overrides {
        backend_names: Some(vec![]),
        backend_ports: Some(vec![]),
        ..Default::default()
    };
    let config = ProvisioningConfig::resolve(ConfigFile::default(), overrides).unwrap();
    assert!(config.backends.is_empty());
}
