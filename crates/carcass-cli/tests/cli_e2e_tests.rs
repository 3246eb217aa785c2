//! CLI end-to-end tests that invoke the compiled `carcass` binary.
//!
//! Full provisioning runs point the binary at a mock metadata server through
//! a config file, so no test touches the real download API.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a Command for the carcass binary running in `dir`
fn carcass_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("carcass").expect("Failed to find carcass binary");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

/// Mock PaperMC endpoints for paper 1.19.1 and waterfall 1.19.
async fn mock_papermc() -> MockServer {
    let server = MockServer::start().await;

    for (project, version, build) in [("paper", "1.19.1", 111), ("waterfall", "1.19", 505)] {
        Mock::given(method("GET"))
            .and(path(format!(
                "/v2/projects/{project}/versions/{version}/builds"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "builds": [{ "build": 1 }, { "build": build }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!(
                "/v2/projects/{project}/versions/{version}/builds/{build}/downloads/{project}-{version}-{build}.jar"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(format!("{project}-jar")))
            .mount(&server)
            .await;
    }

    server
}

fn write_config(dir: &Path, base_url: &str) {
    fs::write(
        dir.join("carcass.toml"),
        format!("[http]\nbase_url = \"{base_url}/v2\"\nconnect_timeout_secs = 2\nrequest_timeout_secs = 10\n"),
    )
    .unwrap();
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn test_help_exits_zero() {
    let temp = TempDir::new().unwrap();
    carcass_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("update-plugins"))
        .stdout(predicate::str::contains("--eula"));
}

#[test]
fn test_version_exits_zero() {
    let temp = TempDir::new().unwrap();
    carcass_cmd(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("carcass"));
}

#[test]
fn test_without_eula_nothing_is_created() {
    let temp = TempDir::new().unwrap();
    carcass_cmd(temp.path())
        .args(["-o", "out"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("EULA"));

    assert!(!temp.path().join("out").exists());
    assert!(!temp.path().join("servers").exists());
}

#[test]
fn test_duplicate_ports_are_rejected_before_any_mutation() {
    let temp = TempDir::new().unwrap();
    carcass_cmd(temp.path())
        .args(["-e", "true", "-o", "out", "-b", "a", "b", "-p", "30000", "30000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate port"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_mismatched_names_and_ports_are_rejected() {
    let temp = TempDir::new().unwrap();
    carcass_cmd(temp.path())
        .args(["--eula", "true", "-b", "a", "b", "c", "-p", "30000", "30001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("backend names"));
}

#[test]
fn test_update_plugins_on_missing_servers_fails() {
    let temp = TempDir::new().unwrap();
    carcass_cmd(temp.path())
        .args(["update-plugins", "--eula", "true", "-o", "out"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("2 of 2 server(s) failed"));

    assert!(!temp.path().join("out/alpha").exists());
}

// ============================================================================
// Full runs against a mock metadata server
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_provision_then_update_plugins() {
    let server = mock_papermc().await;
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), &server.uri());
    fs::create_dir_all(temp.path().join("jars")).unwrap();
    fs::write(temp.path().join("jars/worldedit-7.2.jar"), "we").unwrap();

    carcass_cmd(temp.path())
        .args(["--eula", "true", "-o", "net", "--plugins", "jars/worldedit*", "jars/missing.jar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"))
        .stdout(predicate::str::contains("jars/missing.jar"));

    let net = temp.path().join("net");
    assert_eq!(fs::read_to_string(net.join("alpha/paper.jar")).unwrap(), "paper-jar");
    assert_eq!(
        fs::read_to_string(net.join("proxy/waterfall.jar")).unwrap(),
        "waterfall-jar"
    );
    assert_eq!(
        fs::read_to_string(net.join("beta/plugins/worldedit-7.2.jar")).unwrap(),
        "we"
    );
    let properties = fs::read(net.join("alpha/server.properties")).unwrap();

    fs::write(temp.path().join("jars/vault-1.7.jar"), "vault").unwrap();
    carcass_cmd(temp.path())
        .args(["update-plugins", "--eula", "true", "-o", "net", "--plugins", "jars/vault*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugins updated."));

    assert_eq!(fs::read(net.join("alpha/server.properties")).unwrap(), properties);
    assert!(!net.join("alpha/plugins/worldedit-7.2.jar").exists());
    assert_eq!(
        fs::read_to_string(net.join("alpha/plugins/vault-1.7.jar")).unwrap(),
        "vault"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unknown_version_fails_with_exit_code_one() {
    let server = mock_papermc().await;
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), &server.uri());

    carcass_cmd(temp.path())
        .args(["provision", "--eula", "true", "-o", "net", "-v", "0.0.1"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("2 of 3 server(s) failed"));

    // the proxy version still resolves
    assert!(temp.path().join("net/proxy/config.yml").is_file());
}
