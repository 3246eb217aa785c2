//! Backend server documents

use carcass_meta::{BackendDescriptor, Operator};
use serde::Serialize;

use super::{PropertiesDocument, yaml_with_header};
use crate::error::{Error, Result};
use crate::topology::BackendTrustConfig;

/// Operator permission level granted to every configured operator
const OPERATOR_LEVEL: u8 = 4;

/// `eula.txt`. Only ever written once the EULA has been accepted.
pub fn eula_document(backend: &BackendDescriptor) -> String {
    let mut doc = PropertiesDocument::new();
    doc.comment(format!("Auto-generated eula.txt for server {}", backend.name))
        .set("eula", true);
    doc.render()
}

#[derive(Serialize)]
struct SpigotConfig {
    settings: SpigotSettings,
}

#[derive(Serialize)]
struct SpigotSettings {
    bungeecord: bool,
}

/// `spigot.yml`
pub fn spigot_document(backend: &BackendDescriptor, trust: &BackendTrustConfig) -> Result<String> {
    yaml_with_header(
        "spigot.yml",
        &format!("Auto-generated spigot.yml for server {}", backend.name),
        &SpigotConfig {
            settings: SpigotSettings {
                bungeecord: trust.bungeecord,
            },
        },
    )
}

#[derive(Serialize)]
struct PaperGlobalConfig {
    proxies: PaperProxies,
}

#[derive(Serialize)]
struct PaperProxies {
    #[serde(rename = "bungee-cord")]
    bungee_cord: PaperBungeeCord,
}

#[derive(Serialize)]
struct PaperBungeeCord {
    #[serde(rename = "online-mode")]
    online_mode: bool,
}

/// `config/paper-global.yml`
pub fn paper_global_document(
    backend: &BackendDescriptor,
    trust: &BackendTrustConfig,
) -> Result<String> {
    yaml_with_header(
        "paper-global.yml",
        &format!("Auto-generated paper-global.yml for server {}", backend.name),
        &PaperGlobalConfig {
            proxies: PaperProxies {
                bungee_cord: PaperBungeeCord {
                    online_mode: trust.proxy_online_mode,
                },
            },
        },
    )
}

/// `server.properties`
pub fn server_properties(backend: &BackendDescriptor, trust: &BackendTrustConfig) -> String {
    let mut doc = PropertiesDocument::new();
    doc.comment(format!(
        "Auto-generated server.properties for server {}",
        backend.name
    ))
    .comment(format!("{} server", backend.family))
    .set("server-port", backend.port)
    .set("motd", format!("Server {}", backend.name))
    .set("enable-query", false)
    .set("enable-rcon", false)
    .set("spawn-protection", 0)
    .set("online-mode", trust.online_mode);
    doc.render()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OpsEntry<'a> {
    uuid: &'a str,
    name: &'a str,
    level: u8,
    bypasses_player_limit: bool,
}

/// `ops.json`
pub fn ops_document(operators: &[Operator]) -> Result<String> {
    let entries: Vec<OpsEntry<'_>> = operators
        .iter()
        .map(|op| OpsEntry {
            uuid: &op.uuid,
            name: &op.name,
            level: OPERATOR_LEVEL,
            bypasses_player_limit: false,
        })
        .collect();
    let mut json =
        serde_json::to_string_pretty(&entries).map_err(|e| Error::document("ops.json", e))?;
    json.push('\n');
    Ok(json)
}
