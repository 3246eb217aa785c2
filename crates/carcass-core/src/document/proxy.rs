//! Proxy `config.yml`

use carcass_meta::ProxyDescriptor;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use super::yaml_with_header;
use crate::error::{Error, Result};
use crate::topology::RoutingTable;

#[derive(Serialize)]
struct ProxyConfig {
    listeners: Vec<Listener>,
    ip_forward: bool,
    online_mode: bool,
    /// Backend name to entry, in routing order
    servers: Mapping,
}

#[derive(Serialize)]
struct Listener {
    query_port: u16,
    motd: String,
    query_enabled: bool,
    proxy_protocol: bool,
    priorities: Vec<String>,
    bind_local_address: bool,
    host: String,
}

#[derive(Serialize)]
struct ServerEntry<'a> {
    motd: &'a str,
    address: &'a str,
    restricted: bool,
}

/// Render the proxy's `config.yml` for a routing table.
pub fn proxy_config_document(
    proxy: &ProxyDescriptor,
    proxy_version: &str,
    routing: &RoutingTable,
) -> Result<String> {
    let mut servers = Mapping::new();
    for entry in routing.entries() {
        let value = serde_yaml::to_value(ServerEntry {
            motd: &entry.label,
            address: &entry.address,
            restricted: entry.restricted,
        })
        .map_err(|e| Error::document("config.yml", e))?;
        servers.insert(Value::String(entry.name.clone()), value);
    }

    let config = ProxyConfig {
        listeners: vec![Listener {
            query_port: proxy.port,
            motd: format!("{proxy_version} Proxy Server"),
            query_enabled: false,
            proxy_protocol: false,
            priorities: routing
                .entries()
                .iter()
                .filter(|entry| entry.is_default)
                .map(|entry| entry.name.clone())
                .collect(),
            bind_local_address: true,
            host: proxy.bind_address(),
        }],
        ip_forward: true,
        online_mode: true,
        servers,
    };

    yaml_with_header(
        "config.yml",
        &format!("Auto-generated config.yml for proxy server {}", proxy.name),
        &config,
    )
}
