//! Server topology synthesis
//!
//! Derives what the proxy and every backend must agree on: which addresses
//! the proxy routes to, in which priority, and which trust settings a
//! backend needs to accept forwarded players. Everything here is a pure
//! function of the descriptors.

use carcass_meta::{BackendDescriptor, ProxyDescriptor};

use crate::error::{Error, Result};

/// One backend as seen from the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingEntry {
    pub name: String,
    /// Always `localhost:<port>`; backends run next to the proxy
    pub address: String,
    /// Display label (`motd`) with Minecraft color codes
    pub label: String,
    pub restricted: bool,
    /// Players join this backend first. Set on exactly the first entry.
    pub is_default: bool,
}

/// The proxy's ordered view of the network. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    entries: Vec<RoutingEntry>,
}

impl RoutingTable {
    /// Entries in backend order.
    pub fn entries(&self) -> &[RoutingEntry] {
        &self.entries
    }

    /// The backend players join first.
    pub fn default_entry(&self) -> &RoutingEntry {
        // non-empty by construction, first entry is the default
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the proxy's routing table from the backends, preserving their order.
pub fn build_proxy_routing(
    proxy: &ProxyDescriptor,
    backends: &[BackendDescriptor],
) -> Result<RoutingTable> {
    if backends.is_empty() {
        return Err(Error::EmptyTopology {
            proxy: proxy.name.clone(),
        });
    }

    let entries = backends
        .iter()
        .enumerate()
        .map(|(index, backend)| RoutingEntry {
            name: backend.name.clone(),
            address: format!("localhost:{}", backend.port),
            label: format!(
                "&eBackend {} {} (port {})",
                backend.family, backend.name, backend.port
            ),
            restricted: false,
            is_default: index == 0,
        })
        .collect();

    Ok(RoutingTable { entries })
}

/// Settings a backend needs to sit behind a BungeeCord-compatible proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTrustConfig {
    /// `settings.bungeecord` in `spigot.yml`
    pub bungeecord: bool,
    /// `proxies.bungee-cord.online-mode` in `config/paper-global.yml`
    pub proxy_online_mode: bool,
    /// `online-mode` in `server.properties`; the proxy authenticates instead
    pub online_mode: bool,
}

/// Trust settings for a backend. Identical for every backend today.
pub fn build_backend_trust_config(_backend: &BackendDescriptor) -> BackendTrustConfig {
    BackendTrustConfig {
        bungeecord: true,
        proxy_online_mode: true,
        online_mode: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carcass_meta::{BackendFamily, ProxyFamily};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn backend(name: &str, port: u16) -> BackendDescriptor {
        BackendDescriptor {
            name: name.to_string(),
            port,
            family: BackendFamily::Paper,
            memory_mb: 1024,
            plugin_files: vec![],
            plugin_folders: vec![],
        }
    }

    fn proxy() -> ProxyDescriptor {
        ProxyDescriptor {
            name: "proxy".into(),
            host: "0.0.0.0".into(),
            port: 25565,
            family: ProxyFamily::Waterfall,
            memory_mb: 512,
            plugin_files: vec![],
            plugin_folders: vec![],
        }
    }

    #[test]
    fn test_routing_preserves_order_and_defaults_to_first() {
        let backends = vec![backend("alpha", 25566), backend("beta", 25567)];
        let table = build_proxy_routing(&proxy(), &backends).unwrap();

        let names: Vec<&str> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(table.default_entry().name, "alpha");
        assert_eq!(
            table.entries()[1],
            RoutingEntry {
                name: "beta".into(),
                address: "localhost:25567".into(),
                label: "&eBackend paper beta (port 25567)".into(),
                restricted: false,
                is_default: false,
            }
        );
        assert!(table.entries()[0].is_default);
    }

    #[test]
    fn test_empty_backends_is_empty_topology() {
        let err = build_proxy_routing(&proxy(), &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyTopology { ref proxy } if proxy == "proxy"));
    }

    #[test]
    fn test_backend_trust_defers_authentication_to_proxy() {
        let trust = build_backend_trust_config(&backend("alpha", 25566));
        assert!(trust.bungeecord);
        assert!(trust.proxy_online_mode);
        assert!(!trust.online_mode);
    }

    proptest! {
        #[test]
        fn routing_has_one_entry_per_backend(count in 1usize..32) {
            let backends: Vec<_> = (0..count)
                .map(|i| backend(&format!("b{i}"), 30000 + i as u16))
                .collect();
            let table = build_proxy_routing(&proxy(), &backends).unwrap();
            prop_assert_eq!(table.len(), count);
            prop_assert_eq!(&table.default_entry().name, &backends[0].name);
            prop_assert_eq!(table.entries().iter().filter(|e| e.is_default).count(), 1);
        }
    }
}
