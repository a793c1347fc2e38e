//! TOML configuration

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

use acme_dns_proxy_core::{
    AccessControlList, AuthorizingProxy, CoreResult, HickorySoaLookup, ProviderGateway,
    RequestSink, RuleConfig, SoaZoneResolver,
};
use acme_dns_proxy_provider::{DnsVendor, ProviderCredentials, ProviderType, create_vendor};
use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/acmep.d/config.toml";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DNS_PORT: u16 = 53;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub dns: DnsConfig,
    /// Order is precedence.
    #[serde(default)]
    pub acl: Vec<RuleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

#[derive(Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Vendor-specific keys, e.g. `apiToken` for cloudflare.
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

// Variables hold secrets.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.variables.keys().collect();
        keys.sort();
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("variables", &keys)
            .finish()
    }
}

impl ProviderConfig {
    pub fn credentials(&self) -> CoreResult<ProviderCredentials> {
        let kind: ProviderType = self.kind.parse()?;
        Ok(ProviderCredentials::from_map(kind, &self.variables)?)
    }

    pub fn vendor(&self) -> CoreResult<Arc<dyn DnsVendor>> {
        Ok(create_vendor(self.credentials()?)?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DnsConfig {
    /// Recursive resolvers for the SOA walk. Empty means the system configuration.
    #[serde(default)]
    pub nameservers: Vec<String>,
}

impl DnsConfig {
    pub fn socket_addrs(&self) -> Result<Vec<SocketAddr>> {
        self.nameservers
            .iter()
            .map(|s| parse_nameserver(s))
            .collect()
    }
}

/// `1.1.1.1`, `1.1.1.1:5353`, `::1`, `[::1]` or `[::1]:53`
fn parse_nameserver(s: &str) -> Result<SocketAddr> {
    let s = s.trim();
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok(addr);
    }
    let bare = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')).unwrap_or(s);
    match bare.parse::<IpAddr>() {
        Ok(ip) => Ok(SocketAddr::new(ip, DNS_PORT)),
        Err(_) => bail!("invalid nameserver {s:?}: expected an IP address, optionally with a port"),
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("failed to load config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Build the proxy. Any configuration error is returned here, before the
    /// server binds.
    pub fn build_proxy(&self, sink: Arc<dyn RequestSink>) -> Result<AuthorizingProxy> {
        let acl = AccessControlList::build(&self.acl).context("invalid acls")?;
        let vendor = self.provider.vendor().context("invalid provider")?;
        let nameservers = self.dns.socket_addrs()?;

        tracing::info!(
            provider = vendor.id(),
            rules = acl.len(),
            nameservers = nameservers.len(),
            "configuration loaded"
        );

        let resolver = SoaZoneResolver::new(HickorySoaLookup::new(&nameservers));
        let gateway = ProviderGateway::new(vendor, Arc::new(resolver));
        Ok(AuthorizingProxy::new(acl, gateway, sink))
    }
}

#[cfg(test)]
mod tests {
    use acme_dns_proxy_core::{CoreError, LogRequestSink};

    use super::*;

    const FULL: &str = r#"
        [server]
        listen_addr = "0.0.0.0:9000"

        [provider]
        type = "cloudflare"

        [provider.variables]
        apiToken = "cf-token"

        [dns]
        nameservers = ["1.1.1.1", "9.9.9.9:5353"]

        [[acl]]
        pattern = "*.example.com"
        token = "aaaa"

        [[acl]]
        pattern = "example.com"
        token = "bbbb"
    "#;

    #[test]
    fn parses_full_config() {
        let cfg = Config::parse(FULL).unwrap();
        assert_eq!(cfg.server.listen_addr, "0.0.0.0:9000");
        assert_eq!(cfg.provider.kind, "cloudflare");
        assert_eq!(cfg.provider.variables["apiToken"], "cf-token");
        assert_eq!(cfg.acl.len(), 2);
        assert_eq!(cfg.acl[0].pattern, "*.example.com");
        assert_eq!(cfg.acl[1].token, "bbbb");
        assert_eq!(
            cfg.dns.socket_addrs().unwrap(),
            [
                "1.1.1.1:53".parse::<SocketAddr>().unwrap(),
                "9.9.9.9:5353".parse().unwrap()
            ]
        );
    }

    #[test]
    fn defaults() {
        let cfg = Config::parse("[provider]\ntype = \"dnspod\"\n").unwrap();
        assert_eq!(cfg.server.listen_addr, DEFAULT_LISTEN_ADDR);
        assert!(cfg.dns.nameservers.is_empty());
        assert!(cfg.acl.is_empty());
    }

    #[test]
    fn missing_provider_section_fails() {
        assert!(Config::parse("[server]\nlisten_addr = \"[::]:80\"\n").is_err());
    }

    #[test]
    fn nameserver_forms() {
        assert_eq!(parse_nameserver("::1").unwrap().port(), 53);
        assert_eq!(parse_nameserver("[::1]").unwrap().port(), 53);
        assert_eq!(parse_nameserver("[::1]:5300").unwrap().port(), 5300);
        assert_eq!(parse_nameserver(" 8.8.8.8 ").unwrap().port(), 53);
        assert!(parse_nameserver("dns.google").is_err());
        assert!(parse_nameserver("1.1.1.1:dns").is_err());
    }

    #[test]
    fn provider_errors() {
        let unknown = ProviderConfig {
            kind: "route53".into(),
            variables: HashMap::new(),
        };
        assert!(matches!(
            unknown.credentials(),
            Err(CoreError::UnknownProvider(_))
        ));

        let empty = ProviderConfig {
            kind: String::new(),
            variables: HashMap::new(),
        };
        let err = empty.credentials().unwrap_err();
        assert_eq!(err.to_string(), "provider type not specified");

        let missing = ProviderConfig {
            kind: "dnspod".into(),
            variables: HashMap::from([("secretId".to_string(), "id".to_string())]),
        };
        assert!(matches!(
            missing.credentials(),
            Err(CoreError::ProviderConfig(_))
        ));
    }

    #[test]
    fn debug_hides_variable_values() {
        let cfg = Config::parse(FULL).unwrap();
        let shown = format!("{:?}", cfg.provider);
        assert!(shown.contains("apiToken"));
        assert!(!shown.contains("cf-token"));
    }

    #[tokio::test]
    async fn builds_proxy_from_valid_config() {
        let cfg = Config::parse(FULL).unwrap();
        let proxy = cfg.build_proxy(Arc::new(LogRequestSink)).unwrap();
        assert_eq!(proxy.acl().len(), 2);
        assert_eq!(proxy.gateway().vendor_id(), "cloudflare");
    }

    #[tokio::test]
    async fn rejects_config_without_rules() {
        let cfg = Config::parse(
            "[provider]\ntype = \"cloudflare\"\n[provider.variables]\napiToken = \"x\"\n",
        )
        .unwrap();
        let Err(err) = cfg.build_proxy(Arc::new(LogRequestSink)) else {
            panic!("config without rules must not build");
        };
        assert!(format!("{err:#}").contains("no access rules defined"), "{err:#}");
    }

    #[tokio::test]
    async fn rejects_bad_nameserver() {
        let cfg = Config::parse(&FULL.replace("9.9.9.9:5353", "resolver.local")).unwrap();
        assert!(cfg.build_proxy(Arc::new(LogRequestSink)).is_err());
    }
}
