use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::aggregator::{DEFAULT_MAX_IN_FLIGHT, SearchAggregator};
use crate::client::CatalogQueryClient;
use crate::discovery::cluster::{DEFAULT_CLUSTER_SUFFIX, HostResolver, SystemResolver};
use crate::discovery::{
    ClusterDiscoveryProvider, DiscoveryProvider, Endpoint, StaticDiscoveryProvider,
};
use crate::error::ConfigError;

/// How peers are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    /// `DUMMY_SEARCH_SERVICE_URLS`.
    Static,
    /// Service DNS in every `POD_NAMESPACE`.
    Cluster,
}

impl FromStr for DiscoveryStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" | "dummy" => Ok(DiscoveryStrategy::Static),
            "cluster" | "kube" => Ok(DiscoveryStrategy::Cluster),
            other => Err(ConfigError::UnknownDiscoveryStrategy(other.to_string())),
        }
    }
}

/// Search node settings. Every flag can also be set through a
/// `DS_SEARCH__`-prefixed environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "decentralized-search", version, about = "Federated catalog search node")]
pub struct Settings {
    /// Address the HTTP server listens on.
    #[arg(long, env = "DS_SEARCH__BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// `cluster` (alias `kube`) or `static` (alias `dummy`).
    #[arg(long, env = "DS_SEARCH__DISCOVERY_TYPE", default_value = "cluster")]
    pub discovery_type: String,

    #[arg(
        long,
        env = "DS_SEARCH__POD_NAMESPACE",
        value_delimiter = ',',
        default_value = "default"
    )]
    pub namespaces: Vec<String>,

    #[arg(long, env = "DS_SEARCH__SERVICE_NAME", default_value = "search-service")]
    pub service_name: String,

    #[arg(long, env = "DS_SEARCH__SERVICE_PORT", default_value_t = 8000)]
    pub service_port: u16,

    #[arg(long, env = "DS_SEARCH__CLUSTER_SUFFIX", default_value = DEFAULT_CLUSTER_SUFFIX)]
    pub cluster_suffix: String,

    /// Peer base URLs for static discovery.
    #[arg(long, env = "DS_SEARCH__DUMMY_SEARCH_SERVICE_URLS", value_delimiter = ',')]
    pub peer_urls: Vec<String>,

    /// Base URL of this node's catalog service.
    #[arg(
        long,
        env = "DS_SEARCH__CATALOG_SERVICE_URL",
        default_value = "http://localhost:8000"
    )]
    pub catalog_url: String,

    /// Per-source request timeout in seconds.
    #[arg(long, env = "DS_SEARCH__REQUEST_TIMEOUT", default_value_t = 5.0)]
    pub request_timeout: f64,

    #[arg(long, env = "DS_SEARCH__MAX_IN_FLIGHT", default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    pub max_in_flight: usize,

    /// This pod's address, excluded from cluster discovery.
    #[arg(long, env = "DS_SEARCH__POD_IP")]
    pub pod_ip: Option<IpAddr>,

    /// This pod's hostname, resolved and excluded from cluster discovery.
    /// Falls back to `HOSTNAME` and then to the system hostname.
    #[arg(long, env = "DS_SEARCH__HOSTNAME")]
    pub hostname: Option<String>,

    #[arg(
        long,
        env = "DS_SEARCH__EXCLUDE_SELF",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub exclude_self: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "DS_SEARCH__LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Settings {
    pub fn discovery_strategy(&self) -> Result<DiscoveryStrategy, ConfigError> {
        self.discovery_type.parse()
    }

    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        if !self.request_timeout.is_finite() || self.request_timeout <= 0.0 {
            return Err(ConfigError::InvalidTimeout(self.request_timeout));
        }
        Ok(Duration::from_secs_f64(self.request_timeout))
    }

    pub fn catalog_endpoint(&self) -> Result<Endpoint, ConfigError> {
        Endpoint::parse(&self.catalog_url)
    }

    /// The hostname this node resolves itself by.
    pub fn self_host(&self) -> Option<String> {
        self.hostname
            .clone()
            .or_else(|| std::env::var("HOSTNAME").ok())
            .or_else(|| hostname::get().ok().and_then(|name| name.into_string().ok()))
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }

    pub fn build_discovery(&self) -> Result<Arc<dyn DiscoveryProvider>, ConfigError> {
        self.build_discovery_with(Arc::new(SystemResolver))
    }

    /// Like [`Settings::build_discovery`], resolving cluster names through `resolver`.
    pub fn build_discovery_with(
        &self,
        resolver: Arc<dyn HostResolver>,
    ) -> Result<Arc<dyn DiscoveryProvider>, ConfigError> {
        match self.discovery_strategy()? {
            DiscoveryStrategy::Static => {
                let urls: Vec<&str> = self
                    .peer_urls
                    .iter()
                    .map(|url| url.trim())
                    .filter(|url| !url.is_empty())
                    .collect();
                Ok(Arc::new(StaticDiscoveryProvider::from_urls(&urls)?))
            }
            DiscoveryStrategy::Cluster => {
                let namespaces = self
                    .namespaces
                    .iter()
                    .map(|ns| ns.trim().to_string())
                    .filter(|ns| !ns.is_empty())
                    .collect();
                let mut provider = ClusterDiscoveryProvider::with_resolver(
                    namespaces,
                    &self.service_name,
                    self.service_port,
                    resolver,
                )
                .with_cluster_suffix(&self.cluster_suffix)
                .with_local_ips(self.pod_ip.into_iter().collect())
                .with_exclude_self(self.exclude_self);
                if self.exclude_self {
                    match self.self_host() {
                        Some(host) => provider = provider.with_self_host(host),
                        None if self.pod_ip.is_none() => {
                            tracing::warn!("No pod IP or hostname known, own address stays a peer")
                        }
                        None => {}
                    }
                }
                Ok(Arc::new(provider))
            }
        }
    }

    /// Validates everything and wires the aggregator. Fails before serving.
    pub fn build_aggregator(&self) -> Result<SearchAggregator, ConfigError> {
        if self.max_in_flight == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }
        let client = CatalogQueryClient::new(self.request_timeout()?);
        let discovery = self.build_discovery()?;
        let aggregator = SearchAggregator::new(self.catalog_endpoint()?, client, discovery)
            .with_max_in_flight(self.max_in_flight);
        Ok(aggregator)
    }
}
