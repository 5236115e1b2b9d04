use async_trait::async_trait;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;

use super::DiscoveryProvider;
use super::types::{Endpoint, dedup};

pub const DEFAULT_CLUSTER_SUFFIX: &str = "svc.cluster.local";

/// Name resolution seam for cluster discovery.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

/// Resolves through the operating system (cluster DNS inside a pod).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, 0)).await?;
        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

/// Finds peer search nodes by resolving the service name in each namespace,
/// e.g. `search-service.team-a.svc.cluster.local`.
pub struct ClusterDiscoveryProvider {
    namespaces: Vec<String>,
    service_name: String,
    service_port: u16,
    cluster_suffix: String,
    local_ips: Vec<IpAddr>,
    self_host: Option<String>,
    exclude_self: bool,
    resolver: Arc<dyn HostResolver>,
}

impl ClusterDiscoveryProvider {
    pub fn new(
        namespaces: Vec<String>,
        service_name: impl Into<String>,
        service_port: u16,
    ) -> Self {
        Self::with_resolver(namespaces, service_name, service_port, Arc::new(SystemResolver))
    }

    pub fn with_resolver(
        namespaces: Vec<String>,
        service_name: impl Into<String>,
        service_port: u16,
        resolver: Arc<dyn HostResolver>,
    ) -> Self {
        Self {
            namespaces,
            service_name: service_name.into(),
            service_port,
            cluster_suffix: DEFAULT_CLUSTER_SUFFIX.to_string(),
            local_ips: Vec::new(),
            self_host: None,
            exclude_self: true,
            resolver,
        }
    }

    pub fn with_cluster_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.cluster_suffix = suffix.into();
        self
    }

    /// Addresses of this node that must never be returned as peers.
    pub fn with_local_ips(mut self, ips: Vec<IpAddr>) -> Self {
        self.local_ips = ips;
        self
    }

    /// Hostname of this node, resolved on every discovery and treated like a local IP.
    pub fn with_self_host(mut self, host: impl Into<String>) -> Self {
        self.self_host = Some(host.into());
        self
    }

    pub fn with_exclude_self(mut self, exclude_self: bool) -> Self {
        self.exclude_self = exclude_self;
        self
    }

    pub fn service_host(&self, namespace: &str) -> String {
        format!("{}.{}.{}", self.service_name, namespace, self.cluster_suffix)
    }

    async fn own_addresses(&self) -> Vec<IpAddr> {
        let mut own = self.local_ips.clone();
        if let Some(host) = &self.self_host {
            match self.resolver.resolve(host).await {
                Ok(ips) => own.extend(ips),
                Err(e) => tracing::warn!("Could not resolve own hostname '{}': {}", host, e),
            }
        }
        own
    }
}

#[async_trait]
impl DiscoveryProvider for ClusterDiscoveryProvider {
    async fn discover(&self) -> Vec<Endpoint> {
        let own = if self.exclude_self {
            self.own_addresses().await
        } else {
            Vec::new()
        };

        let mut peers = Vec::new();
        for namespace in &self.namespaces {
            let host = self.service_host(namespace);
            match self.resolver.resolve(&host).await {
                Ok(ips) => {
                    let mut found = Vec::with_capacity(ips.len());
                    for ip in ips {
                        if own.contains(&ip) {
                            tracing::debug!("Skipping own address {} in '{}'", ip, namespace);
                            continue;
                        }
                        found.push(Endpoint::from_ip(ip, self.service_port));
                    }
                    tracing::info!(
                        "Discovered {} peer(s) in namespace '{}'",
                        found.len(),
                        namespace
                    );
                    peers.extend(found);
                }
                Err(e) => {
                    tracing::error!(
                        "Error discovering peers in namespace '{}' ({}): {}",
                        namespace,
                        host,
                        e
                    );
                }
            }
        }

        dedup(peers)
    }
}
