use async_trait::async_trait;

use super::DiscoveryProvider;
use super::types::{Endpoint, dedup};
use crate::error::ConfigError;

/// A fixed peer list, for development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscoveryProvider {
    endpoints: Vec<Endpoint>,
}

impl StaticDiscoveryProvider {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self {
            endpoints: dedup(endpoints),
        }
    }

    /// Builds the list from raw URLs, rejecting the first invalid one.
    pub fn from_urls<S: AsRef<str>>(urls: &[S]) -> Result<Self, ConfigError> {
        let endpoints = urls
            .iter()
            .map(|url| Endpoint::parse(url.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(endpoints))
    }
}

#[async_trait]
impl DiscoveryProvider for StaticDiscoveryProvider {
    async fn discover(&self) -> Vec<Endpoint> {
        self.endpoints.clone()
    }
}
