use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;

mod google;
mod lookup;

pub use google::GoogleGeocoder;
pub use lookup::{KnownLocation, StaticLookup};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Maps a (city, state) pair to coordinates. A miss is `None`, never an error.
pub trait Geocoder {
    fn resolve(&self, city: &str, state: &str) -> impl Future<Output = Option<Coordinates>> + Send;
}

/// Static table first, then the remote service when one is configured.
pub struct ChainedGeocoder {
    table: StaticLookup,
    remote: Option<GoogleGeocoder>,
}

impl ChainedGeocoder {
    pub fn new(table: StaticLookup, remote: Option<GoogleGeocoder>) -> Self {
        Self { table, remote }
    }

    /// Built-in table plus configured extras; the remote service only when a
    /// credential is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let table = StaticLookup::with_extra(&config.extra_locations);
        tracing::debug!("{} known roaster locations", table.len());

        let remote = GoogleGeocoder::new(config.google_maps_api_key.clone(), config.geocode_timeout())?;
        let remote = remote.has_credential().then_some(remote);
        Ok(Self::new(table, remote))
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }
}

impl Geocoder for ChainedGeocoder {
    async fn resolve(&self, city: &str, state: &str) -> Option<Coordinates> {
        if let Some(coords) = self.table.get(city, state) {
            return Some(coords);
        }
        match &self.remote {
            Some(remote) => remote.resolve(city, state).await,
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn chain_prefers_static_table() {
        let remote = GoogleGeocoder::new(Some("key".into()), Duration::from_millis(500))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/geocode/json");
        let geo = ChainedGeocoder::new(StaticLookup::builtin(), Some(remote));

        assert!(geo.resolve("Berkeley", "CA").await.is_some());
        assert_eq!(geo.resolve("Atlantis", "XX").await, None);
    }

    #[tokio::test]
    async fn from_config_skips_remote_without_key() {
        let config = Config::default();
        assert!(!ChainedGeocoder::from_config(&config).unwrap().has_remote());

        let config = Config {
            google_maps_api_key: Some("key".into()),
            ..Config::default()
        };
        assert!(ChainedGeocoder::from_config(&config).unwrap().has_remote());
    }

    #[tokio::test]
    async fn chain_without_remote_is_static_only() {
        let geo = ChainedGeocoder::new(StaticLookup::builtin(), None);
        assert_eq!(geo.resolve("Atlantis", "XX").await, None);
    }
}
