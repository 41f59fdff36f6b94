use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::Result;

use super::{Coordinates, Geocoder};

const GEOCODE_API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Google Maps Geocoding API client. Best effort: every failure resolves to `None`.
pub struct GoogleGeocoder {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent("coffee-canary/1.0")
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            endpoint: GEOCODE_API_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn geocode(&self, api_key: &str, address: &str) -> Result<Option<Coordinates>> {
        let url = Url::parse_with_params(&self.endpoint, &[("address", address), ("key", api_key)])
            .map_err(|e| anyhow::anyhow!("invalid geocoding endpoint: {e}"))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            tracing::debug!("Geocoding {:?} failed: HTTP {}", address, response.status());
            return Ok(None);
        }

        let body: GeocodeResponse = response.json().await?;
        let Some(first) = body.results.into_iter().next() else {
            tracing::debug!(
                "No geocoding match for {:?} (status {})",
                address,
                body.status.as_deref().unwrap_or("unknown")
            );
            return Ok(None);
        };

        Ok(Some(Coordinates {
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
        }))
    }
}

impl Geocoder for GoogleGeocoder {
    async fn resolve(&self, city: &str, state: &str) -> Option<Coordinates> {
        let api_key = self.api_key.as_deref()?;
        let (city, state) = (city.trim(), state.trim());
        if city.is_empty() || state.is_empty() {
            return None;
        }

        let address = format!("{city}, {state}");
        match self.geocode(api_key, &address).await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::debug!("Error geocoding location {:?}: {}", address, e);
                None
            }
        }
    }
}
