use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Coordinates, Geocoder};

/// A town with known coordinates, as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownLocation {
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

const BUILTIN_LOCATIONS: &[(&str, &str, f64, f64)] = &[
    ("Vacaville", "CA", 38.3566, -121.9877),
    ("Minden", "NV", 38.9540, -119.7674),
    ("Sacramento", "CA", 38.5816, -121.4944),
    ("Mount Vernon", "WA", 48.4212, -122.3341),
    ("San Rafael", "CA", 37.9735, -122.5311),
    ("Boise", "ID", 43.6150, -116.2023),
    ("Hollywood", "CA", 34.0983, -118.3267),
    ("Emeryville", "CA", 37.8313, -122.2858),
    ("Berkeley", "CA", 37.8715, -122.2730),
    ("Ipswich", "MA", 42.6796, -70.8412),
    ("Las Vegas", "NV", 36.1699, -115.1398),
    ("Napa", "CA", 38.2975, -122.2869),
    ("Winters", "CA", 38.5246, -121.9702),
    ("Portland", "OR", 45.5152, -122.6784),
    ("Santa Cruz", "CA", 36.9741, -122.0308),
];

/// Fixed (city, state) -> coordinates table. Keys match exactly after trimming.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    entries: HashMap<(String, String), Coordinates>,
}

impl StaticLookup {
    pub fn new(locations: impl IntoIterator<Item = KnownLocation>) -> Self {
        let mut lookup = Self::default();
        lookup.extend(locations);
        lookup
    }

    /// The towns the dashboard has seen roasters in so far.
    pub fn builtin() -> Self {
        Self::new(builtin_locations())
    }

    /// Built-in table with `extra` entries layered on top.
    pub fn with_extra(extra: &[KnownLocation]) -> Self {
        let mut lookup = Self::builtin();
        lookup.extend(extra.iter().cloned());
        lookup
    }

    /// Later entries replace earlier ones for the same (city, state).
    pub fn extend(&mut self, locations: impl IntoIterator<Item = KnownLocation>) {
        for loc in locations {
            self.entries.insert(
                (loc.city.trim().to_string(), loc.state.trim().to_string()),
                Coordinates {
                    latitude: loc.latitude,
                    longitude: loc.longitude,
                },
            );
        }
    }

    pub fn get(&self, city: &str, state: &str) -> Option<Coordinates> {
        self.entries
            .get(&(city.trim().to_string(), state.trim().to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn builtin_locations() -> impl Iterator<Item = KnownLocation> {
    BUILTIN_LOCATIONS
        .iter()
        .map(|&(city, state, latitude, longitude)| KnownLocation {
            city: city.to_string(),
            state: state.to_string(),
            latitude,
            longitude,
        })
}

impl Geocoder for StaticLookup {
    async fn resolve(&self, city: &str, state: &str) -> Option<Coordinates> {
        self.get(city, state)
    }
}
