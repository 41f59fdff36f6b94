use std::collections::HashSet;

use futures::stream::{self, StreamExt};

use crate::geo::Geocoder;
use crate::models::{ChartResult, NoDataReason, RoasterLocation, Table};
use crate::normalize::{detect_index, CanonicalField};

const MAX_CONCURRENT_LOOKUPS: usize = 4;

struct Candidate {
    name: String,
    city: String,
    state: String,
}

/// Map markers for roasters with resolvable coordinates.
///
/// With `purchases` given, only roasters that appear in at least one purchase
/// are kept. Roasters without a city and state, or whose location the
/// geocoder cannot place, are left off the map. Output follows roaster table
/// order.
pub async fn roaster_locations<G: Geocoder>(
    roasters: &Table,
    purchases: Option<&Table>,
    geocoder: &G,
) -> ChartResult<Vec<RoasterLocation>> {
    if roasters.is_empty() {
        return ChartResult::NoData(NoDataReason::EmptyTable);
    }
    let Some(name_col) = detect_index(roasters, CanonicalField::RoasterName) else {
        return ChartResult::NoData(NoDataReason::MissingColumn(CanonicalField::RoasterName));
    };
    let Some(city_col) = detect_index(roasters, CanonicalField::City) else {
        return ChartResult::NoData(NoDataReason::MissingColumn(CanonicalField::City));
    };
    let Some(state_col) = detect_index(roasters, CanonicalField::State) else {
        return ChartResult::NoData(NoDataReason::MissingColumn(CanonicalField::State));
    };

    let used: Option<HashSet<&str>> = match purchases {
        Some(purchases) => {
            let Some(col) = detect_index(purchases, CanonicalField::Roaster) else {
                return ChartResult::NoData(NoDataReason::MissingColumn(CanonicalField::Roaster));
            };
            Some((0..purchases.len()).filter_map(|row| purchases.get(row, col)).collect())
        }
        None => None,
    };

    let candidates: Vec<Candidate> = (0..roasters.len())
        .filter_map(|row| {
            let name = roasters.get(row, name_col)?;
            if let Some(used) = &used {
                if !used.contains(name) {
                    return None;
                }
            }
            Some(Candidate {
                name: name.to_string(),
                city: roasters.get(row, city_col)?.to_string(),
                state: roasters.get(row, state_col)?.to_string(),
            })
        })
        .collect();

    let located: Vec<RoasterLocation> = stream::iter(candidates)
        .map(|c| async move {
            let Some(coords) = geocoder.resolve(&c.city, &c.state).await else {
                tracing::debug!("No coordinates for {} ({}, {})", c.name, c.city, c.state);
                return None;
            };
            let city_state = format!("{}, {}", c.city, c.state);
            Some(RoasterLocation {
                label: format!("{} ({})", c.name, city_state),
                roaster: c.name,
                latitude: coords.latitude,
                longitude: coords.longitude,
                city_state,
            })
        })
        .buffered(MAX_CONCURRENT_LOOKUPS)
        .filter_map(|r| async { r })
        .collect()
        .await;

    if located.is_empty() {
        return ChartResult::NoData(NoDataReason::NoRows);
    }
    ChartResult::Data(located)
}
