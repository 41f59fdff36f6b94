use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::{
    cumulative_weight, roast_level_proportions, roaster_distribution, roaster_locations,
};
use crate::geo::Geocoder;
use crate::models::{ChartResult, RoastLevelShare, RoasterCount, RoasterLocation, Roaster, Table, WeightPoint};
use crate::normalize::{detect, detect_index, normalize, CanonicalField};
use crate::source::{RecordSource, TableKind};

#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    /// Only map roasters that appear in the purchase table.
    pub restrict_map_to_purchased: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            restrict_map_to_purchased: true,
        }
    }
}

/// Everything one render needs, built from a single load of both tables.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub purchase_count: usize,
    pub roasters: Vec<Roaster>,
    pub roaster_distribution: ChartResult<Vec<RoasterCount>>,
    pub roast_levels: ChartResult<Vec<RoastLevelShare>>,
    pub cumulative_weight: ChartResult<Vec<WeightPoint>>,
    pub roaster_locations: ChartResult<Vec<RoasterLocation>>,
}

impl Dashboard {
    pub async fn build<G: Geocoder>(
        source: &RecordSource,
        geocoder: &G,
        options: DashboardOptions,
    ) -> Self {
        let purchases = normalize(source.load(TableKind::Purchases).await);
        let roasters = normalize(source.load(TableKind::Roasters).await);

        for field in [
            CanonicalField::PurchaseDate,
            CanonicalField::Weight,
            CanonicalField::RoastLevel,
            CanonicalField::Roaster,
        ] {
            tracing::debug!("{} column: {:?}", field.label(), detect(&purchases, field));
        }
        Self::from_tables(&purchases, &roasters, geocoder, options).await
    }

    pub async fn from_tables<G: Geocoder>(
        purchases: &Table,
        roasters: &Table,
        geocoder: &G,
        options: DashboardOptions,
    ) -> Self {
        let restrict = options.restrict_map_to_purchased.then_some(purchases);

        Self {
            generated_at: Utc::now(),
            purchase_count: purchases.len(),
            roasters: roaster_directory(roasters),
            roaster_distribution: roaster_distribution(purchases, Some(roasters)),
            roast_levels: roast_level_proportions(purchases),
            cumulative_weight: cumulative_weight(purchases),
            roaster_locations: roaster_locations(roasters, restrict, geocoder).await,
        }
    }
}

/// Roaster rows with a name, in table order.
fn roaster_directory(roasters: &Table) -> Vec<Roaster> {
    let Some(name_col) = detect_index(roasters, CanonicalField::RoasterName) else {
        return Vec::new();
    };
    let city_col = detect_index(roasters, CanonicalField::City);
    let state_col = detect_index(roasters, CanonicalField::State);
    let website_col = detect_index(roasters, CanonicalField::Website);

    (0..roasters.len())
        .filter_map(|row| {
            let cell = |col: Option<usize>| col.and_then(|c| roasters.get(row, c)).map(String::from);
            Some(Roaster {
                name: roasters.get(row, name_col)?.to_string(),
                city: cell(city_col),
                state: cell(state_col),
                website: cell(website_col),
            })
        })
        .collect()
}
