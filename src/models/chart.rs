use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::CanonicalField;

pub const PLACEHOLDER_TITLE: &str = "No data available";

pub const ROASTER_DISTRIBUTION_TITLE: &str = "Distribution of Coffee Beans by Roaster";
pub const ROAST_LEVEL_TITLE: &str = "Roast Level Proportions";
pub const CUMULATIVE_WEIGHT_TITLE: &str = "Cumulative Weight of Beans Consumed Over Time";
pub const ROASTER_LOCATIONS_TITLE: &str = "Roaster Locations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "field", rename_all = "snake_case")]
pub enum NoDataReason {
    /// The input table had no rows.
    EmptyTable,
    /// None of the candidate headers for a field were present.
    MissingColumn(CanonicalField),
    /// Every row was filtered out.
    NoRows,
}

impl NoDataReason {
    pub fn describe(&self) -> String {
        match self {
            NoDataReason::EmptyTable => "no records loaded".to_string(),
            NoDataReason::MissingColumn(field) => format!("no {} column", field.label()),
            NoDataReason::NoRows => "no usable rows".to_string(),
        }
    }
}

/// Outcome of one aggregation: either chart-ready rows or the reason there are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ChartResult<T> {
    Data(T),
    NoData(NoDataReason),
}

impl<T> ChartResult<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            ChartResult::Data(data) => Some(data),
            ChartResult::NoData(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoasterCount {
    pub roaster: String,
    pub count: usize,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoastLevelShare {
    pub roast_level: String,
    pub count: usize,
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub bag_weight_grams: f64,
    pub cumulative_weight_grams: f64,
    pub roaster: Option<String>,
    pub blend_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoasterLocation {
    pub roaster: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city_state: String,
    pub label: String,
}
