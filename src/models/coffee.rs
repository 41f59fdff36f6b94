use serde::{Deserialize, Deserializer, Serialize};

use crate::aggregate::parse_weight;

/// Header of the canonical bean purchase CSV, in file order.
pub const PURCHASE_COLUMNS: [&str; 9] = [
    "purchase_date",
    "roaster",
    "blend_name",
    "roast_level",
    "roast_date",
    "weight_grams",
    "tasting_notes",
    "origin_country",
    "processing_method",
];

pub const ROASTER_COLUMNS: [&str; 4] = ["name", "city", "state", "website"];

/// One coffee-bag purchase. Dates stay as text until an aggregation parses them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub purchase_date: Option<String>,
    pub roaster: Option<String>,
    pub blend_name: Option<String>,
    pub roast_level: Option<String>,
    pub roast_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_weight")]
    pub weight_grams: Option<f64>,
    pub tasting_notes: Option<String>,
    pub origin_country: Option<String>,
    pub processing_method: Option<String>,
}

/// Unreadable weights load as NULL instead of failing the whole file.
fn lenient_weight<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        let weight = parse_weight(&text);
        if weight.is_none() {
            tracing::warn!("Ignoring unreadable bag weight {:?}", text);
        }
        weight
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roaster {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub website: Option<String>,
}
