use std::collections::HashMap;

use crate::models::{ChartResult, NoDataReason, RoasterCount, Table};
use crate::normalize::{detect_index, CanonicalField};

/// Purchases per roaster, most-bought first, ties broken by name.
///
/// When a roaster table is supplied each entry is annotated with the joined
/// roaster's "city, state".
pub fn roaster_distribution(
    purchases: &Table,
    roasters: Option<&Table>,
) -> ChartResult<Vec<RoasterCount>> {
    if purchases.is_empty() {
        return ChartResult::NoData(NoDataReason::EmptyTable);
    }
    let Some(roaster_col) = detect_index(purchases, CanonicalField::Roaster) else {
        return ChartResult::NoData(NoDataReason::MissingColumn(CanonicalField::Roaster));
    };

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in 0..purchases.len() {
        if let Some(name) = purchases.get(row, roaster_col) {
            *counts.entry(name).or_default() += 1;
        }
    }
    if counts.is_empty() {
        return ChartResult::NoData(NoDataReason::NoRows);
    }

    let locations = roasters.map(location_index).unwrap_or_default();

    let mut result: Vec<RoasterCount> = counts
        .into_iter()
        .map(|(name, count)| RoasterCount {
            roaster: name.to_string(),
            count,
            location: locations.get(name).cloned(),
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.roaster.cmp(&b.roaster)));

    ChartResult::Data(result)
}

/// Roaster name -> "city, state" for roasters that have both.
/// The first row wins when a name repeats.
fn location_index(roasters: &Table) -> HashMap<&str, String> {
    let mut index = HashMap::new();
    let (Some(name_col), Some(city_col), Some(state_col)) = (
        detect_index(roasters, CanonicalField::RoasterName),
        detect_index(roasters, CanonicalField::City),
        detect_index(roasters, CanonicalField::State),
    ) else {
        return index;
    };

    for row in 0..roasters.len() {
        let (Some(name), Some(city), Some(state)) = (
            roasters.get(row, name_col),
            roasters.get(row, city_col),
            roasters.get(row, state_col),
        ) else {
            continue;
        };
        index.entry(name).or_insert_with(|| format!("{city}, {state}"));
    }
    index
}
