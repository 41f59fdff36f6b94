use std::collections::HashMap;

use crate::models::{ChartResult, NoDataReason, RoastLevelShare, Table};
use crate::normalize::{detect_index, CanonicalField};

/// Share of purchases per roast level.
///
/// Ordered by count, highest first; equal counts keep the order in which the
/// levels first appear. Values are trimmed but otherwise compared verbatim.
pub fn roast_level_proportions(purchases: &Table) -> ChartResult<Vec<RoastLevelShare>> {
    if purchases.is_empty() {
        return ChartResult::NoData(NoDataReason::EmptyTable);
    }
    let Some(col) = detect_index(purchases, CanonicalField::RoastLevel) else {
        return ChartResult::NoData(NoDataReason::MissingColumn(CanonicalField::RoastLevel));
    };

    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for row in 0..purchases.len() {
        let Some(level) = purchases.get(row, col) else {
            continue;
        };
        match positions.get(level) {
            Some(&pos) => order[pos].1 += 1,
            None => {
                positions.insert(level, order.len());
                order.push((level, 1));
            }
        }
    }

    let total: usize = order.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return ChartResult::NoData(NoDataReason::NoRows);
    }

    // stable: ties stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));

    ChartResult::Data(
        order
            .into_iter()
            .map(|(level, count)| RoastLevelShare {
                roast_level: level.to_string(),
                count,
                proportion: count as f64 / total as f64,
            })
            .collect(),
    )
}
