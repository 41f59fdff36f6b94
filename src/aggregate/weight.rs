use chrono::NaiveDateTime;

use crate::models::{ChartResult, NoDataReason, Table, WeightPoint};
use crate::normalize::{detect_index, CanonicalField};

use super::{parse_timestamp, parse_weight};

/// Running total of bag weight by purchase date.
///
/// Rows missing a parseable date or a valid weight are left out of both the
/// series and the total. Rows are ordered by full timestamp; identical
/// timestamps keep their input order.
pub fn cumulative_weight(purchases: &Table) -> ChartResult<Vec<WeightPoint>> {
    if purchases.is_empty() {
        return ChartResult::NoData(NoDataReason::EmptyTable);
    }
    let Some(date_col) = detect_index(purchases, CanonicalField::PurchaseDate) else {
        return ChartResult::NoData(NoDataReason::MissingColumn(CanonicalField::PurchaseDate));
    };
    let Some(weight_col) = detect_index(purchases, CanonicalField::Weight) else {
        return ChartResult::NoData(NoDataReason::MissingColumn(CanonicalField::Weight));
    };
    let roaster_col = detect_index(purchases, CanonicalField::Roaster);
    let blend_col = detect_index(purchases, CanonicalField::BlendName);

    let mut points: Vec<(NaiveDateTime, WeightPoint)> = (0..purchases.len())
        .filter_map(|row| {
            let when = parse_timestamp(purchases.get(row, date_col)?)?;
            let weight = parse_weight(purchases.get(row, weight_col)?)?;
            let context = |col: Option<usize>| {
                col.and_then(|c| purchases.get(row, c)).map(String::from)
            };
            Some((
                when,
                WeightPoint {
                    date: when.date(),
                    bag_weight_grams: weight,
                    cumulative_weight_grams: 0.0,
                    roaster: context(roaster_col),
                    blend_name: context(blend_col),
                },
            ))
        })
        .collect();

    if points.is_empty() {
        return ChartResult::NoData(NoDataReason::NoRows);
    }

    points.sort_by_key(|(when, _)| *when);

    let mut total = 0.0;
    let series = points
        .into_iter()
        .map(|(_, mut point)| {
            total += point.bag_weight_grams;
            point.cumulative_weight_grams = total;
            point
        })
        .collect();

    ChartResult::Data(series)
}
