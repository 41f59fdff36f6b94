//! Chart-ready summaries derived from the normalized purchase and roaster tables.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

mod locations;
mod roast_levels;
mod roasters;
mod weight;

pub use locations::roaster_locations;
pub use roast_levels::roast_level_proportions;
pub use roasters::roaster_distribution;
pub use weight::cumulative_weight;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// `%.f` also matches when there is no fractional part.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

// Postgres renders timestamptz as `2024-01-01 00:00:00+00`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z"];

/// Parse a purchase timestamp in one of the formats the data has been kept in.
/// Bare dates are midnight; offsets keep their wall-clock time.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_timestamp(s).map(|dt| dt.date())
}

/// Bag weight in grams; negative or non-finite values are malformed.
pub fn parse_weight(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 15);
        assert_eq!(parse_date("2024-02-15"), expected);
        assert_eq!(parse_date("2024/02/15"), expected);
        assert_eq!(parse_date("02/15/2024"), expected);
        assert_eq!(parse_date("2024-02-15 08:30:00"), expected);
        assert_eq!(parse_date("2024-02-15T08:30:00-08:00"), expected);
        assert_eq!(parse_date(" 2024-02-15 "), expected);
    }

    #[test]
    fn parses_warehouse_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(parse_date("2024-01-01 00:00:00+00"), expected);
        assert_eq!(parse_date("2024-01-01 08:30:00.123"), expected);
        assert_eq!(parse_date("2024-01-01T08:30:00"), expected);
        assert_eq!(parse_date("2024-01-01 23:30:00.5-08"), expected);
        assert_eq!(parse_date("2024-01-01T08:30:00.250Z"), expected);
    }

    #[test]
    fn timestamps_keep_time_of_day() {
        let at = |h, m| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(h, m, 0);
        assert_eq!(parse_timestamp("2024-01-01"), at(0, 0));
        assert_eq!(parse_timestamp("2024-01-01 08:30:00"), at(8, 30));
        assert_eq!(parse_timestamp("2024-01-01 17:05:00+02"), at(17, 5));
    }

    #[test]
    fn rejects_invalid_dates() {
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn weight_must_be_a_non_negative_number() {
        assert_eq!(parse_weight("340"), Some(340.0));
        assert_eq!(parse_weight(" 12.5 "), Some(12.5));
        assert_eq!(parse_weight("0"), Some(0.0));
        assert_eq!(parse_weight("-1"), None);
        assert_eq!(parse_weight("NaN"), None);
        assert_eq!(parse_weight("inf"), None);
        assert_eq!(parse_weight("12oz"), None);
    }
}
