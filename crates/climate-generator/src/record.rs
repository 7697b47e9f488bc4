//! The climate observation row.

use crate::location::Location;
use chrono::NaiveDate;
use std::ops::RangeInclusive;

/// Year all generated records fall in.
pub const RECORD_YEAR: i32 = 2023;

/// Number of days records are spread over, starting at January 1st.
pub const DAYS_IN_YEAR: u32 = 365;

/// Precipitation range in millimetres.
pub const PRECIPITATION_RANGE: RangeInclusive<f64> = 0.0..=20.0;

/// Relative humidity range in percent.
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 40.0..=90.0;

/// One row of the `ClimateData` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateRecord {
    pub location: Location,
    pub record_date: NaiveDate,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Millimetres.
    pub precipitation: f64,
    /// Percent.
    pub humidity: f64,
}

impl ClimateRecord {
    /// Whether every attribute lies in the bounds records are generated with.
    pub fn is_within_bounds(&self) -> bool {
        self.record_date >= first_day()
            && self.record_date <= last_day()
            && self
                .location
                .temperature_range(self.record_date)
                .contains(&self.temperature)
            && PRECIPITATION_RANGE.contains(&self.precipitation)
            && HUMIDITY_RANGE.contains(&self.humidity)
    }
}

/// First day of [`RECORD_YEAR`].
pub fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(RECORD_YEAR, 1, 1).unwrap_or_default()
}

/// Last day of [`RECORD_YEAR`].
pub fn last_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(RECORD_YEAR, 12, 31).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert_eq!(first_day().to_string(), "2023-01-01");
        assert_eq!(last_day().to_string(), "2023-12-31");
        assert_eq!(
            (last_day() - first_day()).num_days() + 1,
            DAYS_IN_YEAR as i64
        );
    }

    #[test]
    fn test_bounds_check() {
        let mut record = ClimateRecord {
            location: Location::Dubai,
            record_date: NaiveDate::from_ymd_opt(2023, 5, 5).unwrap(),
            temperature: 30.0,
            precipitation: 0.0,
            humidity: 90.0,
        };
        assert!(record.is_within_bounds());

        record.temperature = 19.9;
        assert!(!record.is_within_bounds());

        record.temperature = 30.0;
        record.record_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(!record.is_within_bounds());
    }
}
