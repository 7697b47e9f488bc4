//! Locations and their temperature bands.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::RangeInclusive;

/// One of the fixed cities observations are recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Toronto,
    NewYork,
    London,
    Tokyo,
    Sydney,
    Paris,
    Berlin,
    Moscow,
    Beijing,
    Dubai,
}

/// Climate band a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateBand {
    Cold,
    Temperate,
    Variable,
    Hot,
    /// Seasons are inverted, so the band depends on the month.
    SouthernHemisphere,
}

impl Location {
    /// All locations, in the order they are sampled from.
    pub const ALL: [Location; 10] = [
        Location::Toronto,
        Location::NewYork,
        Location::London,
        Location::Tokyo,
        Location::Sydney,
        Location::Paris,
        Location::Berlin,
        Location::Moscow,
        Location::Beijing,
        Location::Dubai,
    ];

    /// Name as stored in the `location` column.
    pub fn name(self) -> &'static str {
        match self {
            Location::Toronto => "Toronto",
            Location::NewYork => "New York",
            Location::London => "London",
            Location::Tokyo => "Tokyo",
            Location::Sydney => "Sydney",
            Location::Paris => "Paris",
            Location::Berlin => "Berlin",
            Location::Moscow => "Moscow",
            Location::Beijing => "Beijing",
            Location::Dubai => "Dubai",
        }
    }

    pub fn band(self) -> ClimateBand {
        match self {
            Location::Toronto | Location::NewYork | Location::Moscow | Location::Berlin => {
                ClimateBand::Cold
            }
            Location::London | Location::Paris => ClimateBand::Temperate,
            Location::Tokyo | Location::Beijing => ClimateBand::Variable,
            Location::Dubai => ClimateBand::Hot,
            Location::Sydney => ClimateBand::SouthernHemisphere,
        }
    }

    /// Temperature range (°C, inclusive) for a record at this location on `date`.
    pub fn temperature_range(self, date: NaiveDate) -> RangeInclusive<f64> {
        match self.band() {
            ClimateBand::Cold => -10.0..=30.0,
            ClimateBand::Temperate => 0.0..=25.0,
            ClimateBand::Variable => 5.0..=35.0,
            ClimateBand::Hot => 20.0..=45.0,
            ClimateBand::SouthernHemisphere => {
                if is_southern_summer(date) {
                    20.0..=35.0
                } else {
                    10.0..=25.0
                }
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// December, January and February.
fn is_southern_summer(date: NaiveDate) -> bool {
    matches!(date.month(), 12 | 1 | 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_names_are_distinct() {
        let mut names: Vec<&str> = Location::ALL.iter().map(|l| l.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_bands() {
        assert_eq!(Location::Moscow.band(), ClimateBand::Cold);
        assert_eq!(Location::Paris.band(), ClimateBand::Temperate);
        assert_eq!(Location::Beijing.band(), ClimateBand::Variable);
        assert_eq!(Location::Dubai.band(), ClimateBand::Hot);
        assert_eq!(Location::Sydney.band(), ClimateBand::SouthernHemisphere);
    }

    #[test]
    fn test_sydney_range_follows_season() {
        assert_eq!(
            Location::Sydney.temperature_range(date(2023, 7, 15)),
            10.0..=25.0
        );
        assert_eq!(
            Location::Sydney.temperature_range(date(2023, 1, 15)),
            20.0..=35.0
        );
        assert_eq!(
            Location::Sydney.temperature_range(date(2023, 12, 1)),
            20.0..=35.0
        );
        assert_eq!(
            Location::Sydney.temperature_range(date(2023, 3, 1)),
            10.0..=25.0
        );
    }

    #[test]
    fn test_northern_range_ignores_season() {
        assert_eq!(
            Location::Dubai.temperature_range(date(2023, 1, 15)),
            Location::Dubai.temperature_range(date(2023, 7, 15))
        );
    }

    #[test]
    fn test_display_uses_column_value() {
        assert_eq!(Location::NewYork.to_string(), "New York");
    }
}
