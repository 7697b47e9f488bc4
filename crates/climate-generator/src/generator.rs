//! Per-worker random source for records, predicates, rules and pacing.

use crate::location::Location;
use crate::predicate::{select_predicates, Predicate};
use crate::record::{first_day, ClimateRecord, DAYS_IN_YEAR, HUMIDITY_RANGE, PRECIPITATION_RANGE};
use crate::update::{update_rules, UpdateRule};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Sleep range between two iterations of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub min: Duration,
    pub max: Duration,
}

impl Pacing {
    pub const INSERT: Pacing = Pacing::millis(100, 500);
    pub const SELECT: Pacing = Pacing::millis(50, 200);
    pub const UPDATE: Pacing = Pacing::millis(100, 300);
    /// No pause at all.
    pub const NONE: Pacing = Pacing::millis(0, 0);

    pub const fn millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }
}

/// Random source owned by a single worker.
///
/// Workers never share a generator. With a seed the sequence is
/// reproducible; [`WorkloadGenerator::from_entropy`] gives an unseeded one.
pub struct WorkloadGenerator {
    rng: StdRng,
    predicates: Vec<Predicate>,
    rules: Vec<UpdateRule>,
}

impl WorkloadGenerator {
    /// Create a generator with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create the generator for the `ordinal`-th worker of a seeded run.
    ///
    /// Distinct workers get decorrelated streams derived from the same base seed.
    pub fn for_worker(base_seed: u64, ordinal: u64) -> Self {
        Self::new(base_seed.wrapping_add(ordinal.wrapping_mul(0x9E3779B97F4A7C15)))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            predicates: select_predicates(),
            rules: update_rules(),
        }
    }

    /// A record for a uniformly chosen location.
    pub fn next_record(&mut self) -> ClimateRecord {
        let location = self.next_location();
        self.record_at(location)
    }

    /// A record for `location` on a uniformly chosen day of the year.
    pub fn record_at(&mut self, location: Location) -> ClimateRecord {
        let date = self.next_date();
        self.record_on(location, date)
    }

    /// A record for `location` on `date`; only the measurements are random.
    pub fn record_on(&mut self, location: Location, record_date: NaiveDate) -> ClimateRecord {
        let temperature = self
            .rng
            .gen_range(location.temperature_range(record_date));
        let precipitation = self.rng.gen_range(PRECIPITATION_RANGE);
        let humidity = self.rng.gen_range(HUMIDITY_RANGE);

        ClimateRecord {
            location,
            record_date,
            temperature,
            precipitation,
            humidity,
        }
    }

    pub fn next_location(&mut self) -> Location {
        Location::ALL[self.rng.gen_range(0..Location::ALL.len())]
    }

    pub fn next_date(&mut self) -> NaiveDate {
        let offset = self.rng.gen_range(0..DAYS_IN_YEAR);
        first_day() + Days::new(u64::from(offset))
    }

    pub fn next_predicate(&mut self) -> &Predicate {
        let idx = self.rng.gen_range(0..self.predicates.len());
        &self.predicates[idx]
    }

    pub fn next_update_rule(&mut self) -> &UpdateRule {
        let idx = self.rng.gen_range(0..self.rules.len());
        &self.rules[idx]
    }

    /// A pause drawn uniformly from the pacing range.
    pub fn pause(&mut self, pacing: Pacing) -> Duration {
        if pacing.max <= pacing.min {
            return pacing.min;
        }
        Duration::from_secs_f64(
            self.rng
                .gen_range(pacing.min.as_secs_f64()..=pacing.max.as_secs_f64()),
        )
    }
}
