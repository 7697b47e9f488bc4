//! Randomized workload generation for the climate-loadtest harness.
//!
//! Everything a worker needs to decide *what* to send to the database lives
//! here and is free of I/O:
//!
//! - [`ClimateRecord`]s for the insert workload, with temperatures drawn from
//!   the [`ClimateBand`] of their [`Location`] (and, for Sydney, the season)
//! - [`Predicate`]s for the select workload
//! - [`UpdateRule`]s for the update workload
//! - [`Pacing`] pauses between iterations
//!
//! Each worker owns one [`WorkloadGenerator`].
//!
//! # Example
//!
//! ```rust
//! use climate_generator::{Location, WorkloadGenerator};
//!
//! let mut generator = WorkloadGenerator::new(42);
//! let record = generator.record_at(Location::Dubai);
//! assert!((20.0..=45.0).contains(&record.temperature));
//!
//! let predicate = generator.next_predicate();
//! println!("SELECT * FROM ClimateData WHERE {predicate} LIMIT 10");
//! ```

pub mod generator;
pub mod location;
pub mod predicate;
pub mod record;
pub mod update;

pub use generator::{Pacing, WorkloadGenerator};
pub use location::{ClimateBand, Location};
pub use predicate::{select_predicates, Column, CompareOp, Predicate};
pub use record::ClimateRecord;
pub use update::{update_rules, UpdateRule};
