//! Insert, select and update workers for the climate-loadtest harness.
//!
//! Each worker owns one connection to the `ClimateData` table for its whole
//! lifetime and runs a fixed number of iterations against it. Workers talk to
//! the database through [`ClimateStore`], opened by a [`StoreConnector`]:
//!
//! - [`MySqlConnector`] opens a real MySQL connection per worker
//! - [`MemoryConnector`] hands out stores sharing one in-process table
//!
//! # Example
//!
//! ```ignore
//! use climate_generator::WorkloadGenerator;
//! use climate_workload::{run_worker, ConnectionConfig, MySqlConnector, WorkerSpec, WorkloadKind};
//!
//! let connector = MySqlConnector::new(ConnectionConfig::default());
//! let spec = WorkerSpec::new(WorkloadKind::Insert, 1, 20);
//! let outcome = run_worker(&connector, spec, WorkloadGenerator::from_entropy()).await;
//! ```

mod args;
mod connection;
mod error;
mod insert;
mod memory;
mod mysql;
mod select;
mod store;
mod update;
mod worker;

pub use args::ConnectionArgs;
pub use connection::ConnectionConfig;
pub use error::WorkloadError;
pub use memory::{MemoryConnector, MemoryStore, MemoryTable};
pub use mysql::{generate_create_table, MySqlConnector, MySqlStore};
pub use store::{ClimateStore, StoreConnector, SELECT_LIMIT, TABLE_NAME};
pub use worker::{run_worker, WorkerId, WorkerOutcome, WorkerSpec, WorkloadKind};

/// Logger name every status line is emitted under.
pub const LOG_TARGET: &str = "db_queries";
