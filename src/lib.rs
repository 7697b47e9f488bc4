//! climate-loadtest: concurrent load against a MySQL climate observations table.
//!
//! The harness starts a fixed pool of workers (5 insert, 10 select and
//! 5 update in the reference configuration). Each worker owns one connection
//! and runs a fixed number of iterations, logging every statement's outcome
//! and latency through a shared, mutex-guarded log sink.
//!
//! - [`config`]: the immutable run configuration
//! - [`logging`]: the log gate and the subscriber built on it
//! - [`orchestrator`]: spawns and joins the workers
//!
//! Record generation lives in `climate-generator`; the workers and the
//! MySQL/in-memory stores live in `climate-workload`.

pub mod config;
pub mod logging;
pub mod orchestrator;

pub use config::{Backend, RunConfig, WorkloadPlan};
