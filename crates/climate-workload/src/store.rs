//! The seam between workers and the database.

use crate::error::WorkloadError;
use async_trait::async_trait;
use climate_generator::{ClimateRecord, Predicate, UpdateRule};

/// Table every statement targets.
pub const TABLE_NAME: &str = "ClimateData";

/// Row cap applied to every select.
pub const SELECT_LIMIT: usize = 10;

/// A single connection to the climate table, owned by one worker.
#[async_trait]
pub trait ClimateStore: Send {
    /// Create the table if it does not exist yet.
    async fn ensure_table(&mut self) -> Result<(), WorkloadError>;

    /// Insert one record and commit it.
    async fn insert(&mut self, record: &ClimateRecord) -> Result<(), WorkloadError>;

    /// Fetch at most `limit` rows matching `predicate`; returns how many came back.
    async fn select_where(
        &mut self,
        predicate: &Predicate,
        limit: usize,
    ) -> Result<usize, WorkloadError>;

    /// Apply `rule` to every row its guard admits and commit; returns the affected row count.
    async fn update_where(&mut self, rule: &UpdateRule) -> Result<u64, WorkloadError>;

    /// Release the connection.
    async fn close(self) -> Result<(), WorkloadError>;
}

/// Opens one [`ClimateStore`] per call. No pooling: each worker connects once
/// and keeps the connection for its whole loop.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    type Store: ClimateStore + 'static;

    async fn connect(&self) -> Result<Self::Store, WorkloadError>;
}
