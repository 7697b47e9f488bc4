//! Error types for the workers.

use thiserror::Error;

/// Errors a worker can run into while talking to its store.
#[derive(Error, Debug)]
pub enum WorkloadError {
    /// The connection could not be established.
    #[error("{0}")]
    Connect(#[source] mysql_async::Error),

    /// MySQL statement error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// The in-memory table reached its row capacity.
    #[error("The table '{table}' is full ({capacity} rows)")]
    TableFull { table: &'static str, capacity: usize },
}
