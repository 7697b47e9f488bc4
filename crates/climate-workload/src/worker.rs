//! Worker lifecycle shared by the three workload types.
//!
//! A worker connects once, runs its iteration loop, and always releases the
//! connection afterwards. The first failing statement ends the loop; the
//! remaining iterations are skipped and nothing is retried.

use crate::error::WorkloadError;
use crate::store::{ClimateStore, StoreConnector};
use crate::{insert, select, update, LOG_TARGET};
use climate_generator::{Location, Pacing, WorkloadGenerator};
use std::fmt;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Insert,
    Select,
    Update,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 3] = [
        WorkloadKind::Insert,
        WorkloadKind::Select,
        WorkloadKind::Update,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkloadKind::Insert => "Insert",
            WorkloadKind::Select => "Select",
            WorkloadKind::Update => "Update",
        }
    }

    pub fn default_pacing(self) -> Pacing {
        match self {
            WorkloadKind::Insert => Pacing::INSERT,
            WorkloadKind::Select => Pacing::SELECT,
            WorkloadKind::Update => Pacing::UPDATE,
        }
    }
}

/// Identity of a worker: its workload type and 1-based ordinal within that group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerId {
    pub kind: WorkloadKind,
    pub ordinal: usize,
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Thread {}", self.kind.label(), self.ordinal)
    }
}

/// Everything a worker needs to know besides its connection and RNG.
#[derive(Debug, Clone)]
pub struct WorkerSpec {
    pub id: WorkerId,
    pub iterations: usize,
    pub pacing: Pacing,
    /// Insert workers only: always record this location instead of sampling one.
    pub location: Option<Location>,
}

impl WorkerSpec {
    pub fn new(kind: WorkloadKind, ordinal: usize, iterations: usize) -> Self {
        Self {
            id: WorkerId { kind, ordinal },
            iterations,
            pacing: kind.default_pacing(),
            location: None,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// How a worker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// No connection; nothing ran.
    ConnectFailed,
    /// All iterations ran.
    Completed { iterations: usize },
    /// A statement failed after `completed` successful iterations.
    Aborted { completed: usize },
}

/// Loop interrupted by a failing statement.
#[derive(Debug)]
pub(crate) struct Interrupted {
    pub completed: usize,
    pub error: WorkloadError,
}

/// Run one worker to completion.
pub async fn run_worker<C: StoreConnector>(
    connector: &C,
    spec: WorkerSpec,
    mut generator: WorkloadGenerator,
) -> WorkerOutcome {
    let mut store = match connector.connect().await {
        Ok(store) => store,
        Err(e) => {
            error!(target: LOG_TARGET, "Error connecting to database: {e}");
            return WorkerOutcome::ConnectFailed;
        }
    };
    debug!("{} started ({} iterations)", spec.id, spec.iterations);

    let result = match spec.id.kind {
        WorkloadKind::Insert => insert::run(&mut store, &spec, &mut generator).await,
        WorkloadKind::Select => select::run(&mut store, &spec, &mut generator).await,
        WorkloadKind::Update => update::run(&mut store, &spec, &mut generator).await,
    };

    let outcome = match result {
        Ok(()) => WorkerOutcome::Completed {
            iterations: spec.iterations,
        },
        Err(Interrupted { completed, error }) => {
            error!(target: LOG_TARGET, "{} error: {error}", spec.id);
            WorkerOutcome::Aborted { completed }
        }
    };

    if let Err(e) = store.close().await {
        warn!("{} failed to close its connection: {e}", spec.id);
    }

    outcome
}

/// Sleep for a pause drawn from the worker's pacing.
pub(crate) async fn pace(spec: &WorkerSpec, generator: &mut WorkloadGenerator) {
    let pause = generator.pause(spec.pacing);
    if !pause.is_zero() {
        tokio::time::sleep(pause).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryConnector, MemoryTable};
    use crate::mysql::MySqlConnector;
    use crate::ConnectionConfig;

    #[test]
    fn test_worker_identity_display() {
        let id = WorkerId {
            kind: WorkloadKind::Select,
            ordinal: 7,
        };
        assert_eq!(id.to_string(), "Select Thread 7");
    }

    #[test]
    fn test_default_pacing_per_kind() {
        let spec = WorkerSpec::new(WorkloadKind::Update, 1, 20);
        assert_eq!(spec.pacing, Pacing::UPDATE);
        assert_eq!(spec.with_pacing(Pacing::NONE).pacing, Pacing::NONE);
    }

    #[tokio::test]
    async fn test_insert_worker_completes_all_iterations() {
        let connector = MemoryConnector::new(MemoryTable::new());
        let spec = WorkerSpec::new(WorkloadKind::Insert, 1, 15).with_pacing(Pacing::NONE);

        let outcome = run_worker(&connector, spec, WorkloadGenerator::new(42)).await;

        assert_eq!(outcome, WorkerOutcome::Completed { iterations: 15 });
        assert_eq!(connector.table().len(), 15);
        assert!(connector.table().snapshot().iter().all(|r| r.is_within_bounds()));
    }

    #[tokio::test]
    async fn test_failing_statement_aborts_remaining_iterations() {
        let connector = MemoryConnector::new(MemoryTable::new().with_capacity_limit(4));
        let spec = WorkerSpec::new(WorkloadKind::Insert, 2, 10).with_pacing(Pacing::NONE);

        let outcome = run_worker(&connector, spec, WorkloadGenerator::new(42)).await;

        assert_eq!(outcome, WorkerOutcome::Aborted { completed: 4 });
        assert_eq!(connector.table().len(), 4);
    }

    #[tokio::test]
    async fn test_unreachable_host_runs_nothing() {
        let connector = MySqlConnector::new(ConnectionConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..Default::default()
        });
        let spec = WorkerSpec::new(WorkloadKind::Insert, 1, 3).with_pacing(Pacing::NONE);

        let outcome = run_worker(&connector, spec, WorkloadGenerator::new(1)).await;
        assert_eq!(outcome, WorkerOutcome::ConnectFailed);
    }
}
