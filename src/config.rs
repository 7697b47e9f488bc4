//! Run configuration.
//!
//! Everything the orchestrator needs is collected into one immutable
//! [`RunConfig`] at startup. The workload shape (group sizes, iteration
//! count, pacing) is fixed; only where to connect and how to log come from
//! the command line.

use climate_generator::Pacing;
use climate_workload::{ConnectionConfig, WorkerSpec, WorkloadKind};

/// Default log file, written next to the console output.
pub const DEFAULT_LOG_FILE: &str = "db_query_execution.log";

pub const INSERT_WORKERS: usize = 5;
pub const SELECT_WORKERS: usize = 10;
pub const UPDATE_WORKERS: usize = 5;
pub const ITERATIONS_PER_WORKER: usize = 20;

/// Group sizes and iteration count of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadPlan {
    pub insert_workers: usize,
    pub select_workers: usize,
    pub update_workers: usize,
    pub iterations: usize,
    /// Replaces every group's own pacing when set.
    pub pacing: Option<Pacing>,
}

impl Default for WorkloadPlan {
    fn default() -> Self {
        Self {
            insert_workers: INSERT_WORKERS,
            select_workers: SELECT_WORKERS,
            update_workers: UPDATE_WORKERS,
            iterations: ITERATIONS_PER_WORKER,
            pacing: None,
        }
    }
}

impl WorkloadPlan {
    pub fn workers(&self, kind: WorkloadKind) -> usize {
        match kind {
            WorkloadKind::Insert => self.insert_workers,
            WorkloadKind::Select => self.select_workers,
            WorkloadKind::Update => self.update_workers,
        }
    }

    pub fn total_workers(&self) -> usize {
        WorkloadKind::ALL.iter().map(|k| self.workers(*k)).sum()
    }

    pub fn pacing_for(&self, kind: WorkloadKind) -> Pacing {
        self.pacing.unwrap_or_else(|| kind.default_pacing())
    }

    /// One spec per worker, grouped by kind, ordinals starting at 1 in each group.
    pub fn specs(&self) -> Vec<WorkerSpec> {
        WorkloadKind::ALL
            .iter()
            .flat_map(|kind| {
                (1..=self.workers(*kind)).map(move |ordinal| {
                    WorkerSpec::new(*kind, ordinal, self.iterations)
                        .with_pacing(self.pacing_for(*kind))
                })
            })
            .collect()
    }
}

/// Which store the workers run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    MySql,
    /// In-process table; nothing leaves the process.
    Memory,
}

#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub connection: ConnectionConfig,
    pub plan: WorkloadPlan,
    pub backend: Backend,
    /// Base seed for reproducible runs; every worker seeds from entropy when unset.
    pub seed: Option<u64>,
    /// Issue `CREATE TABLE IF NOT EXISTS` before starting the workers.
    pub create_table: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_plan() {
        let plan = WorkloadPlan::default();
        assert_eq!(plan.total_workers(), 20);
        assert_eq!(plan.iterations, 20);
        assert_eq!(plan.pacing_for(WorkloadKind::Insert), Pacing::INSERT);
        assert_eq!(plan.pacing_for(WorkloadKind::Select), Pacing::SELECT);
        assert_eq!(plan.pacing_for(WorkloadKind::Update), Pacing::UPDATE);
    }

    #[test]
    fn test_specs_are_numbered_per_group() {
        let plan = WorkloadPlan {
            insert_workers: 2,
            select_workers: 3,
            update_workers: 1,
            iterations: 7,
            pacing: Some(Pacing::NONE),
        };

        let ids: Vec<String> = plan.specs().iter().map(|s| s.id.to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "Insert Thread 1",
                "Insert Thread 2",
                "Select Thread 1",
                "Select Thread 2",
                "Select Thread 3",
                "Update Thread 1",
            ]
        );
        assert!(plan
            .specs()
            .iter()
            .all(|s| s.iterations == 7 && s.pacing == Pacing::NONE));
    }
}
