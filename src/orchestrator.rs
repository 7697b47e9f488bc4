//! Starts every worker, waits for all of them and reports the run.

use crate::config::{Backend, RunConfig, WorkloadPlan};
use climate_generator::WorkloadGenerator;
use climate_workload::{
    run_worker, ClimateStore, MemoryConnector, MySqlConnector, StoreConnector, WorkerOutcome,
    WorkloadError, WorkloadKind, LOG_TARGET,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Run the configured workload against the configured backend.
pub async fn execute(config: RunConfig) -> anyhow::Result<Duration> {
    match config.backend {
        Backend::MySql => {
            info!("Target: {}", config.connection.masked_url());
            let connector = Arc::new(MySqlConnector::new(config.connection.clone()));
            execute_with(connector, &config).await
        }
        Backend::Memory => {
            info!("[DRY-RUN] Using an in-memory ClimateData table");
            let connector = Arc::new(MemoryConnector::default());
            let elapsed = execute_with(connector.clone(), &config).await?;
            info!(
                "[DRY-RUN] Table holds {} rows after the run",
                connector.table().len()
            );
            Ok(elapsed)
        }
    }
}

async fn execute_with<C>(connector: Arc<C>, config: &RunConfig) -> anyhow::Result<Duration>
where
    C: StoreConnector + 'static,
{
    if config.create_table {
        prepare_table(connector.as_ref()).await?;
    }
    Ok(run_workers(connector, &config.plan, config.seed).await)
}

/// Create the table on a short-lived connection of its own.
pub async fn prepare_table<C: StoreConnector>(connector: &C) -> Result<(), WorkloadError> {
    let mut store = connector.connect().await?;
    let created = store.ensure_table().await;
    store.close().await?;
    created?;
    info!("Ensured table {} exists", climate_workload::TABLE_NAME);
    Ok(())
}

/// Spawn one task per worker in `plan`, wait for all of them, and log the
/// total wall-clock time. Individual outcomes are only logged at debug level.
pub async fn run_workers<C>(connector: Arc<C>, plan: &WorkloadPlan, seed: Option<u64>) -> Duration
where
    C: StoreConnector + 'static,
{
    info!(target: LOG_TARGET, "Starting concurrent database query execution...");

    let start = Instant::now();
    let mut workers = JoinSet::new();

    for (index, spec) in plan.specs().into_iter().enumerate() {
        let generator = match seed {
            Some(seed) => WorkloadGenerator::for_worker(seed, index as u64),
            None => WorkloadGenerator::from_entropy(),
        };
        let connector = Arc::clone(&connector);
        workers.spawn(async move {
            let id = spec.id;
            let outcome = run_worker(connector.as_ref(), spec, generator).await;
            (id, outcome)
        });
    }

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((id, WorkerOutcome::Completed { iterations })) => {
                debug!("{id} finished {iterations} iterations");
            }
            Ok((id, WorkerOutcome::Aborted { completed })) => {
                debug!("{id} stopped after {completed} iterations");
            }
            Ok((id, WorkerOutcome::ConnectFailed)) => {
                debug!("{id} never connected");
            }
            Err(e) => error!("Worker task failed: {e}"),
        }
    }

    let elapsed = start.elapsed();
    info!(
        target: LOG_TARGET,
        "All threads completed. Total execution time: {:.2} seconds",
        elapsed.as_secs_f64()
    );
    info!(
        target: LOG_TARGET,
        "Executed {} insert threads, {} select threads, and {} update threads, each with {} iterations",
        plan.workers(WorkloadKind::Insert),
        plan.workers(WorkloadKind::Select),
        plan.workers(WorkloadKind::Update),
        plan.iterations
    );

    elapsed
}
