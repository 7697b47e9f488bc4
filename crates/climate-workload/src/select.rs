//! Select workload: a randomly chosen filter per iteration, capped at
//! [`SELECT_LIMIT`] rows.

use crate::store::{ClimateStore, SELECT_LIMIT};
use crate::worker::{pace, Interrupted, WorkerSpec};
use crate::LOG_TARGET;
use climate_generator::WorkloadGenerator;
use std::time::Instant;
use tracing::info;

pub(crate) async fn run<S: ClimateStore>(
    store: &mut S,
    spec: &WorkerSpec,
    generator: &mut WorkloadGenerator,
) -> Result<(), Interrupted> {
    for completed in 0..spec.iterations {
        let predicate = generator.next_predicate().clone();

        let start = Instant::now();
        let returned = store
            .select_where(&predicate, SELECT_LIMIT)
            .await
            .map_err(|error| Interrupted { completed, error })?;
        let took = start.elapsed();

        info!(
            target: LOG_TARGET,
            "{}: Query '{}' returned {} results (took {:.4}s)",
            spec.id,
            predicate,
            returned,
            took.as_secs_f64()
        );

        pace(spec, generator).await;
    }

    Ok(())
}
