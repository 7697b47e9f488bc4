//! Update workload: a randomly chosen guarded delta per iteration.

use crate::store::ClimateStore;
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
        let rule = generator.next_update_rule().clone();

        let start = Instant::now();
        let affected = store
            .update_where(&rule)
            .await
            .map_err(|error| Interrupted { completed, error })?;
        let took = start.elapsed();

        info!(
            target: LOG_TARGET,
            "{}: Updated {} rows with '{} = {}' where '{}' (took {:.4}s)",
            spec.id,
            affected,
            rule.column,
            rule.expression(),
            rule.guard,
            took.as_secs_f64()
        );

        pace(spec, generator).await;
    }

    Ok(())
}
