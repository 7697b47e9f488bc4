//! Insert workload: one synthesized record per iteration.

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
        let record = match spec.location {
            Some(location) => generator.record_at(location),
            None => generator.next_record(),
        };

        let start = Instant::now();
        store
            .insert(&record)
            .await
            .map_err(|error| Interrupted { completed, error })?;
        let took = start.elapsed();

        info!(
            target: LOG_TARGET,
            "{}: Added record for {} on {}, temp={:.1}°C, precip={:.1}mm, humidity={:.1}% (took {:.4}s)",
            spec.id,
            record.location,
            record.record_date,
            record.temperature,
            record.precipitation,
            record.humidity,
            took.as_secs_f64()
        );

        pace(spec, generator).await;
    }

    Ok(())
}
