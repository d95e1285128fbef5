use std::collections::HashMap;

use log::debug;
use logging_timer::time;
use time::{Duration, PrimitiveDateTime};

use crate::{
    error::ConversionError,
    model::{fields, Sample},
};

use super::WorkoutExport;

/// Zips the value vector of every raw sample against the descriptor to make
/// the named Samples the rest of the pipeline works on. The timestamp of each
/// sample is the start time plus its elapsed seconds, taken as UTC.
#[time]
pub fn build_samples(
    export: &WorkoutExport,
    start_time: PrimitiveDateTime,
) -> Result<Vec<Sample>, ConversionError> {
    for required in [fields::SPEED, fields::REPORTED_DISTANCE] {
        if !export.descriptor.iter().any(|name| name == required) {
            return Err(ConversionError::malformed(format!(
                "the descriptor has no '{required}' field"
            )));
        }
    }

    let start_time = start_time.assume_utc();
    let mut samples = Vec::with_capacity(export.samples.len());
    let mut prev_elapsed = 0;

    for (idx, raw) in export.samples.iter().enumerate() {
        if raw.values.len() > export.descriptor.len() {
            return Err(ConversionError::malformed(format!(
                "sample {idx} has {} values but the descriptor only names {}",
                raw.values.len(),
                export.descriptor.len()
            )));
        }

        if raw.elapsed_seconds < prev_elapsed {
            return Err(ConversionError::malformed(format!(
                "sample {idx} at t={} comes after a sample at t={prev_elapsed}",
                raw.elapsed_seconds
            )));
        }
        prev_elapsed = raw.elapsed_seconds;

        // A short vector simply leaves the trailing fields absent.
        let values: HashMap<_, _> = export
            .descriptor
            .iter()
            .cloned()
            .zip(raw.values.iter().cloned())
            .collect();

        let timestamp = start_time + Duration::seconds(raw.elapsed_seconds.into());
        samples.push(Sample::new(raw.elapsed_seconds, timestamp, values));
    }

    debug!(
        "Built {} samples with {} fields each",
        samples.len(),
        export.descriptor.len()
    );

    Ok(samples)
}
