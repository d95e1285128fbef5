use log::debug;

use crate::{error::ConversionError, model::Sample};

/// The equipment keeps recording after the workout has finished, which shows
/// up as a run of samples with neither speed nor power at the end. Removes
/// them, stopping at the first sample (working backwards) that has either.
///
/// Trimming an already trimmed list removes nothing. It is an error for the
/// whole activity to be idle.
pub fn trim_trailing_idle(samples: &mut Vec<Sample>) -> Result<(), ConversionError> {
    let start_count = samples.len();
    let keep = samples
        .iter()
        .rposition(|s| !s.is_idle())
        .map_or(0, |idx| idx + 1);
    samples.truncate(keep);

    debug!(
        "Trimmed {} idle samples from the end, {} remain",
        start_count - samples.len(),
        samples.len()
    );

    if samples.is_empty() {
        return Err(ConversionError::EmptyActivity);
    }

    Ok(())
}
