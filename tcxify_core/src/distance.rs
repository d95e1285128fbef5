//! Reconciles the two distance signals the equipment gives us.
//!
//! The reported cumulative distance ('HDistance') is accurate in total but is
//! so coarse grained that speeds derived from it alternate between 0 and
//! implausible values, which platforms like Strava then display as a sawtooth.
//! The instantaneous speed is smooth but drifts away from the real total over
//! a long activity. So we integrate the speed, and then scale every increment
//! by a single factor so that the integrated total lands exactly on the
//! reported total.
//!
//! A single global factor concentrates the remaining error towards the end of
//! the activity. Smoothing within a moving window would spread it out, but is
//! not done yet.

use log::{debug, warn};
use logging_timer::time;

use crate::{error::ConversionError, model::Sample};

/// The scale factor must be strictly greater than this.
pub const MIN_SCALE_FACTOR: f64 = 0.95;
/// The scale factor must be strictly less than this.
pub const MAX_SCALE_FACTOR: f64 = 1.05;

/// The outcome of reconciling the integrated and reported distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceReconciliation {
    /// The reported distance of the first sample, which both integrations
    /// start from.
    pub seed_metres: f64,
    /// The total distance obtained by integrating speed over time.
    pub estimated_metres: f64,
    /// The reported distance of the last sample.
    pub reported_metres: f64,
    /// The factor applied to each integrated increment.
    pub scale_factor: f64,
}

/// The distance covered between `prev` and `cur`, based on the speed at `cur`.
fn increment_metres(prev: &Sample, cur: &Sample) -> f64 {
    let delta_seconds = f64::from(cur.elapsed_seconds) - f64::from(prev.elapsed_seconds);
    delta_seconds * cur.speed_mps()
}

/// Integrates speed over the samples without modifying them. Returns the
/// estimated cumulative distance at the last sample.
pub fn estimate_distance_metres(samples: &[Sample], seed_metres: f64) -> f64 {
    samples
        .windows(2)
        .map(|pair| increment_metres(&pair[0], &pair[1]))
        .fold(seed_metres, |acc, inc| acc + inc)
}

/// Calculates the factor that stretches the integrated increments to cover
/// the reported distance. A recording in which nothing moved and nothing was
/// reported needs no correction.
pub fn calculate_scale_factor(seed_metres: f64, estimated_metres: f64, reported_metres: f64) -> f64 {
    let integrated = estimated_metres - seed_metres;
    let reported = reported_metres - seed_metres;
    if integrated == 0.0 && reported == 0.0 {
        1.0
    } else {
        reported / integrated
    }
}

/// Fills in `delta_metres` and `smooth_distance_metres` for every sample.
///
/// The final smooth distance equals the reported distance of the last sample.
/// If the scale factor needed to achieve that is not within
/// (MIN_SCALE_FACTOR, MAX_SCALE_FACTOR) the data is considered corrupt and a
/// `DistanceSanity` error is returned; the distances are left untouched.
#[time]
pub fn reconcile_distance(samples: &mut [Sample]) -> Result<DistanceReconciliation, ConversionError> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Err(ConversionError::EmptyActivity);
    };

    let seed_metres = first.reported_distance_metres().ok_or_else(|| {
        ConversionError::malformed(format!(
            "the first sample (t={}) has no reported distance",
            first.elapsed_seconds
        ))
    })?;
    let reported_metres = last.reported_distance_metres().ok_or_else(|| {
        ConversionError::malformed(format!(
            "the last sample (t={}) has no reported distance",
            last.elapsed_seconds
        ))
    })?;

    if let Some(s) = samples.iter().find(|s| s.speed_kmh() < 0.0) {
        warn!(
            "Negative speed {} km/h at t={}, distances may go backwards",
            s.speed_kmh(),
            s.elapsed_seconds
        );
    }

    // Pass 1.
    let estimated_metres = estimate_distance_metres(samples, seed_metres);
    let scale_factor = calculate_scale_factor(seed_metres, estimated_metres, reported_metres);
    debug!(
        "Integrated distance {estimated_metres:.2}m, reported {reported_metres:.2}m, scale factor {scale_factor:.5}"
    );

    // Written so that NaN fails too.
    if !(MIN_SCALE_FACTOR < scale_factor && scale_factor < MAX_SCALE_FACTOR) {
        return Err(ConversionError::DistanceSanity {
            scale_factor,
            estimated_metres,
            reported_metres,
        });
    }

    // Pass 2.
    samples[0].delta_metres = 0.0;
    samples[0].smooth_distance_metres = seed_metres;
    for idx in 1..samples.len() {
        let delta = increment_metres(&samples[idx - 1], &samples[idx]) * scale_factor;
        samples[idx].delta_metres = delta;
        samples[idx].smooth_distance_metres = samples[idx - 1].smooth_distance_metres + delta;
    }

    Ok(DistanceReconciliation {
        seed_metres,
        estimated_metres,
        reported_metres,
        scale_factor,
    })
}
