use log::info;
use time::Duration;

use crate::{
    distance::DistanceReconciliation,
    model::{Sample, Trackpoint},
};

/// Aggregate figures for the activity, for the user's information. Nothing
/// downstream depends on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub num_trackpoints: usize,
    pub duration: Duration,
    /// The reconciled distance at the last trackpoint.
    pub distance_metres: f64,
    pub scale_factor: f64,
    pub final_altitude_metres: f64,
    /// Distance weighted mean of the grade, in percent.
    pub average_gradient_percent: f64,
    pub avg_heart_rate: Option<f64>,
    pub max_heart_rate: Option<u16>,
}

/// Rounds to one decimal place, which is how distances and grades are shown.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Builds the summary from the fully processed samples and their trackpoints.
///
/// The average gradient accumulates `distance * grade` from the one-decimal
/// display values and divides by the integrated (pre-scaling) distance. It
/// is an approximation, good enough for showing to a person.
pub fn summarize(
    samples: &[Sample],
    reconciliation: &DistanceReconciliation,
    trackpoints: &[Trackpoint],
) -> Summary {
    let gradient_sum: f64 = samples
        .iter()
        .map(|s| round1(s.delta_metres) * round1(s.grade_percent))
        .sum();

    let average_gradient_percent = if reconciliation.estimated_metres == 0.0 {
        0.0
    } else {
        gradient_sum / reconciliation.estimated_metres
    };

    let duration = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => {
            Duration::seconds(i64::from(last.elapsed_seconds) - i64::from(first.elapsed_seconds))
        }
        _ => Duration::ZERO,
    };

    let heart_rates: Vec<u16> = trackpoints.iter().flat_map(|tp| tp.heart_rate_bpm).collect();
    let avg_heart_rate = if heart_rates.is_empty() {
        None
    } else {
        Some(heart_rates.iter().map(|&hr| f64::from(hr)).sum::<f64>() / heart_rates.len() as f64)
    };

    Summary {
        num_trackpoints: trackpoints.len(),
        duration,
        distance_metres: samples
            .last()
            .map(|s| s.smooth_distance_metres)
            .unwrap_or_default(),
        scale_factor: reconciliation.scale_factor,
        final_altitude_metres: samples
            .last()
            .map(|s| s.altitude_metres)
            .unwrap_or_default(),
        average_gradient_percent,
        avg_heart_rate,
        max_heart_rate: heart_rates.iter().copied().max(),
    }
}

impl Summary {
    /// Writes the summary to the log at info level.
    pub fn log(&self) {
        info!(
            "{} trackpoints over {}, distance {:.2} km (scale factor {:.4})",
            self.num_trackpoints,
            self.duration,
            self.distance_metres / 1000.0,
            self.scale_factor
        );
        info!(
            "Final altitude {:.1} m, average gradient {:.2}%",
            self.final_altitude_metres, self.average_gradient_percent
        );
        if let (Some(avg), Some(max)) = (self.avg_heart_rate, self.max_heart_rate) {
            info!("Heart rate average {avg:.0} bpm, max {max} bpm");
        }
    }
}
