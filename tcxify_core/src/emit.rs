use logging_timer::time;

use crate::{
    heart_rate::HeartRateAligner,
    model::{fields, HeartRateSample, Sample, Trackpoint},
};

/// Cadence fields in order of preference.
const CADENCE_FIELDS: [&str; 2] = [fields::RUNNING_CADENCE, fields::RPM];
/// Power fields in order of preference.
const POWER_FIELDS: [&str; 2] = [fields::RUNNING_POWER, fields::POWER];

/// The last value seen for each field that is allowed to be missing from a
/// sample. A sample lacking the field gets the previous value instead, so the
/// output never has gaps. Lives for exactly one conversion.
#[derive(Debug, Default)]
struct LastKnownValues {
    cadence: f64,
    watts: f64,
}

impl LastKnownValues {
    fn cadence(&mut self, sample: &Sample) -> f64 {
        if let Some(cadence) = sample.first_number(&CADENCE_FIELDS) {
            self.cadence = cadence;
        }
        self.cadence
    }

    fn watts(&mut self, sample: &Sample) -> f64 {
        if let Some(watts) = sample.first_number(&POWER_FIELDS) {
            self.watts = watts;
        }
        self.watts
    }
}

/// Makes one Trackpoint for each sample, in order. The samples must have been
/// through distance reconciliation and altitude integration already.
#[time]
pub fn emit_trackpoints(
    samples: &[Sample],
    heart_rate: Option<&[HeartRateSample]>,
) -> Vec<Trackpoint> {
    let mut last_known = LastKnownValues::default();
    let mut hr_aligner = HeartRateAligner::new(heart_rate);

    samples
        .iter()
        .map(|sample| Trackpoint {
            time: sample.timestamp,
            distance_metres: sample.smooth_distance_metres,
            altitude_metres: sample.altitude_metres,
            cadence: last_known.cadence(sample),
            speed_mps: sample.speed_mps(),
            watts: last_known.watts(sample),
            heart_rate_bpm: hr_aligner
                .as_mut()
                .map(|aligner| aligner.resolve(sample.elapsed_seconds)),
        })
        .collect()
}
