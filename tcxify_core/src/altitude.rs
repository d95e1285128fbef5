//! Altitude for equipment that never goes anywhere. Treadmills report their
//! incline directly as a grade; bikes only report a resistance level, which
//! is turned into a grade through a calibration curve. Each step of the
//! reconciled distance is then climbed at that grade.

use logging_timer::time;

use crate::model::{fields, Sample};

/// Converts a resistance level into a grade percentage.
///
/// The relationship depends entirely on the equipment, so implement this for
/// other machines. Closures of the form `|level| grade` also work.
pub trait GradeCalibration {
    fn grade_percent(&self, level: f64) -> f64;
}

impl<F> GradeCalibration for F
where
    F: Fn(f64) -> f64,
{
    fn grade_percent(&self, level: f64) -> f64 {
        self(level)
    }
}

/// A curve fitted to the resistance levels of a Technogym indoor bike. It
/// gives about 0% at level 6, -4.6% at level 1 and 9.9% at level 20, and is
/// monotonic between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndoorBikeCalibration;

impl GradeCalibration for IndoorBikeCalibration {
    fn grade_percent(&self, level: f64) -> f64 {
        (level / 7.35 - 4.52).tan() * 2.0 + 1.3
    }
}

/// Works out the grade of a sample. An explicit grade wins, then a resistance
/// level, otherwise the sample is flat.
pub fn sample_grade_percent(sample: &Sample, calibration: &dyn GradeCalibration) -> f64 {
    if let Some(grade) = sample.number(fields::GRADE) {
        grade
    } else if let Some(level) = sample.number(fields::LEVEL) {
        calibration.grade_percent(level)
    } else {
        0.0
    }
}

/// The height gained by travelling `distance_metres` up a slope of
/// `grade_percent`. The distance is along the slope, so this is the side
/// opposite the incline angle of a right triangle with that hypotenuse.
pub fn altitude_delta_metres(distance_metres: f64, grade_percent: f64) -> f64 {
    let angle = (grade_percent / 100.0).atan();
    distance_metres * angle.sin()
}

/// Fills in `grade_percent` and `altitude_metres` for every sample. Must run
/// after the distances have been reconciled, as it climbs each sample's
/// `delta_metres`. Returns the final altitude.
#[time]
pub fn integrate_altitude(
    samples: &mut [Sample],
    initial_altitude_metres: f64,
    calibration: &dyn GradeCalibration,
) -> f64 {
    let mut last_altitude = initial_altitude_metres;

    for (idx, sample) in samples.iter_mut().enumerate() {
        sample.grade_percent = sample_grade_percent(sample, calibration);
        if idx > 0 {
            last_altitude += altitude_delta_metres(sample.delta_metres, sample.grade_percent);
        }
        sample.altitude_metres = last_altitude;
    }

    last_altitude
}
