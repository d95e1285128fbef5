use log::info;
use logging_timer::time;
use time::{Duration, PrimitiveDateTime};

use crate::{
    altitude::{integrate_altitude, GradeCalibration, IndoorBikeCalibration},
    distance::reconcile_distance,
    emit::emit_trackpoints,
    error::ConversionError,
    model::{Sport, TrainingLog},
    read::{build_samples, WorkoutExport},
    summary::summarize,
    trim::trim_trailing_idle,
};

/// The parameters of a conversion, i.e. everything that is not in the export
/// itself.
pub struct ConversionOptions {
    /// When the activity started. The exports only contain a date.
    pub start_time: PrimitiveDateTime,
    /// The altitude of the first trackpoint.
    pub initial_altitude_metres: f64,
    /// Turns bike resistance levels into grades.
    pub calibration: Box<dyn GradeCalibration>,
}

impl ConversionOptions {
    /// Options starting at sea level with the indoor bike calibration.
    pub fn new(start_time: PrimitiveDateTime) -> Self {
        Self {
            start_time,
            initial_altitude_metres: 0.0,
            calibration: Box::new(IndoorBikeCalibration),
        }
    }
}

/// Runs the whole pipeline over an export: build the samples, trim the idle
/// tail, reconcile distance, integrate altitude, then emit the trackpoints
/// (aligning heart rate on the way) and summarise.
#[time]
pub fn convert(
    export: &WorkoutExport,
    options: &ConversionOptions,
) -> Result<TrainingLog, ConversionError> {
    let sport = Sport::from_equipment_type(export.equipment_type.as_deref());
    info!("Converting {:?} as a {sport} activity", export.filename);

    let mut samples = build_samples(export, options.start_time)?;
    trim_trailing_idle(&mut samples)?;
    let reconciliation = reconcile_distance(&mut samples)?;
    integrate_altitude(
        &mut samples,
        options.initial_altitude_metres,
        options.calibration.as_ref(),
    );

    let trackpoints = emit_trackpoints(&samples, export.heart_rate.as_deref());
    let summary = summarize(&samples, &reconciliation, &trackpoints);

    let first_elapsed = samples.first().map_or(0, |s| s.elapsed_seconds);
    let last_elapsed = samples.last().map_or(0, |s| s.elapsed_seconds);

    Ok(TrainingLog {
        filename: export.filename.clone(),
        sport,
        start_time: options.start_time.assume_utc(),
        total_time: Duration::seconds(i64::from(last_elapsed - first_elapsed)),
        trackpoints,
        summary,
    })
}
