use std::{collections::HashMap, fmt, path::PathBuf};

use serde::Deserialize;
use time::{Duration, OffsetDateTime};

use crate::summary::Summary;

/// The names of the fields we know how to interpret. Every export carries a
/// descriptor listing the fields present in that particular recording, and
/// any given recording will have only some of these.
pub mod fields {
    /// The cumulative distance reported by the equipment, in metres. Coarse
    /// grained, but the total is trustworthy.
    pub const REPORTED_DISTANCE: &str = "HDistance";
    /// Instantaneous speed in km/h.
    pub const SPEED: &str = "Speed";
    /// Generic power, in watts.
    pub const POWER: &str = "Power";
    /// Power as reported by treadmills, in watts.
    pub const RUNNING_POWER: &str = "RunningPower";
    /// Steps per minute, treadmills only.
    pub const RUNNING_CADENCE: &str = "RunningCadence";
    /// Pedal revolutions per minute.
    pub const RPM: &str = "Rpm";
    /// The incline, as a percentage.
    pub const GRADE: &str = "Grade";
    /// The resistance level of a bike, a device-specific scale of about 1..=20.
    pub const LEVEL: &str = "Level";
}

/// One value from the 'vs' array of a sample. Most are numbers, but some
/// exports quote their numbers and some contain nulls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

/// An entry in the descriptor. Real exports use an object which carries the
/// field name under 'pr.name', but a plain list of names is accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DescriptorEntry {
    Name(String),
    Property { pr: PropertyName },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyName {
    pub name: String,
}

/// A sample exactly as it appears in the input: the elapsed time and a vector
/// of values that is positionally aligned with the descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSample {
    #[serde(rename = "t")]
    pub elapsed_seconds: u32,
    #[serde(rename = "vs", default)]
    pub values: Vec<FieldValue>,
}

/// An entry from the separately recorded heart-rate series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HeartRateSample {
    #[serde(rename = "t")]
    pub elapsed_seconds: u32,
    #[serde(rename = "hr")]
    pub bpm: u16,
}

/// A Sample is a RawSample with its values keyed by field name, plus the
/// derived data that the pipeline stages fill in as they run.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Seconds since the start of the activity.
    pub elapsed_seconds: u32,
    /// The absolute time of the sample (start time + elapsed_seconds).
    pub timestamp: OffsetDateTime,
    /// The values of this sample keyed by the descriptor names.
    pub fields: HashMap<String, FieldValue>,

    // All the below fields are the derived ones.
    /// The distance between this sample and the previous one, after
    /// reconciliation against the reported distance.
    pub delta_metres: f64,
    /// The reconciled cumulative distance.
    pub smooth_distance_metres: f64,
    /// The incline used for the altitude calculation.
    pub grade_percent: f64,
    /// The cumulative altitude.
    pub altitude_metres: f64,
}

/// The sport recorded in the TCX 'Activity' element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sport {
    #[default]
    Running,
    Biking,
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Running => write!(f, "Running"),
            Sport::Biking => write!(f, "Biking"),
        }
    }
}

/// One output record of the TCX track.
#[derive(Debug, Clone, PartialEq)]
pub struct Trackpoint {
    pub time: OffsetDateTime,
    pub distance_metres: f64,
    pub altitude_metres: f64,
    /// Steps or revolutions per minute.
    pub cadence: f64,
    pub speed_mps: f64,
    pub watts: f64,
    /// Only present if the export contains a heart-rate series.
    pub heart_rate_bpm: Option<u16>,
}

/// The fully processed activity, ready to be written as TCX.
#[derive(Debug, Clone)]
pub struct TrainingLog {
    /// Not part of the TCX format, but handy for log messages.
    pub filename: Option<PathBuf>,
    pub sport: Sport,
    /// Becomes both the activity Id and the lap start time.
    pub start_time: OffsetDateTime,
    /// The time between the first and last retained samples.
    pub total_time: Duration,
    pub trackpoints: Vec<Trackpoint>,
    pub summary: Summary,
}
