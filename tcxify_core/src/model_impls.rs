use std::collections::HashMap;

use time::OffsetDateTime;

use crate::model::{fields, DescriptorEntry, FieldValue, Sample, Sport, TrainingLog};

impl FieldValue {
    /// Returns the value as a number. Quoted numbers are parsed, nulls and
    /// anything non-numeric count as absent.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl DescriptorEntry {
    pub fn name(&self) -> &str {
        match self {
            DescriptorEntry::Name(name) => name,
            DescriptorEntry::Property { pr } => &pr.name,
        }
    }
}

impl Sport {
    /// Picks the sport from the 'equipmentType' of the export. Bikes are
    /// identified by name, everything else is assumed to be a treadmill.
    pub fn from_equipment_type(equipment_type: Option<&str>) -> Self {
        match equipment_type {
            Some(et) if et.to_ascii_lowercase().contains("bike") => Sport::Biking,
            _ => Sport::Running,
        }
    }
}

impl Sample {
    /// Creates a new Sample with all the derived fields zeroed.
    pub fn new(
        elapsed_seconds: u32,
        timestamp: OffsetDateTime,
        fields: HashMap<String, FieldValue>,
    ) -> Self {
        Self {
            elapsed_seconds,
            timestamp,
            fields,
            delta_metres: 0.0,
            smooth_distance_metres: 0.0,
            grade_percent: 0.0,
            altitude_metres: 0.0,
        }
    }

    /// Returns the numeric value of the field, or None if the field is not in
    /// the descriptor or has no usable value in this sample.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(FieldValue::as_f64)
    }

    /// Returns the first of `names` that has a value in this sample.
    pub fn first_number(&self, names: &[&str]) -> Option<f64> {
        names.iter().find_map(|f| self.number(f))
    }

    /// Speed in km/h. A sample without speed is treated as stationary.
    pub fn speed_kmh(&self) -> f64 {
        self.number(fields::SPEED).unwrap_or_default()
    }

    /// Speed in m/s.
    pub fn speed_mps(&self) -> f64 {
        self.speed_kmh() / 3.6
    }

    /// Power in watts. A sample without power is treated as producing none.
    pub fn power(&self) -> f64 {
        self.number(fields::POWER).unwrap_or_default()
    }

    /// The cumulative distance according to the equipment.
    pub fn reported_distance_metres(&self) -> Option<f64> {
        self.number(fields::REPORTED_DISTANCE)
    }

    /// True if the sample shows no activity at all.
    pub fn is_idle(&self) -> bool {
        self.speed_kmh() == 0.0 && self.power() == 0.0
    }
}

impl TrainingLog {
    /// The distance covered over the whole activity, in metres.
    pub fn total_distance_metres(&self) -> f64 {
        self.trackpoints
            .last()
            .map(|tp| tp.distance_metres)
            .unwrap_or_default()
    }
}
