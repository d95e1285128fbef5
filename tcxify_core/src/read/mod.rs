use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use logging_timer::time;

use crate::{
    error::ConversionError,
    model::{DescriptorEntry, HeartRateSample, RawSample},
};

use document::Document;

mod document;
mod samples;

pub use samples::build_samples;

/// The parts of an export that the conversion uses, after checking that the
/// document has the expected shape. Never modified once read.
#[derive(Debug, Clone)]
pub struct WorkoutExport {
    /// Not part of the export, but convenient for naming output and logging.
    pub filename: Option<PathBuf>,
    /// 'data.equipmentType', used to pick the sport.
    pub equipment_type: Option<String>,
    /// The field names, in the same order as the values of each sample.
    pub descriptor: Vec<String>,
    pub samples: Vec<RawSample>,
    /// The separately recorded heart-rate series, if there is one.
    pub heart_rate: Option<Vec<HeartRateSample>>,
}

#[time]
pub fn read_export_from_file<P: AsRef<Path>>(input_file: P) -> Result<WorkoutExport> {
    let input_file = input_file.as_ref();
    info!("Reading workout export {:?}", input_file);
    let contents =
        std::fs::read(input_file).with_context(|| format!("Failed to read {:?}", input_file))?;
    let mut export = read_export_from_slice(&contents)
        .with_context(|| format!("Failed to parse {:?}", input_file))?;
    export.filename = Some(input_file.to_owned());
    Ok(export)
}

pub fn read_export_from_slice(data: &[u8]) -> Result<WorkoutExport, ConversionError> {
    let doc: Document = serde_json::from_slice(data)?;

    let data = doc
        .data
        .ok_or_else(|| ConversionError::malformed("there is no 'data' element"))?;
    let analytics = data
        .analitics
        .ok_or_else(|| ConversionError::malformed("there is no 'data.analitics' element"))?;
    let descriptor = analytics.descriptor.ok_or_else(|| {
        ConversionError::malformed("there is no 'data.analitics.descriptor' element")
    })?;
    let samples = analytics.samples.ok_or_else(|| {
        ConversionError::malformed("there is no 'data.analitics.samples' element")
    })?;

    let export = WorkoutExport {
        filename: None,
        equipment_type: data.equipment_type,
        descriptor: descriptor
            .iter()
            .map(DescriptorEntry::name)
            .map(str::to_owned)
            .collect(),
        samples,
        heart_rate: analytics.hr,
    };

    debug!(
        "Export has equipment type {:?}, fields {:?}, {} samples and {} heart-rate samples",
        export.equipment_type,
        export.descriptor,
        export.samples.len(),
        export.heart_rate.as_ref().map_or(0, Vec::len)
    );

    Ok(export)
}
