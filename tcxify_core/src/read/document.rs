use serde::Deserialize;

use crate::model::{DescriptorEntry, HeartRateSample, RawSample};

// These mirror the JSON layout of an export. Everything is optional so that
// a document of the wrong shape can be reported as such rather than as a
// generic deserialization failure.

#[derive(Debug, Deserialize)]
pub(crate) struct Document {
    pub data: Option<Data>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Data {
    #[serde(rename = "equipmentType")]
    pub equipment_type: Option<String>,
    // Sic, that is how the exports spell it.
    pub analitics: Option<Analytics>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Analytics {
    pub descriptor: Option<Vec<DescriptorEntry>>,
    pub samples: Option<Vec<RawSample>>,
    pub hr: Option<Vec<HeartRateSample>>,
}
