use thiserror::Error;

/// Everything that can stop a conversion. None of these are recoverable, the
/// run is abandoned and nothing is written.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(
        "The input is not a workout analytics export ({0}). \
         Export the workout again from the 'analitics' view of the website."
    )]
    MalformedInput(String),

    #[error(
        "Distance reconciliation failed: scale factor {scale_factor:.4} is outside (0.95, 1.05) \
         (integrated {estimated_metres:.1}m, reported {reported_metres:.1}m). \
         The sensor data looks corrupt."
    )]
    DistanceSanity {
        scale_factor: f64,
        estimated_metres: f64,
        reported_metres: f64,
    },

    #[error("The activity has no samples left after removing the idle samples at the end")]
    EmptyActivity,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConversionError {
    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedInput(msg.into())
    }
}
