use crate::model::HeartRateSample;

/// Places the heart-rate series, which is recorded on its own timeline, onto
/// the timeline of the main samples.
///
/// For a sample at time `t` the first heart-rate entry at or after `t` is
/// used. Once `t` is beyond the end of the series the last resolved value is
/// kept. Create one per conversion; the carried value is not shared.
#[derive(Debug)]
pub struct HeartRateAligner<'a> {
    series: &'a [HeartRateSample],
    last_bpm: u16,
}

impl<'a> HeartRateAligner<'a> {
    /// Returns None if there is no series to align, in which case heart rate
    /// is left out of the output completely.
    pub fn new(series: Option<&'a [HeartRateSample]>) -> Option<Self> {
        match series {
            Some(series) if !series.is_empty() => Some(Self {
                series,
                last_bpm: 0,
            }),
            _ => None,
        }
    }

    /// Resolves the heart rate for a sample at `elapsed_seconds`.
    pub fn resolve(&mut self, elapsed_seconds: u32) -> u16 {
        if let Some(hr) = self
            .series
            .iter()
            .find(|hr| hr.elapsed_seconds >= elapsed_seconds)
        {
            self.last_bpm = hr.bpm;
        }

        self.last_bpm
    }
}
