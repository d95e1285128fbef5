use anyhow::Result;
use time::{macros::format_description, OffsetDateTime, PrimitiveDateTime};

/// Formats `date` into a string like "2024-09-01T05:10:44Z". TCX requires
/// exactly this form for the activity Id, so fractional seconds are never
/// written.
pub fn format_utc_date(date: &OffsetDateTime) -> Result<String> {
    let s = date.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
    ))?;
    Ok(s)
}

/// Parses the activity start time as typed by the user, e.g.
/// "2024-09-01T05:10". The exports contain no time of day, so this is the
/// only source of it.
pub fn parse_start_time(s: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(s.trim(), format_description!("[year]-[month]-[day]T[hour]:[minute]"))
}
