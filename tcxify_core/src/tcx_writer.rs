use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use log::info;
use logging_timer::time;

use crate::{
    byte_counter::ByteCounter,
    formatting::format_utc_date,
    model::{Trackpoint, TrainingLog},
};

const TCD_NAMESPACE: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";
const ACTIVITY_EXTENSION_NAMESPACE: &str = "http://www.garmin.com/xmlschemas/ActivityExtension/v2";

/// Writes the TrainingLog to file as TCX.
pub fn write_tcx_to_file<P: AsRef<Path>>(output_file: P, training: &TrainingLog) -> Result<()> {
    let output_file = output_file.as_ref();
    let file =
        File::create(output_file).with_context(|| format!("Failed to create {:?}", output_file))?;
    let w = BufWriter::new(file);
    let mut w = ByteCounter::new(w);
    write_tcx_to_writer(&mut w, training)?;
    info!(
        "TCX file {:?}, {} trackpoints, {} Kb",
        output_file,
        training.trackpoints.len(),
        w.bytes_written() / 1024
    );
    Ok(())
}

/// Writes the TrainingLog to the specified writer as TCX. Elements are
/// written in the order the XSD requires, some platforms reject anything
/// else.
#[time]
pub fn write_tcx_to_writer<W: Write>(w: &mut W, training: &TrainingLog) -> Result<()> {
    writeln!(w, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(w, "<TrainingCenterDatabase xmlns=\"{}\">", TCD_NAMESPACE)?;
    writeln!(w, "  <Activities>")?;
    write_activity(w, training).context("Failed to write <Activity> element")?;
    writeln!(w, "  </Activities>")?;
    writeln!(w, "</TrainingCenterDatabase>")?;

    w.flush()?;
    Ok(())
}

fn write_activity<W: Write>(w: &mut W, training: &TrainingLog) -> Result<()> {
    // The Id is an xsd:dateTime, not free text.
    let start = format_utc_date(&training.start_time)?;

    writeln!(w, "    <Activity Sport=\"{}\">", training.sport)?;
    writeln!(w, "      <Id>{}</Id>", start)?;
    writeln!(w, "      <Lap StartTime=\"{}\">", start)?;
    writeln!(
        w,
        "        <TotalTimeSeconds>{}</TotalTimeSeconds>",
        training.total_time.whole_seconds()
    )?;
    writeln!(
        w,
        "        <DistanceMeters>{:.2}</DistanceMeters>",
        training.total_distance_metres()
    )?;
    writeln!(w, "        <Calories>0</Calories>")?;
    writeln!(w, "        <Intensity>Active</Intensity>")?;
    writeln!(w, "        <TriggerMethod>Manual</TriggerMethod>")?;
    writeln!(w, "        <Track>")?;
    for tp in &training.trackpoints {
        write_trackpoint(w, tp)?;
    }
    writeln!(w, "        </Track>")?;
    writeln!(w, "      </Lap>")?;
    writeln!(w, "    </Activity>")?;
    Ok(())
}

fn write_trackpoint<W: Write>(w: &mut W, tp: &Trackpoint) -> Result<()> {
    writeln!(w, "          <Trackpoint>")?;
    writeln!(w, "            <Time>{}</Time>", format_utc_date(&tp.time)?)?;
    writeln!(
        w,
        "            <AltitudeMeters>{:.2}</AltitudeMeters>",
        tp.altitude_metres
    )?;
    writeln!(
        w,
        "            <DistanceMeters>{:.2}</DistanceMeters>",
        tp.distance_metres
    )?;
    if let Some(bpm) = tp.heart_rate_bpm {
        writeln!(
            w,
            "            <HeartRateBpm><Value>{}</Value></HeartRateBpm>",
            bpm
        )?;
    }
    // Cadence is an xsd:unsignedByte with 255 reserved.
    writeln!(
        w,
        "            <Cadence>{}</Cadence>",
        tp.cadence.round().clamp(0.0, 254.0) as u8
    )?;
    writeln!(w, "            <Extensions>")?;
    writeln!(w, "              <TPX xmlns=\"{}\">", ACTIVITY_EXTENSION_NAMESPACE)?;
    writeln!(w, "                <Speed>{:.3}</Speed>", tp.speed_mps)?;
    writeln!(
        w,
        "                <Watts>{}</Watts>",
        tp.watts.round().clamp(0.0, u16::MAX.into()) as u16
    )?;
    writeln!(w, "              </TPX>")?;
    writeln!(w, "            </Extensions>")?;
    writeln!(w, "          </Trackpoint>")?;
    Ok(())
}
