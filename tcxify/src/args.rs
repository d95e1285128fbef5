use std::path::{Path, PathBuf};

use clap::Parser;
use tcxify_core::formatting::parse_start_time;
use time::PrimitiveDateTime;

/*
 tcxify --start 2024-03-01T18:30 FILE                 write FILE.tcx
 tcxify --start ... --initial-altitude 120 FILE       start climbing from 120m
 tcxify --start ... --output other.tcx FILE           choose the output name
 --force                                              overwrite existing output
*/

pub fn parse_args() -> Args {
    Args::parse()
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        default_value = "false",
        help = "Overwrite the output file even if it already exists"
    )]
    pub force: bool,

    #[arg(
        short,
        long,
        value_parser = parse_start_time,
        help = "When the activity started, in local time, as YYYY-MM-DDTHH:MM. \
                The export does not contain a time of day."
    )]
    pub start: PrimitiveDateTime,

    #[arg(
        short = 'a',
        long,
        default_value = "0.0",
        allow_negative_numbers = true,
        help = "The altitude, in metres, at the start of the activity"
    )]
    pub initial_altitude: f64,

    #[arg(
        short,
        long,
        help = "The TCX file to write. Defaults to the input file with a '.tcx' extension"
    )]
    pub output: Option<PathBuf>,

    #[arg(help = "The JSON workout export to convert")]
    pub input: PathBuf,
}

impl Args {
    /// The file to write the TCX to.
    pub fn output_file(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| make_tcx_filename(&self.input))
    }
}

/// Replaces a '.json' extension (in any case) with '.tcx'. Any other
/// extension is kept and '.tcx' is appended, so "a.txt" becomes "a.txt.tcx".
pub fn make_tcx_filename(input: &Path) -> PathBuf {
    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut p = if is_json {
        input.with_extension("")
    } else {
        input.to_owned()
    };

    let mut name = p.file_name().unwrap_or_default().to_os_string();
    name.push(".tcx");
    p.set_file_name(name);
    p
}
