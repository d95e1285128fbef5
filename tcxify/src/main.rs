use anyhow::Result;
use args::parse_args;
use clap::builder::styling::AnsiColor;
use env_logger::Builder;
use log::{debug, info, warn};
use logging_timer::time;
use std::io::Write;
use tcxify_core::{
    pipeline::{convert, ConversionOptions},
    read::read_export_from_file,
    tcx_writer::write_tcx_to_file,
};

mod args;

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

#[time]
fn main() -> Result<()> {
    configure_logging();
    info!("Starting {PROGRAM_NAME}");

    let args = parse_args();
    debug!("{:?}", &args);

    let output_file = args.output_file();
    if output_file.exists() && !args.force {
        warn!(
            "Skipping {:?} because the output file {:?} already exists, use '--force' to overwrite it",
            args.input, output_file
        );
        return Ok(());
    }

    let export = read_export_from_file(&args.input)?;

    let mut options = ConversionOptions::new(args.start);
    options.initial_altitude_metres = args.initial_altitude;

    let training = convert(&export, &options)?;
    training.summary.log();

    write_tcx_to_file(&output_file, &training)?;

    Ok(())
}

fn configure_logging() {
    let mut builder = Builder::from_default_env();

    // Without RUST_LOG the user would see nothing at all, but the summary is
    // the point of running the program.
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Info);
    }

    builder.format(|buf, record| {
        let level_style = buf.default_level_style(record.level());
        let level_style = match record.level() {
            log::Level::Error => level_style.fg_color(Some(AnsiColor::Red.into())),
            log::Level::Warn => level_style.fg_color(Some(AnsiColor::Yellow.into())),
            log::Level::Info => level_style.fg_color(Some(AnsiColor::Green.into())),
            log::Level::Debug => level_style.fg_color(Some(AnsiColor::Blue.into())),
            log::Level::Trace => level_style.fg_color(Some(AnsiColor::Magenta.into())),
        };

        match (record.file(), record.line()) {
            (Some(file), Some(line)) if record.level() >= log::Level::Debug => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#} {}:{}] {}",
                buf.timestamp(),
                record.level(),
                file,
                line,
                record.args()
            ),
            _ => writeln!(
                buf,
                "[{} {level_style}{}{level_style:#}] {}",
                buf.timestamp(),
                record.level(),
                record.args()
            ),
        }
    });

    builder.init();
}
