use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image2c64::models::{
    parse_color, parse_palette, AppConfig, ConvertOptions, ErrorAction, OutputFormat, Packaging,
};
use image2c64::services::BatchConverter;

use c64_bitmap::PaletteChoice;

/// Converts virtually any fullscreen picture to C64 hires or multicolor
/// formats. Best results come from PNG or GIF sources.
#[derive(Parser)]
#[command(name = "image2c64", version)]
#[command(group(ArgGroup::new("packaging").args(["executable", "raw"])))]
#[command(group(ArgGroup::new("verbosity").args(["verbose", "quiet"])))]
struct Cli {
    /// Format of the output file
    #[arg(short, long, value_enum)]
    format: OutputFormat,

    /// Produce a C64 executable as a `prg` file
    #[arg(short = 'x', long)]
    executable: bool,

    /// Produce raw data files, useful for assemblers
    #[arg(short, long)]
    raw: bool,

    /// Output file name; with several inputs, the output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Border color number (default: most frequent color)
    #[arg(short = 'g', long, value_parser = parse_color)]
    border: Option<u8>,

    /// Background color number (default: most frequent color)
    #[arg(short, long, value_parser = parse_color)]
    background: Option<u8>,

    /// What to do about color clashes
    #[arg(short, long, value_enum, default_value_t = ErrorAction::None)]
    errors: ErrorAction,

    /// Palette: auto, vice, timanthes, unknown or pepto
    #[arg(short, long, value_parser = parse_palette)]
    palette: Option<PaletteChoice>,

    /// Write output even if color clashes remain
    #[arg(long)]
    force: bool,

    /// Configuration file (default: $IMAGE2C64_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Be verbose; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Be quiet; repeat for less
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,

    /// Input pictures
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (q, _) if q >= 2 => "off",
            (1, _) => "error",
            (_, 0) => "warn",
            (_, 1) => "info",
            (_, 2) => "debug",
            _ => "trace",
        }
    }

    fn packaging(&self) -> Packaging {
        if self.executable {
            Packaging::Executable
        } else if self.raw {
            Packaging::Raw
        } else {
            Packaging::Native
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = cli.log_level();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("image2c64={level},c64_bitmap={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(cli.config.as_deref());

    let mut options = ConvertOptions::new(cli.format);
    options.packaging = cli.packaging();
    options.output = cli.output.clone();
    options.border = cli.border;
    options.background = cli.background;
    options.errors = cli.errors;
    options.palette = cli.palette.unwrap_or_else(|| config.palette_choice());
    options.force = cli.force;

    let converter = BatchConverter::new(options, &config);
    let failed = converter.run(&cli.files)?;

    Ok(ExitCode::from(failed.min(u8::MAX as usize) as u8))
}
