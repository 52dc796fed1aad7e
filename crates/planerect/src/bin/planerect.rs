//! planerect CLI: reconstruct planar rectangles from JSON scene files.

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use planerect::core::{LogConfig, Size2};
use planerect::run::{run_scene, scene_crop, SceneRun};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "planerect")]
#[command(about = "Reconstruct a planar rectangle's 3D pose from detected corners and hit-test candidates")]
#[command(version)]
struct Cli {
    /// Log verbosity on stderr.
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Emit logs as JSON (needs the `tracing` feature).
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the rectangle described by a scene file and write a report.
    Reconstruct(ReconstructArgs),

    /// Print the classifier crop for a scene's observation as JSON.
    Crop(CropArgs),
}

#[derive(Debug, Clone, Args)]
struct ReconstructArgs {
    /// Path to the scene JSON.
    scene: PathBuf,

    /// Report path; defaults to the scene's `output_path`.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CropArgs {
    /// Path to the scene JSON.
    scene: PathBuf,

    /// Source image width in pixels.
    #[arg(long)]
    image_width: f64,

    /// Source image height in pixels.
    #[arg(long)]
    image_height: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    planerect::core::init_logging(&LogConfig {
        level: cli.log_level.into(),
        json: cli.json_logs,
        ..LogConfig::default()
    })?;

    match cli.command {
        Commands::Reconstruct(args) => run_reconstruct(&args),
        Commands::Crop(args) => run_crop(&args),
    }
}

fn run_reconstruct(args: &ReconstructArgs) -> CliResult<()> {
    let SceneRun { scene, report } = run_scene(&args.scene)?;
    let output = args.output.clone().unwrap_or_else(|| scene.output_path());
    report.write_json(&output)?;
    log::info!("wrote report JSON to {}", output.display());

    match (&report.rectangle, &report.error) {
        (Some(rect), _) => {
            let inches = rect.size_inches();
            println!(
                "rectangle {:.3} x {:.3} m ({:.1} x {:.1} in), orientation {:.3} rad",
                rect.size.width, rect.size.height, inches.width, inches.height, rect.orientation
            );
            Ok(())
        }
        (None, Some(err)) => Err(err.clone().into()),
        (None, None) => Err("no rectangle reconstructed".into()),
    }
}

fn run_crop(args: &CropArgs) -> CliResult<()> {
    let size = Size2::new(args.image_width, args.image_height);
    if !size.is_usable() {
        return Err(format!(
            "image size {} x {} must be positive",
            args.image_width, args.image_height
        )
        .into());
    }
    let crop = scene_crop(&args.scene, size)?;
    println!("{}", serde_json::to_string(&crop)?);
    Ok(())
}
