use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use curves_rs::cli::{Command, ExportArgs, ReadArgs, get_args};
use curves_rs::io::csv::read_curves_file;
use curves_rs::io::json::load_curve_data;
use curves_rs::{CsvExporter, SaveMode, SaveOutcome, select_downloader};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match get_args().command {
        Command::Export(args) => run_export(&args),
        Command::Read(args) => run_read(&args),
    }
}

fn run_export(args: &ExportArgs) -> Result<()> {
    // Configuration
    let config = args.to_config();
    // stdout carries the document itself in stdout mode
    let report = config.save_mode != SaveMode::Stdout;

    let data = load_curve_data(&args.input, config.speed_unit)
        .with_context(|| format!("Failed to load curve data: {:?}", args.input))?;

    if report {
        println!("Loaded {} curve points from {:?}", data.len(), args.input);
    }

    let downloader = select_downloader(&config).context("Failed to set up save mechanism")?;
    let mut exporter = CsvExporter::new(downloader).with_file_name(config.file_name.clone());

    match exporter.export(&data).context("Failed to export curves")? {
        SaveOutcome::Saved(path) => {
            println!("Curves saved to {}", path.display());
            if args.open {
                open::that(&path).with_context(|| format!("Failed to open {:?}", path))?;
            }
        }
        SaveOutcome::Streamed { bytes } => {
            tracing::debug!(bytes, "document written to stdout");
        }
        SaveOutcome::Cancelled => {
            println!("Save cancelled, nothing written");
        }
    }

    Ok(())
}

fn run_read(args: &ReadArgs) -> Result<()> {
    let data = read_curves_file(&args.path)
        .with_context(|| format!("Failed to read curves: {:?}", args.path))?;

    let json = serde_json::to_string_pretty(&data).context("Failed to serialize curves")?;
    println!("{json}");
    Ok(())
}
