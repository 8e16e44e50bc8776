use crate::config::{DEFAULT_FILE_NAME, ExportConfig, SaveMode, SpeedUnit};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Export compressor performance curves to curves.csv
#[derive(Parser, Debug)]
#[command(name = "curves_rs", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a JSON curve source into curves.csv
    Export(ExportArgs),

    /// Print an exported curves.csv as JSON
    Read(ReadArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON file holding flow, head, efficiency and speed
    pub input: PathBuf,

    /// Where the document goes
    #[arg(short, long, value_enum, default_value_t = SaveMode::Directory)]
    pub mode: SaveMode,

    /// Target directory for directory saves, starting directory for the dialog
    #[arg(short, long, env = "CURVES_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Name offered for the saved file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    /// Replace an existing file instead of picking "curves (1).csv"
    #[arg(long)]
    pub overwrite: bool,

    /// Unit of the speed values in the input
    #[arg(long, value_enum, default_value_t = SpeedUnit::Rpm)]
    pub speed_units: SpeedUnit,

    /// Open the saved file with the default application
    #[arg(long)]
    pub open: bool,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Previously exported curves.csv
    pub path: PathBuf,
}

impl ExportArgs {
    pub fn to_config(&self) -> ExportConfig {
        ExportConfig {
            file_name: self.file_name.clone(),
            save_mode: self.mode,
            out_dir: self.out_dir.clone(),
            overwrite: self.overwrite,
            speed_unit: self.speed_units,
        }
    }
}

pub fn get_args() -> Cli {
    Cli::parse()
}
