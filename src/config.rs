use clap::ValueEnum;
use std::f64::consts::PI;
use std::path::PathBuf;

/// Fixed header of an exported curves document
pub const CSV_HEADER: [&str; 4] = [
    "flow(m**3/s)",
    "head(J/kg)",
    "efficiency(%)",
    "speed(RPM)",
];

pub const DEFAULT_FILE_NAME: &str = "curves.csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

// How the finished document reaches the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SaveMode {
    /// Write straight into the output directory
    Directory,
    /// Ask through the platform save dialog
    Dialog,
    /// Stream the document to stdout
    Stdout,
}

// Unit of the speed values in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SpeedUnit {
    #[default]
    Rpm,
    RadPerSec,
}

impl SpeedUnit {
    pub fn to_rpm(self, value: f64) -> f64 {
        match self {
            SpeedUnit::Rpm => value,
            SpeedUnit::RadPerSec => value * 60.0 / (2.0 * PI),
        }
    }
}

// Export settings resolved at startup
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub file_name: String,
    pub save_mode: SaveMode,
    pub out_dir: PathBuf,
    pub overwrite: bool,
    pub speed_unit: SpeedUnit,
}

impl ExportConfig {
    pub fn new() -> Self {
        ExportConfig {
            file_name: DEFAULT_FILE_NAME.to_string(),
            save_mode: SaveMode::Directory,
            out_dir: PathBuf::from("."),
            overwrite: false,
            speed_unit: SpeedUnit::Rpm,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}
