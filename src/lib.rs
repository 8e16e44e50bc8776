//! Export of compressor performance curves to `curves.csv`
//!
//! Curve data (flow, head, efficiency and speed sampled in parallel) is
//! rendered into a fixed-header CSV document and handed to a
//! [`FileDownloader`] that offers it to the user.

pub mod cli;
pub mod config;
pub mod curve;
pub mod download;
pub mod error;
pub mod export;
pub mod io;

pub use config::{ExportConfig, SaveMode, SpeedUnit};
pub use curve::{CurveData, CurvePoint, SpeedCurve};
pub use download::{
    DirectoryDownloader, FileDownloader, SaveOutcome, WriterDownloader, select_downloader,
};
#[cfg(feature = "dialog")]
pub use download::DialogDownloader;
pub use error::{ExportError, Result};
pub use export::{CsvDocument, CsvExporter, build_document};
