use crate::config::{CSV_MIME_TYPE, DEFAULT_FILE_NAME};
use crate::curve::CurveData;
use crate::download::{FileDownloader, SaveOutcome};
use crate::error::Result;
use crate::io::csv::{create_csv_writer, finish_writer, write_curve_rows};

/// Text of an exported curves file, header plus one line per sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    text: String,
}

impl CsvDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// Serializes curve data into a curves document.
pub fn build_document(data: &CurveData) -> Result<CsvDocument> {
    let mut wtr = create_csv_writer(Vec::new())?;
    write_curve_rows(&mut wtr, data)?;
    let bytes = finish_writer(wtr)?;

    Ok(CsvDocument {
        text: String::from_utf8(bytes)?,
    })
}

// Turns curve data into a saved curves.csv through a downloader
pub struct CsvExporter<D: FileDownloader> {
    downloader: D,
    file_name: String,
}

impl<D: FileDownloader> CsvExporter<D> {
    pub fn new(downloader: D) -> Self {
        CsvExporter {
            downloader,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    pub fn into_downloader(self) -> D {
        self.downloader
    }

    /// Builds the document and makes a single save attempt.
    pub fn export(&mut self, data: &CurveData) -> Result<SaveOutcome> {
        let document = build_document(data)?;
        tracing::debug!(
            points = data.len(),
            bytes = document.as_bytes().len(),
            file_name = %self.file_name,
            "built curves document"
        );
        self.downloader
            .save(document.as_bytes(), &self.file_name, CSV_MIME_TYPE)
    }
}
