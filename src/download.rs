//! Save-file mechanisms for finished documents
//!
//! The exporter hands its bytes to a [`FileDownloader`] and never touches the
//! host platform itself. Variants are picked once at startup with
//! [`select_downloader`].

use crate::config::{ExportConfig, SaveMode};
use crate::error::{ExportError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// What happened to a document handed to a downloader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to a file on disk
    Saved(PathBuf),
    /// Streamed to a writer
    Streamed { bytes: usize },
    /// The user dismissed the save prompt
    Cancelled,
}

/// Capability to offer a file to the user.
pub trait FileDownloader {
    fn save(&mut self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<SaveOutcome>;
}

impl<D: FileDownloader + ?Sized> FileDownloader for Box<D> {
    fn save(&mut self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<SaveOutcome> {
        (**self).save(bytes, filename, mime_type)
    }
}

fn check_file_name(filename: &str) -> Result<()> {
    let bad = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\']);
    if bad {
        return Err(ExportError::InvalidFileName {
            name: filename.to_string(),
        });
    }
    Ok(())
}

/// Saves straight into a directory without prompting.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        DirectoryDownloader {
            dir: dir.into(),
            overwrite,
        }
    }

    /// Yields `name`, then `stem (1).ext`, `stem (2).ext`, ...
    fn candidate_paths<'a>(&'a self, filename: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        let name = Path::new(filename);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = name
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        std::iter::once(self.dir.join(filename)).chain(
            (1..).map(move |k| self.dir.join(format!("{stem} ({k}){ext}"))),
        )
    }

    // create_new fails on any existing entry, dangling links included
    fn write_new(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        for path in self.candidate_paths(filename) {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes)
                        .map_err(|e| ExportError::io(format!("write {}", path.display()), e))?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(ExportError::io(format!("create {}", path.display()), e));
                }
            }
        }
        Err(ExportError::io(
            format!("pick a free name for {filename}"),
            io::Error::from(ErrorKind::AlreadyExists),
        ))
    }
}

impl FileDownloader for DirectoryDownloader {
    fn save(&mut self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<SaveOutcome> {
        check_file_name(filename)?;
        fs::create_dir_all(&self.dir)
            .map_err(|e| ExportError::io(format!("create {}", self.dir.display()), e))?;

        let path = if self.overwrite {
            let path = self.dir.join(filename);
            fs::write(&path, bytes)
                .map_err(|e| ExportError::io(format!("write {}", path.display()), e))?;
            path
        } else {
            self.write_new(filename, bytes)?
        };

        tracing::info!(path = %path.display(), bytes = bytes.len(), mime_type, "saved file");
        Ok(SaveOutcome::Saved(path))
    }
}

/// Streams the document into any writer.
pub struct WriterDownloader<W: Write> {
    inner: W,
}

impl<W: Write> WriterDownloader<W> {
    pub fn new(inner: W) -> Self {
        WriterDownloader { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> FileDownloader for WriterDownloader<W> {
    fn save(&mut self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<SaveOutcome> {
        check_file_name(filename)?;
        self.inner
            .write_all(bytes)
            .and_then(|_| self.inner.flush())
            .map_err(|e| ExportError::io(format!("stream {filename}"), e))?;

        tracing::debug!(filename, bytes = bytes.len(), mime_type, "streamed file");
        Ok(SaveOutcome::Streamed { bytes: bytes.len() })
    }
}

/// Asks for a destination through the native save dialog.
#[cfg(feature = "dialog")]
#[derive(Debug, Clone, Default)]
pub struct DialogDownloader {
    start_dir: Option<PathBuf>,
}

#[cfg(feature = "dialog")]
impl DialogDownloader {
    pub fn new(start_dir: Option<PathBuf>) -> Self {
        DialogDownloader { start_dir }
    }
}

#[cfg(feature = "dialog")]
impl FileDownloader for DialogDownloader {
    fn save(&mut self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<SaveOutcome> {
        check_file_name(filename)?;

        let mut dialog = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(filename);
        if let Some(dir) = &self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let path = match dialog.save_file() {
            Some(path) => path,
            None => {
                tracing::info!(filename, "save dialog dismissed");
                return Ok(SaveOutcome::Cancelled);
            }
        };

        fs::write(&path, bytes)
            .map_err(|e| ExportError::io(format!("write {}", path.display()), e))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), mime_type, "saved file");
        Ok(SaveOutcome::Saved(path))
    }
}

/// Builds the downloader for the configured save mode.
pub fn select_downloader(config: &ExportConfig) -> Result<Box<dyn FileDownloader>> {
    tracing::debug!(mode = ?config.save_mode, "selecting downloader");
    match config.save_mode {
        SaveMode::Directory => Ok(Box::new(DirectoryDownloader::new(
            &config.out_dir,
            config.overwrite,
        ))),
        SaveMode::Stdout => Ok(Box::new(WriterDownloader::new(io::stdout()))),
        #[cfg(feature = "dialog")]
        SaveMode::Dialog => Ok(Box::new(DialogDownloader::new(Some(
            config.out_dir.clone(),
        )))),
        #[cfg(not(feature = "dialog"))]
        SaveMode::Dialog => Err(ExportError::UnsupportedPlatform {
            mechanism: "save dialog",
            reason: "built without the `dialog` feature".to_string(),
        }),
    }
}
