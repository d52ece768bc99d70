// src/infrastructure/export_writer.rs
//
// Saves export blobs to disk.
//
// RULES:
// - Files land directly in the target directory, never outside it
// - An existing file with the same name is overwritten

use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct ExportWriter {
    target_dir: PathBuf,
}

impl ExportWriter {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Write `contents` to `file_name` inside the target directory
    ///
    /// The directory is created if missing. Returns the path written.
    pub fn save(&self, file_name: &str, contents: &str) -> AppResult<PathBuf> {
        let file_name = Path::new(file_name)
            .file_name()
            .filter(|name| Path::new(name) == Path::new(file_name))
            .ok_or_else(|| {
                AppError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid export file name: {:?}", file_name),
                ))
            })?;

        fs::create_dir_all(&self.target_dir)?;

        let path = self.target_dir.join(file_name);
        fs::write(&path, contents)?;

        info!("Exported {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }
}
