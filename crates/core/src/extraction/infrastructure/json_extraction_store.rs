use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::extraction::domain::extraction_result::ExtractionResult;
use crate::extraction::domain::extraction_writer::ExtractionWriter;
use crate::shared::constants::EXTRACTION_FILE_SUFFIX;

#[derive(Error, Debug)]
pub enum ExtractionFileError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid extraction record {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Stores each result as pretty-printed JSON named after its source:
/// `speaker1_whisper.json` becomes `speaker1_whisper_story.json`.
pub struct JsonExtractionWriter;

impl JsonExtractionWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn output_path(output_dir: &Path, source_id: &str) -> PathBuf {
        let stem = Path::new(source_id)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "transcript".to_string());
        output_dir.join(format!("{stem}{EXTRACTION_FILE_SUFFIX}.json"))
    }

    pub fn write(
        &self,
        output_dir: &Path,
        result: &ExtractionResult,
    ) -> Result<PathBuf, ExtractionFileError> {
        fs::create_dir_all(output_dir).map_err(|source| ExtractionFileError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let path = Self::output_path(output_dir, &result.source_id);
        let json = serde_json::to_string_pretty(result).map_err(|source| {
            ExtractionFileError::Json {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|source| ExtractionFileError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl Default for JsonExtractionWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionWriter for JsonExtractionWriter {
    fn destination(&self, output_dir: &Path, source_id: &str) -> PathBuf {
        Self::output_path(output_dir, source_id)
    }

    fn write_extraction(
        &self,
        output_dir: &Path,
        result: &ExtractionResult,
    ) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.write(output_dir, result)?)
    }
}

/// Load a record previously written by [`JsonExtractionWriter`].
pub fn read_extraction(path: &Path) -> Result<ExtractionResult, ExtractionFileError> {
    let json = fs::read_to_string(path).map_err(|source| ExtractionFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| ExtractionFileError::Json {
        path: path.to_path_buf(),
        source,
    })
}
