use std::path::{Path, PathBuf};

use super::extraction_result::ExtractionResult;

/// Domain interface for persisting extraction results.
pub trait ExtractionWriter: Send + Sync {
    /// Where the record for `source_id` lands under `output_dir`.
    fn destination(&self, output_dir: &Path, source_id: &str) -> PathBuf;

    /// Persist `result` under `output_dir` and return the path written.
    fn write_extraction(
        &self,
        output_dir: &Path,
        result: &ExtractionResult,
    ) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>>;
}
