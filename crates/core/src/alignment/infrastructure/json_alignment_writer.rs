use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::alignment::domain::aligned_dataset::AlignedDataset;
use crate::alignment::domain::alignment_summary::AlignmentSummary;
use crate::alignment::domain::alignment_writer::{AlignmentOutput, AlignmentWriter};
use crate::shared::constants::{ALIGNED_DATASET_FILENAME, ALIGNMENT_SUMMARY_FILENAME};

/// Writes `aligned_story.json` and `alignment_summary.json` side by side.
pub struct JsonAlignmentWriter;

impl JsonAlignmentWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonAlignmentWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignmentWriter for JsonAlignmentWriter {
    fn write_alignment(
        &self,
        output_dir: &Path,
        dataset: &AlignedDataset,
        summary: &AlignmentSummary,
    ) -> Result<AlignmentOutput, Box<dyn std::error::Error + Send + Sync>> {
        fs::create_dir_all(output_dir).map_err(|e| {
            format!(
                "Failed to create output directory {}: {e}",
                output_dir.display()
            )
        })?;

        Ok(AlignmentOutput {
            dataset_path: write_json(&output_dir.join(ALIGNED_DATASET_FILENAME), dataset)?,
            summary_path: write_json(&output_dir.join(ALIGNMENT_SUMMARY_FILENAME), summary)?,
        })
    }
}

fn write_json<T: Serialize>(
    path: &Path,
    value: &T,
) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    Ok(path.to_path_buf())
}
