use std::path::{Path, PathBuf};

use super::aligned_dataset::AlignedDataset;
use super::alignment_summary::AlignmentSummary;

/// Paths produced by one [`AlignmentWriter::write_alignment`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentOutput {
    pub dataset_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Domain interface for persisting an aligned dataset and its summary.
pub trait AlignmentWriter: Send + Sync {
    fn write_alignment(
        &self,
        output_dir: &Path,
        dataset: &AlignedDataset,
        summary: &AlignmentSummary,
    ) -> Result<AlignmentOutput, Box<dyn std::error::Error + Send + Sync>>;
}
