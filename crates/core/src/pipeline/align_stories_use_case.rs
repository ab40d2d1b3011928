use std::path::Path;
use std::sync::Arc;

use crate::alignment::domain::aligned_dataset::AlignedDataset;
use crate::alignment::domain::alignment_summary::AlignmentSummary;
use crate::alignment::domain::alignment_writer::{AlignmentOutput, AlignmentWriter};
use crate::alignment::domain::sentence_aligner::SentenceAligner;
use crate::extraction::domain::extraction_result::ExtractionResult;
use crate::story::domain::reference_story::ReferenceStory;

#[derive(Debug)]
pub struct AlignmentReport {
    pub dataset: AlignedDataset,
    pub summary: AlignmentSummary,
    pub output: AlignmentOutput,
    /// Source ids of results left out because they carry no story.
    pub skipped: Vec<String>,
}

/// Aligns extracted stories from many speakers against the reference
/// sentences and writes the combined dataset.
pub struct AlignStoriesUseCase {
    story: Arc<ReferenceStory>,
    writer: Box<dyn AlignmentWriter>,
}

impl AlignStoriesUseCase {
    pub fn new(story: Arc<ReferenceStory>, writer: Box<dyn AlignmentWriter>) -> Self {
        Self { story, writer }
    }

    pub fn run(
        &self,
        results: &[ExtractionResult],
        output_dir: &Path,
    ) -> Result<AlignmentReport, Box<dyn std::error::Error + Send + Sync>> {
        let aligner = SentenceAligner::new(self.story.normalizer());

        let mut alignments = Vec::new();
        let mut skipped = Vec::new();
        for result in results {
            if result.is_extracted() {
                alignments.push(aligner.align(result, &self.story));
            } else {
                log::warn!("{}: no extracted story, left out of alignment", result.source_id);
                skipped.push(result.source_id.clone());
            }
        }

        let dataset = AlignedDataset::build(&self.story, alignments);
        let summary = AlignmentSummary::from_dataset(&dataset);
        let output = self.writer.write_alignment(output_dir, &dataset, &summary)?;

        log::info!(
            "Aligned {} speakers over {} sentences (mean coverage {:.1}%)",
            summary.total_speakers,
            summary.total_sentences,
            summary.mean_speaker_coverage() * 100.0
        );

        Ok(AlignmentReport {
            dataset,
            summary,
            output,
            skipped,
        })
    }
}
