use super::boundary_locator::{BoundaryLocator, StoryBoundaries};
use super::confidence_scorer::ConfidenceScorer;
use super::extraction_config::{ConfigError, ExtractionConfig};
use super::extraction_result::{ExtractionResult, ExtractionStatus};
use crate::matching::domain::phrase_matcher::PhraseMatcher;
use crate::story::domain::anchor_table::AnchorTable;
use crate::story::domain::reference_story::ReferenceStory;
use crate::transcript::domain::transcript::Transcript;

/// Locates, scores and slices the reference story out of a transcript.
///
/// Holds no per-run state, so one extractor can serve any number of threads.
/// The anchor table is passed into every call rather than owned, which lets
/// callers swap reference stories without rebuilding the extractor.
#[derive(Clone, Debug)]
pub struct StoryExtractor {
    matcher: PhraseMatcher,
    config: ExtractionConfig,
}

impl StoryExtractor {
    pub fn new(matcher: PhraseMatcher, config: ExtractionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { matcher, config })
    }

    /// An extractor using the story's own substitution table.
    pub fn for_story(story: &ReferenceStory, config: ExtractionConfig) -> Result<Self, ConfigError> {
        Self::new(PhraseMatcher::new(story.normalizer().clone()), config)
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn matcher(&self) -> &PhraseMatcher {
        &self.matcher
    }

    pub fn locate(&self, transcript: &Transcript, anchors: &AnchorTable) -> Option<StoryBoundaries> {
        BoundaryLocator::new(&self.matcher, self.config.acceptance_threshold)
            .locate(transcript, anchors)
    }

    pub fn score_confidence(
        &self,
        transcript: &Transcript,
        range: Option<(usize, usize)>,
        anchors: &AnchorTable,
    ) -> f64 {
        ConfidenceScorer::new(&self.matcher, self.config.evidence_floor)
            .score(transcript, range, anchors)
    }

    pub fn extract(&self, transcript: &Transcript, anchors: &AnchorTable) -> ExtractionResult {
        let source_id = transcript.source_id();
        let total = transcript.len();

        let Some(boundaries) = self.locate(transcript, anchors) else {
            log::debug!("{source_id}: no story start found");
            return ExtractionResult::rejected(source_id, ExtractionStatus::NoStoryStart, 0.0, total);
        };

        let confidence = self.score_confidence(transcript, Some(boundaries.range()), anchors);
        if confidence < self.config.min_confidence {
            log::debug!(
                "{source_id}: confidence {confidence:.2} below minimum {:.2}",
                self.config.min_confidence
            );
            return ExtractionResult::rejected(
                source_id,
                ExtractionStatus::LowConfidence,
                confidence,
                total,
            );
        }

        let segments = transcript.segments()[boundaries.start..=boundaries.end].to_vec();
        let story_text = segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        ExtractionResult {
            source_id: source_id.to_string(),
            status: ExtractionStatus::Extracted,
            confidence,
            start_segment: Some(boundaries.start),
            end_segment: Some(boundaries.end),
            end_boundary_defaulted: boundaries.end_defaulted(),
            story_text,
            start_time: segments.first().map(|s| s.start_time),
            end_time: segments.last().map(|s| s.end_time),
            story_segment_count: segments.len(),
            total_segments: total,
            segments,
        }
    }
}
