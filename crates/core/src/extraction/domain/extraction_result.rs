use serde::{Deserialize, Serialize};

use crate::transcript::domain::segment::Segment;

/// How an extraction run ended. Only `Extracted` carries boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Extracted,
    /// No start anchor anywhere in the transcript.
    NoStoryStart,
    /// A range was found but its evidence fell below the minimum confidence.
    LowConfidence,
}

/// The story located in one transcript, or the reason none was.
///
/// Always fully formed: a missing story is expressed through `status`,
/// null boundaries and a low confidence rather than through an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub source_id: String,
    pub status: ExtractionStatus,
    pub confidence: f64,
    pub start_segment: Option<usize>,
    pub end_segment: Option<usize>,
    /// True when no end anchor matched and the story was run to the last
    /// segment of the transcript.
    pub end_boundary_defaulted: bool,
    pub story_text: String,
    pub segments: Vec<Segment>,
    pub total_segments: usize,
    pub story_segment_count: usize,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

impl ExtractionResult {
    /// A result without boundaries.
    pub fn rejected(
        source_id: impl Into<String>,
        status: ExtractionStatus,
        confidence: f64,
        total_segments: usize,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            status,
            confidence,
            start_segment: None,
            end_segment: None,
            end_boundary_defaulted: false,
            story_text: String::new(),
            segments: Vec::new(),
            total_segments,
            story_segment_count: 0,
            start_time: None,
            end_time: None,
        }
    }

    pub fn is_extracted(&self) -> bool {
        self.status == ExtractionStatus::Extracted
    }

    /// Seconds between the first story segment's start and the last one's end.
    pub fn duration(&self) -> Option<f64> {
        Some(self.end_time? - self.start_time?)
    }
}
