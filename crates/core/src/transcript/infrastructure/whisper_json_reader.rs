use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::transcript::domain::segment::Segment;
use crate::transcript::domain::transcript::{Transcript, TranscriptError};
use crate::transcript::domain::transcript_reader::TranscriptReader;

/// On-disk shape of a Whisper transcription. Only the fields the extractor
/// needs are read; everything else in the file is ignored.
#[derive(Deserialize)]
struct WhisperFile {
    segments: Vec<WhisperSegment>,
}

#[derive(Deserialize)]
struct WhisperSegment {
    id: Option<usize>,
    start: f64,
    end: f64,
    text: String,
}

/// Reads Whisper-style JSON transcriptions (`{"text": ..., "segments": [...]}`).
///
/// The source id of the resulting transcript is the file path as given.
pub struct WhisperJsonReader;

impl WhisperJsonReader {
    pub fn new() -> Self {
        Self
    }

    /// Parse a transcription already held in memory.
    pub fn parse(source_id: &str, json: &str) -> Result<Transcript, TranscriptError> {
        let file: WhisperFile =
            serde_json::from_str(json).map_err(|source| TranscriptError::Parse {
                path: source_id.into(),
                source,
            })?;

        let segments = file
            .segments
            .into_iter()
            .enumerate()
            .map(|(position, s)| Segment {
                index: s.id.unwrap_or(position),
                text: s.text,
                start_time: s.start,
                end_time: s.end,
            })
            .collect();

        Transcript::new(source_id, segments)
    }
}

impl Default for WhisperJsonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptReader for WhisperJsonReader {
    fn read_transcript(&self, path: &Path) -> Result<Transcript, TranscriptError> {
        let json = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&path.to_string_lossy(), &json)
    }
}
