use std::path::PathBuf;

use thiserror::Error;

use super::segment::Segment;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("segment {index} has a non-finite timestamp")]
    NonFiniteTimestamp { index: usize },
    #[error("segment {index} has a negative timestamp")]
    NegativeTimestamp { index: usize },
    #[error("segment {index} ends ({end_time}s) before it starts ({start_time}s)")]
    InvertedSegment {
        index: usize,
        start_time: f64,
        end_time: f64,
    },
    #[error("segment {index} starts at {start_time}s, before the previous segment ({previous_start}s)")]
    NonMonotonicStart {
        index: usize,
        start_time: f64,
        previous_start: f64,
    },
    #[error("segment index {index} does not follow previous index {previous}")]
    NonIncreasingIndex { index: usize, previous: usize },
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse transcript {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An ordered, validated sequence of segments from one source.
///
/// Segments keep the order the transcriber produced them in. Construction
/// rejects inputs whose timing cannot be trusted instead of repairing them.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    source_id: String,
    segments: Vec<Segment>,
}

impl Transcript {
    pub fn new(source_id: impl Into<String>, segments: Vec<Segment>) -> Result<Self, TranscriptError> {
        validate(&segments)?;
        Ok(Self {
            source_id: source_id.into(),
            segments,
        })
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn validate(segments: &[Segment]) -> Result<(), TranscriptError> {
    let mut previous: Option<&Segment> = None;
    for s in segments {
        let index = s.index;
        if !s.start_time.is_finite() || !s.end_time.is_finite() {
            return Err(TranscriptError::NonFiniteTimestamp { index });
        }
        if s.start_time < 0.0 || s.end_time < 0.0 {
            return Err(TranscriptError::NegativeTimestamp { index });
        }
        if s.end_time < s.start_time {
            return Err(TranscriptError::InvertedSegment {
                index,
                start_time: s.start_time,
                end_time: s.end_time,
            });
        }
        if let Some(prev) = previous {
            if s.index <= prev.index {
                return Err(TranscriptError::NonIncreasingIndex {
                    index,
                    previous: prev.index,
                });
            }
            if s.start_time < prev.start_time {
                return Err(TranscriptError::NonMonotonicStart {
                    index,
                    start_time: s.start_time,
                    previous_start: prev.start_time,
                });
            }
        }
        previous = Some(s);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(index: usize, start: f64, end: f64) -> Segment {
        Segment::new(index, "text", start, end)
    }

    #[test]
    fn test_empty_transcript_is_valid() {
        let t = Transcript::new("empty", Vec::new()).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert_eq!(t.source_id(), "empty");
    }

    #[test]
    fn test_ordered_segments_accepted() {
        let t = Transcript::new("a", vec![seg(0, 0.0, 1.0), seg(1, 1.0, 2.5), seg(2, 2.5, 2.5)])
            .unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.segments()[1].start_time, 1.0);
    }

    #[test]
    fn test_gaps_in_index_are_allowed() {
        let t = Transcript::new("a", vec![seg(0, 0.0, 1.0), seg(4, 3.0, 4.0)]).unwrap();
        assert_eq!(t.segments()[1].index, 4);
    }

    #[test]
    fn test_overlapping_segments_allowed_when_starts_ordered() {
        let result = Transcript::new("a", vec![seg(0, 0.0, 3.0), seg(1, 2.0, 4.0)]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_negative_timestamp_rejected() {
        let err = Transcript::new("a", vec![seg(0, -0.5, 1.0)]).unwrap_err();
        assert!(matches!(err, TranscriptError::NegativeTimestamp { index: 0 }));
    }

    #[test]
    fn test_nan_timestamp_rejected() {
        let err = Transcript::new("a", vec![seg(0, f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, TranscriptError::NonFiniteTimestamp { index: 0 }));
    }

    #[test]
    fn test_inverted_segment_rejected() {
        let err = Transcript::new("a", vec![seg(0, 2.0, 1.0)]).unwrap_err();
        assert!(matches!(err, TranscriptError::InvertedSegment { index: 0, .. }));
    }

    #[test]
    fn test_start_going_backwards_rejected() {
        let err = Transcript::new("a", vec![seg(0, 5.0, 6.0), seg(1, 4.0, 7.0)]).unwrap_err();
        assert!(matches!(err, TranscriptError::NonMonotonicStart { index: 1, .. }));
    }

    #[test]
    fn test_repeated_index_rejected() {
        let err = Transcript::new("a", vec![seg(2, 0.0, 1.0), seg(2, 1.0, 2.0)]).unwrap_err();
        assert!(matches!(
            err,
            TranscriptError::NonIncreasingIndex {
                index: 2,
                previous: 2
            }
        ));
    }

    #[test]
    fn test_error_message_names_segment() {
        let err = Transcript::new("a", vec![seg(7, 3.0, 1.0)]).unwrap_err();
        assert!(err.to_string().contains("segment 7"));
    }
}
