use std::path::Path;

use super::transcript::{Transcript, TranscriptError};

/// Domain interface for loading a persisted transcription.
///
/// Implementations must fill every segment field from the source and leave
/// validation of timing to [`Transcript::new`].
pub trait TranscriptReader: Send + Sync {
    fn read_transcript(&self, path: &Path) -> Result<Transcript, TranscriptError>;
}
