use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::extraction::domain::extraction_config::{ConfigError, ExtractionConfig};
use crate::extraction::domain::extraction_result::ExtractionResult;
use crate::extraction::domain::extraction_writer::ExtractionWriter;
use crate::extraction::domain::story_extractor::StoryExtractor;
use crate::story::domain::reference_story::ReferenceStory;
use crate::transcript::domain::transcript_reader::TranscriptReader;

/// What happened to one input transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionReport {
    pub source: PathBuf,
    pub result: ExtractionResult,
    /// Where the record was written; `None` for rejected results unless
    /// rejected results are kept.
    pub written: Option<PathBuf>,
    pub duration_ms: f64,
}

/// Reads one transcript, extracts the reference story from it and persists
/// the result.
///
/// Shared across worker threads behind an `Arc`; every call is independent.
pub struct ExtractStoryUseCase {
    reader: Box<dyn TranscriptReader>,
    writer: Box<dyn ExtractionWriter>,
    story: Arc<ReferenceStory>,
    extractor: StoryExtractor,
    output_dir: PathBuf,
    keep_rejected: bool,
}

impl ExtractStoryUseCase {
    pub fn new(
        reader: Box<dyn TranscriptReader>,
        writer: Box<dyn ExtractionWriter>,
        story: Arc<ReferenceStory>,
        config: ExtractionConfig,
        output_dir: PathBuf,
        keep_rejected: bool,
    ) -> Result<Self, ConfigError> {
        let extractor = StoryExtractor::for_story(&story, config)?;
        Ok(Self {
            reader,
            writer,
            story,
            extractor,
            output_dir,
            keep_rejected,
        })
    }

    pub fn story(&self) -> &ReferenceStory {
        &self.story
    }

    /// Output records that more than one input would write, with the
    /// inputs competing for each. The last input to finish wins the file.
    pub fn output_collisions(&self, inputs: &[PathBuf]) -> Vec<(PathBuf, Vec<PathBuf>)> {
        let mut by_destination: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        for input in inputs {
            let destination = self
                .writer
                .destination(&self.output_dir, &input.to_string_lossy());
            by_destination.entry(destination).or_default().push(input.clone());
        }
        by_destination
            .into_iter()
            .filter(|(_, sources)| sources.len() > 1)
            .collect()
    }

    pub fn run(
        &self,
        source_path: &Path,
    ) -> Result<ExtractionReport, Box<dyn std::error::Error + Send + Sync>> {
        let started = Instant::now();

        // 1. Read and validate the transcript
        let transcript = self.reader.read_transcript(source_path)?;

        // 2. Locate, score and slice
        let result = self.extractor.extract(&transcript, self.story.anchors());

        // 3. Persist accepted results (and rejected ones when asked to)
        let written = if result.is_extracted() || self.keep_rejected {
            Some(self.writer.write_extraction(&self.output_dir, &result)?)
        } else {
            None
        };

        Ok(ExtractionReport {
            source: source_path.to_path_buf(),
            result,
            written,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::domain::extraction_result::ExtractionStatus;
    use crate::story::domain::comma_story::comma_gets_a_cure;
    use crate::transcript::domain::segment::Segment;
    use crate::transcript::domain::transcript::{Transcript, TranscriptError};
    use std::sync::Mutex;

    // ─── Stubs ───

    struct StubReader {
        texts: Vec<String>,
    }

    impl TranscriptReader for StubReader {
        fn read_transcript(&self, path: &Path) -> Result<Transcript, TranscriptError> {
            let segments = self
                .texts
                .iter()
                .enumerate()
                .map(|(i, t)| Segment::new(i, t.clone(), i as f64 * 3.0, i as f64 * 3.0 + 3.0))
                .collect();
            Transcript::new(path.to_string_lossy(), segments)
        }
    }

    struct FailingReader;

    impl TranscriptReader for FailingReader {
        fn read_transcript(&self, path: &Path) -> Result<Transcript, TranscriptError> {
            Err(TranscriptError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }
    }

    #[derive(Clone, Default)]
    struct StubWriter {
        written: Arc<Mutex<Vec<ExtractionResult>>>,
    }

    impl ExtractionWriter for StubWriter {
        fn destination(&self, output_dir: &Path, source_id: &str) -> PathBuf {
            let stem = Path::new(source_id).file_stem().unwrap_or_default();
            output_dir.join(stem)
        }

        fn write_extraction(
            &self,
            output_dir: &Path,
            result: &ExtractionResult,
        ) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
            self.written.lock().unwrap().push(result.clone());
            Ok(output_dir.join("out.json"))
        }
    }

    fn verbatim() -> Vec<String> {
        comma_gets_a_cure()
            .unwrap()
            .sentences()
            .iter()
            .map(|s| s.text.clone())
            .collect()
    }

    fn use_case(
        reader: Box<dyn TranscriptReader>,
        writer: StubWriter,
        keep_rejected: bool,
    ) -> ExtractStoryUseCase {
        ExtractStoryUseCase::new(
            reader,
            Box::new(writer),
            Arc::new(comma_gets_a_cure().unwrap()),
            ExtractionConfig::default(),
            PathBuf::from("/out"),
            keep_rejected,
        )
        .unwrap()
    }

    #[test]
    fn test_extracted_story_is_written() {
        let writer = StubWriter::default();
        let uc = use_case(Box::new(StubReader { texts: verbatim() }), writer.clone(), false);

        let report = uc.run(Path::new("speaker1.json")).unwrap();

        assert_eq!(report.result.status, ExtractionStatus::Extracted);
        assert_eq!(report.written, Some(PathBuf::from("/out/out.json")));
        assert_eq!(report.source, PathBuf::from("speaker1.json"));
        assert_eq!(report.result.source_id, "speaker1.json");

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0], report.result);
    }

    #[test]
    fn test_rejected_story_is_not_written_by_default() {
        let writer = StubWriter::default();
        let texts = vec!["the weather today".to_string(), "is mild".to_string()];
        let uc = use_case(Box::new(StubReader { texts }), writer.clone(), false);

        let report = uc.run(Path::new("s.json")).unwrap();

        assert_eq!(report.result.status, ExtractionStatus::NoStoryStart);
        assert!(report.written.is_none());
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rejected_story_written_when_kept() {
        let writer = StubWriter::default();
        let uc = use_case(Box::new(StubReader { texts: Vec::new() }), writer.clone(), true);

        let report = uc.run(Path::new("empty.json")).unwrap();

        assert!(!report.result.is_extracted());
        assert!(report.written.is_some());
        assert_eq!(writer.written.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_reader_error_propagates() {
        let writer = StubWriter::default();
        let uc = use_case(Box::new(FailingReader), writer.clone(), true);

        let err = uc.run(Path::new("gone.json")).unwrap_err();

        assert!(err.to_string().contains("gone.json"));
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_output_collisions_group_inputs_sharing_a_destination() {
        let uc = use_case(
            Box::new(StubReader { texts: Vec::new() }),
            StubWriter::default(),
            false,
        );
        let inputs = vec![
            PathBuf::from("a/s1.json"),
            PathBuf::from("b/s2.json"),
            PathBuf::from("b/s1.json"),
        ];

        let collisions = uc.output_collisions(&inputs);

        assert_eq!(
            collisions,
            vec![(
                PathBuf::from("/out/s1"),
                vec![PathBuf::from("a/s1.json"), PathBuf::from("b/s1.json")]
            )]
        );
    }

    #[test]
    fn test_distinct_inputs_do_not_collide() {
        let uc = use_case(
            Box::new(StubReader { texts: Vec::new() }),
            StubWriter::default(),
            false,
        );
        let inputs = vec![PathBuf::from("a/s1.json"), PathBuf::from("a/s2.json")];
        assert!(uc.output_collisions(&inputs).is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractionConfig {
            min_confidence: 1.5,
            ..ExtractionConfig::default()
        };
        let result = ExtractStoryUseCase::new(
            Box::new(StubReader { texts: Vec::new() }),
            Box::new(StubWriter::default()),
            Arc::new(comma_gets_a_cure().unwrap()),
            config,
            PathBuf::from("/out"),
            false,
        );
        assert!(result.is_err());
    }
}
