use serde::Serialize;

use super::aligned_dataset::AlignedDataset;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SentenceCoverage {
    pub sentence_index: usize,
    pub reference: String,
    pub speakers_count: usize,
    /// Share of speakers whose story contains the sentence.
    pub coverage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeakerCoverage {
    pub speaker_id: String,
    /// Share of reference sentences found in the speaker's story.
    pub coverage: f64,
    pub missing_sentences: usize,
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignmentSummary {
    pub total_speakers: usize,
    pub total_sentences: usize,
    pub sentence_coverage: Vec<SentenceCoverage>,
    pub speaker_coverage: Vec<SpeakerCoverage>,
}

impl AlignmentSummary {
    pub fn from_dataset(dataset: &AlignedDataset) -> Self {
        let sentence_coverage = dataset
            .sentence_alignments
            .iter()
            .map(|s| SentenceCoverage {
                sentence_index: s.sentence_index,
                reference: s.reference_text.clone(),
                speakers_count: s.speakers.len(),
                coverage: share(s.speakers.len(), dataset.total_speakers),
            })
            .collect();

        let speaker_coverage = dataset
            .speakers
            .iter()
            .map(|s| SpeakerCoverage {
                speaker_id: s.speaker_id.clone(),
                coverage: share(s.found_count(), dataset.total_sentences),
                missing_sentences: s.missing_count(),
                confidence: s.confidence,
            })
            .collect();

        Self {
            total_speakers: dataset.total_speakers,
            total_sentences: dataset.total_sentences,
            sentence_coverage,
            speaker_coverage,
        }
    }

    /// Mean speaker coverage, 0 with no speakers.
    pub fn mean_speaker_coverage(&self) -> f64 {
        if self.speaker_coverage.is_empty() {
            return 0.0;
        }
        self.speaker_coverage.iter().map(|s| s.coverage).sum::<f64>()
            / self.speaker_coverage.len() as f64
    }
}

fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::domain::sentence_aligner::{SentenceMatch, StoryAlignment};
    use crate::story::domain::anchor::{AnchorRole, ReferenceAnchor};
    use crate::story::domain::anchor_table::AnchorTable;
    use crate::story::domain::reference_sentence::ReferenceSentence;
    use crate::story::domain::reference_story::ReferenceStory;
    use crate::transcript::domain::segment::Segment;
    use approx::assert_relative_eq;

    fn story(sentences: usize) -> ReferenceStory {
        let table = AnchorTable::new(
            "1",
            vec![ReferenceAnchor::new("a", "once upon a time", AnchorRole::Start, 1.0)],
        )
        .unwrap();
        let sentences = (0..sentences)
            .map(|i| ReferenceSentence::new(format!("Sentence {i}."), [format!("sentence {i}")]))
            .collect();
        ReferenceStory::new("tiny", table, &[], sentences).unwrap()
    }

    fn speaker(id: &str, found: &[bool]) -> StoryAlignment {
        StoryAlignment {
            speaker_id: id.to_string(),
            confidence: 0.75,
            total_duration: 10.0,
            sentences: found
                .iter()
                .enumerate()
                .map(|(i, &f)| SentenceMatch {
                    sentence_index: i,
                    reference_text: format!("Sentence {i}."),
                    segment: f.then(|| Segment::new(i, "x", 0.0, 1.0)),
                })
                .collect(),
        }
    }

    #[test]
    fn test_coverage() {
        let dataset = AlignedDataset::build(
            &story(4),
            vec![
                speaker("s1", &[true, true, true, true]),
                speaker("s2", &[true, false, false, true]),
            ],
        );
        let summary = AlignmentSummary::from_dataset(&dataset);

        assert_eq!(summary.total_speakers, 2);
        assert_eq!(summary.total_sentences, 4);
        assert_relative_eq!(summary.sentence_coverage[0].coverage, 1.0);
        assert_relative_eq!(summary.sentence_coverage[1].coverage, 0.5);
        assert_eq!(summary.sentence_coverage[1].speakers_count, 1);
        assert_eq!(summary.sentence_coverage[1].reference, "Sentence 1.");

        assert_eq!(summary.speaker_coverage[1].speaker_id, "s2");
        assert_relative_eq!(summary.speaker_coverage[1].coverage, 0.5);
        assert_eq!(summary.speaker_coverage[1].missing_sentences, 2);
        assert_relative_eq!(summary.speaker_coverage[1].confidence, 0.75);
        assert_relative_eq!(summary.mean_speaker_coverage(), 0.75);
    }

    #[test]
    fn test_no_speakers_is_zero_coverage() {
        let summary = AlignmentSummary::from_dataset(&AlignedDataset::build(&story(3), Vec::new()));
        assert!(summary.sentence_coverage.iter().all(|s| s.coverage == 0.0));
        assert!(summary.speaker_coverage.is_empty());
        assert_relative_eq!(summary.mean_speaker_coverage(), 0.0);
    }

    #[test]
    fn test_empty_story_is_zero_coverage() {
        let summary =
            AlignmentSummary::from_dataset(&AlignedDataset::build(&story(0), vec![speaker("s1", &[])]));
        assert_relative_eq!(summary.speaker_coverage[0].coverage, 0.0);
    }
}
