use std::path::Path;

use serde::Serialize;

use crate::extraction::domain::extraction_result::ExtractionResult;
use crate::matching::domain::normalizer::Normalizer;
use crate::matching::domain::phrase_matcher::contains_phrase;
use crate::shared::constants::EXTRACTION_FILE_SUFFIX;
use crate::story::domain::reference_story::ReferenceStory;
use crate::transcript::domain::segment::Segment;

/// Where one reference sentence was spoken, if it was found at all.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SentenceMatch {
    pub sentence_index: usize,
    pub reference_text: String,
    pub segment: Option<Segment>,
}

impl SentenceMatch {
    pub fn is_missing(&self) -> bool {
        self.segment.is_none()
    }

    pub fn start_time(&self) -> Option<f64> {
        self.segment.as_ref().map(|s| s.start_time)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.segment.as_ref().map(|s| s.end_time)
    }

    pub fn duration(&self) -> Option<f64> {
        self.segment.as_ref().map(Segment::duration)
    }

    /// Trimmed transcript text of the matched segment.
    pub fn text(&self) -> Option<&str> {
        self.segment.as_ref().map(|s| s.text.trim())
    }
}

/// One speaker's extracted story mapped sentence by sentence onto the
/// reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StoryAlignment {
    pub speaker_id: String,
    pub confidence: f64,
    pub total_duration: f64,
    pub sentences: Vec<SentenceMatch>,
}

impl StoryAlignment {
    pub fn found_count(&self) -> usize {
        self.sentences.iter().filter(|s| !s.is_missing()).count()
    }

    pub fn missing_count(&self) -> usize {
        self.sentences.len() - self.found_count()
    }
}

/// Assigns each reference sentence to the first story segment containing
/// one of its cue phrases.
pub struct SentenceAligner<'a> {
    normalizer: &'a Normalizer,
}

impl<'a> SentenceAligner<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn align(&self, result: &ExtractionResult, story: &ReferenceStory) -> StoryAlignment {
        let segment_tokens: Vec<Vec<String>> = result
            .segments
            .iter()
            .map(|s| self.normalizer.tokens(&s.text))
            .collect();

        let sentences = story
            .sentences()
            .iter()
            .enumerate()
            .map(|(sentence_index, sentence)| {
                let cues: Vec<Vec<String>> = sentence
                    .cues
                    .iter()
                    .map(|c| self.normalizer.tokens(c))
                    .filter(|c| !c.is_empty())
                    .collect();
                let segment = segment_tokens
                    .iter()
                    .position(|tokens| cues.iter().any(|cue| contains_phrase(tokens, cue)))
                    .map(|i| result.segments[i].clone());
                SentenceMatch {
                    sentence_index,
                    reference_text: sentence.text.clone(),
                    segment,
                }
            })
            .collect();

        StoryAlignment {
            speaker_id: speaker_id(&result.source_id),
            confidence: result.confidence,
            total_duration: result.duration().unwrap_or(0.0),
            sentences,
        }
    }
}

/// File stem of `source_id`, minus a trailing `_story` left by the
/// extraction writer.
pub fn speaker_id(source_id: &str) -> String {
    let stem = Path::new(source_id)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_id.to_string());
    match stem.strip_suffix(EXTRACTION_FILE_SUFFIX) {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::domain::extraction_result::ExtractionStatus;
    use crate::story::domain::anchor::{AnchorRole, ReferenceAnchor};
    use crate::story::domain::anchor_table::AnchorTable;
    use crate::story::domain::comma_story::comma_gets_a_cure;
    use crate::story::domain::reference_sentence::ReferenceSentence;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn story() -> ReferenceStory {
        let table = AnchorTable::new(
            "1",
            vec![ReferenceAnchor::new("opening", "here's a story for you", AnchorRole::Start, 1.0)],
        )
        .unwrap();
        ReferenceStory::new(
            "short",
            table,
            &[crate::matching::domain::normalizer::Substitution::new("kama", "comma")],
            vec![
                ReferenceSentence::new("Here's a story for you.", ["story for you"]),
                ReferenceSentence::new("Comma was a goose.", ["comma was", "a goose"]),
                ReferenceSentence::new("She was cured.", ["cured"]),
            ],
        )
        .unwrap()
    }

    fn result(source_id: &str, texts: &[&str]) -> ExtractionResult {
        let segments: Vec<Segment> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Segment::new(i, *t, i as f64, i as f64 + 1.0))
            .collect();
        let mut r = ExtractionResult::rejected(
            source_id,
            ExtractionStatus::Extracted,
            0.8,
            segments.len(),
        );
        r.start_time = segments.first().map(|s| s.start_time);
        r.end_time = segments.last().map(|s| s.end_time);
        r.story_segment_count = segments.len();
        r.segments = segments;
        r
    }

    #[rstest]
    #[case("out/speaker1_whisper_story.json", "speaker1_whisper")]
    #[case("speaker2.json", "speaker2")]
    #[case("_story.json", "_story")]
    #[case("plain", "plain")]
    fn test_speaker_id(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(speaker_id(source), expected);
    }

    #[test]
    fn test_sentences_assigned_to_matching_segments() {
        let s = story();
        let r = result(
            "speaker1_story.json",
            &[" Here's a story for you. ", "Kama was an itchy bird.", "nothing"],
        );
        let alignment = SentenceAligner::new(s.normalizer()).align(&r, &s);

        assert_eq!(alignment.speaker_id, "speaker1");
        assert_relative_eq!(alignment.confidence, 0.8);
        assert_relative_eq!(alignment.total_duration, 3.0);
        assert_eq!(alignment.sentences.len(), 3);

        assert_eq!(alignment.sentences[0].text(), Some("Here's a story for you."));
        assert_eq!(alignment.sentences[1].start_time(), Some(1.0));
        assert_eq!(alignment.sentences[1].duration(), Some(1.0));
        assert!(alignment.sentences[2].is_missing());
        assert_eq!(alignment.found_count(), 2);
        assert_eq!(alignment.missing_count(), 1);
    }

    #[test]
    fn test_first_matching_segment_wins() {
        let s = story();
        let r = result("a.json", &["she was cured", "she was cured again"]);
        let alignment = SentenceAligner::new(s.normalizer()).align(&r, &s);
        assert_eq!(alignment.sentences[2].end_time(), Some(1.0));
    }

    #[test]
    fn test_cue_must_match_whole_words() {
        let s = story();
        let r = result("a.json", &["uncured meat"]);
        let alignment = SentenceAligner::new(s.normalizer()).align(&r, &s);
        assert!(alignment.sentences[2].is_missing());
    }

    #[test]
    fn test_rejected_result_is_all_missing() {
        let s = story();
        let r = ExtractionResult::rejected("a.json", ExtractionStatus::NoStoryStart, 0.0, 5);
        let alignment = SentenceAligner::new(s.normalizer()).align(&r, &s);
        assert_eq!(alignment.missing_count(), 3);
        assert_relative_eq!(alignment.total_duration, 0.0);
    }

    #[test]
    fn test_verbatim_story_aligns_every_sentence() {
        let s = comma_gets_a_cure().unwrap();
        let texts: Vec<&str> = s.sentences().iter().map(|x| x.text.as_str()).collect();
        let alignment = SentenceAligner::new(s.normalizer()).align(&result("v.json", &texts), &s);
        assert_eq!(alignment.found_count(), s.sentences().len());
    }
}
