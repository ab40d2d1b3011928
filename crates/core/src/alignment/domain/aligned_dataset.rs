use serde::Serialize;

use super::sentence_aligner::StoryAlignment;
use crate::story::domain::reference_story::ReferenceStory;

/// One speaker's rendition of a reference sentence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeakerTake {
    pub speaker_id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    pub duration: f64,
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SentenceAlignment {
    pub sentence_index: usize,
    pub reference_text: String,
    pub speakers: Vec<SpeakerTake>,
}

/// Every speaker's story aligned against the same reference, both per
/// speaker and per sentence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlignedDataset {
    pub story: String,
    pub total_speakers: usize,
    pub total_sentences: usize,
    pub reference_sentences: Vec<String>,
    pub speakers: Vec<StoryAlignment>,
    pub sentence_alignments: Vec<SentenceAlignment>,
}

impl AlignedDataset {
    pub fn build(story: &ReferenceStory, speakers: Vec<StoryAlignment>) -> Self {
        let reference_sentences: Vec<String> =
            story.sentences().iter().map(|s| s.text.clone()).collect();

        let sentence_alignments = reference_sentences
            .iter()
            .enumerate()
            .map(|(sentence_index, reference_text)| SentenceAlignment {
                sentence_index,
                reference_text: reference_text.clone(),
                speakers: speakers
                    .iter()
                    .filter_map(|speaker| take(speaker, sentence_index))
                    .collect(),
            })
            .collect();

        Self {
            story: story.name().to_string(),
            total_speakers: speakers.len(),
            total_sentences: reference_sentences.len(),
            reference_sentences,
            speakers,
            sentence_alignments,
        }
    }
}

fn take(speaker: &StoryAlignment, sentence_index: usize) -> Option<SpeakerTake> {
    let found = speaker.sentences.get(sentence_index)?;
    let segment = found.segment.as_ref()?;
    Some(SpeakerTake {
        speaker_id: speaker.speaker_id.clone(),
        start_time: segment.start_time,
        end_time: segment.end_time,
        text: segment.text.trim().to_string(),
        duration: segment.duration(),
        confidence: speaker.confidence,
    })
}
