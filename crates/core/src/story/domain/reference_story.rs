use thiserror::Error;

use super::anchor_table::{AnchorTable, AnchorTableError};
use super::reference_sentence::ReferenceSentence;
use crate::matching::domain::normalizer::{Normalizer, NormalizerError, Substitution};

#[derive(Error, Debug, PartialEq)]
pub enum ReferenceStoryError {
    #[error("invalid anchor table: {0}")]
    Anchors(#[from] AnchorTableError),
    #[error("invalid substitution table: {0}")]
    Substitutions(#[from] NormalizerError),
}

/// Everything known about the narrative being searched for: its anchors,
/// the transcription errors to undo before matching, and its sentences.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceStory {
    name: String,
    anchors: AnchorTable,
    normalizer: Normalizer,
    sentences: Vec<ReferenceSentence>,
}

impl ReferenceStory {
    pub fn new(
        name: impl Into<String>,
        anchors: AnchorTable,
        substitutions: &[Substitution],
        sentences: Vec<ReferenceSentence>,
    ) -> Result<Self, ReferenceStoryError> {
        Ok(Self {
            name: name.into(),
            anchors,
            normalizer: Normalizer::new(substitutions)?,
            sentences,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn sentences(&self) -> &[ReferenceSentence] {
        &self.sentences
    }

    /// The full reference text, sentences joined by single spaces.
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
