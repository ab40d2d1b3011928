use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::matching::domain::normalizer::Substitution;
use crate::story::domain::anchor::{AnchorRole, ReferenceAnchor};
use crate::story::domain::anchor_table::{AnchorTable, AnchorTableError};
use crate::story::domain::reference_sentence::ReferenceSentence;
use crate::story::domain::reference_story::{ReferenceStory, ReferenceStoryError};

#[derive(Error, Debug)]
pub enum StoryLoadError {
    #[error("failed to read story file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid story file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Anchors(#[from] AnchorTableError),
    #[error(transparent)]
    Story(#[from] ReferenceStoryError),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoryFile {
    name: String,
    #[serde(default = "default_version")]
    version: String,
    anchors: Vec<AnchorEntry>,
    #[serde(default)]
    substitutions: Vec<Substitution>,
    #[serde(default)]
    sentences: Vec<ReferenceSentence>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AnchorEntry {
    id: String,
    phrase: String,
    role: AnchorRole,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default)]
    variants: Vec<String>,
}

fn default_version() -> String {
    "1".to_string()
}

fn default_weight() -> f64 {
    1.0
}

/// Reads a reference story from a JSON document of the form
///
/// ```json
/// {
///   "name": "comma-gets-a-cure",
///   "version": "1",
///   "anchors": [
///     {"id": "opening", "phrase": "here's a story for you", "role": "start", "weight": 3,
///      "variants": ["here is a story for you"]}
///   ],
///   "substitutions": [{"from": "kama", "to": "comma"}],
///   "sentences": [{"text": "Well, here's a story for you.", "cues": ["story for you"]}]
/// }
/// ```
pub struct JsonStoryLoader;

impl JsonStoryLoader {
    pub fn load(path: &Path) -> Result<ReferenceStory, StoryLoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| StoryLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let story = Self::parse(&json)?;
        log::info!(
            "Loaded story '{}' ({} anchors) from {}",
            story.name(),
            story.anchors().len(),
            path.display()
        );
        Ok(story)
    }

    pub fn parse(json: &str) -> Result<ReferenceStory, StoryLoadError> {
        let file: StoryFile = serde_json::from_str(json)?;

        let anchors = file
            .anchors
            .into_iter()
            .map(|a| ReferenceAnchor::new(a.id, a.phrase, a.role, a.weight).with_variants(a.variants))
            .collect();
        let table = AnchorTable::new(file.version, anchors)?;

        Ok(ReferenceStory::new(
            file.name,
            table,
            &file.substitutions,
            file.sentences,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::normalizer::NormalizerError;

    const STORY: &str = r#"{
        "name": "short",
        "version": "2",
        "anchors": [
            {"id": "opening", "phrase": "here's a story for you", "role": "start", "weight": 3,
             "variants": ["here is a story for you"]},
            {"id": "closing", "phrase": "can't imagine paying so much", "role": "end"}
        ],
        "substitutions": [{"from": "kama", "to": "comma"}],
        "sentences": [{"text": "Well, here's a story for you.", "cues": ["story for you"]}]
    }"#;

    #[test]
    fn test_parse_full_document() {
        let story = JsonStoryLoader::parse(STORY).unwrap();
        assert_eq!(story.name(), "short");
        assert_eq!(story.anchors().version(), "2");
        assert_eq!(story.anchors().len(), 2);
        assert_eq!(story.anchors().total_weight(), 4.0);

        let opening = story.anchors().get("opening").unwrap();
        assert_eq!(opening.role, AnchorRole::Start);
        assert!(opening.known_variants.contains("here is a story for you"));

        assert_eq!(story.normalizer().substitution_count(), 1);
        assert_eq!(story.normalizer().normalize("Kama"), "comma");
        assert_eq!(story.sentences().len(), 1);
    }

    #[test]
    fn test_optional_sections_default() {
        let story = JsonStoryLoader::parse(
            r#"{"name": "tiny", "anchors": [{"id": "a", "phrase": "once upon a time", "role": "start"}]}"#,
        )
        .unwrap();
        assert_eq!(story.anchors().version(), "1");
        assert_eq!(story.normalizer().substitution_count(), 0);
        assert!(story.sentences().is_empty());
    }

    #[test]
    fn test_missing_start_anchor_rejected() {
        let err = JsonStoryLoader::parse(
            r#"{"name": "x", "anchors": [{"id": "a", "phrase": "the end", "role": "end"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StoryLoadError::Anchors(AnchorTableError::NoStartAnchor)
        ));
    }

    #[test]
    fn test_cyclic_substitutions_rejected() {
        let err = JsonStoryLoader::parse(
            r#"{"name": "x",
                "anchors": [{"id": "a", "phrase": "once upon a time", "role": "start"}],
                "substitutions": [{"from": "a", "to": "b"}, {"from": "b", "to": "a"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StoryLoadError::Story(ReferenceStoryError::Substitutions(NormalizerError::Cycle { .. }))
        ));
    }

    #[test]
    fn test_unknown_role_is_parse_error() {
        let err = JsonStoryLoader::parse(
            r#"{"name": "x", "anchors": [{"id": "a", "phrase": "p q r", "role": "middle"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, StoryLoadError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.json");
        std::fs::write(&path, STORY).unwrap();
        assert_eq!(JsonStoryLoader::load(&path).unwrap().name(), "short");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonStoryLoader::load(&dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, StoryLoadError::Io { .. }));
    }
}
