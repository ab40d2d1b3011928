use serde::{Deserialize, Serialize};

/// One sentence of the reference story and the short phrases that identify
/// it inside a transcript segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSentence {
    pub text: String,
    pub cues: Vec<String>,
}

impl ReferenceSentence {
    pub fn new<I, S>(text: impl Into<String>, cues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            cues: cues.into_iter().map(Into::into).collect(),
        }
    }
}
