use serde::{Deserialize, Serialize};

/// How well one anchor matched at one position of a transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub anchor_id: String,
    pub segment_index: usize,
    pub similarity: f64,
}
