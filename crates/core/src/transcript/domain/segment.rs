use serde::{Deserialize, Serialize};

/// A single timestamped snippet of transcribed speech.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl Segment {
    pub fn new(index: usize, text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            index,
            text: text.into(),
            start_time,
            end_time,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
