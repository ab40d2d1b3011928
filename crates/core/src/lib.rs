//! Locates a known reference narrative inside noisy, time-segmented speech
//! transcripts and extracts the matching segments.

pub mod alignment;
pub mod extraction;
pub mod matching;
pub mod pipeline;
pub mod shared;
pub mod story;
pub mod transcript;
