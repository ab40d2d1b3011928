pub mod aligned_dataset;
pub mod alignment_summary;
pub mod alignment_writer;
pub mod sentence_aligner;
