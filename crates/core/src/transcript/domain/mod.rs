pub mod segment;
pub mod transcript;
pub mod transcript_reader;
