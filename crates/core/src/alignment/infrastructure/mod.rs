pub mod json_alignment_writer;
