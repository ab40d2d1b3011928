pub mod anchor;
pub mod anchor_table;
pub mod comma_story;
pub mod reference_sentence;
pub mod reference_story;
