pub mod match_result;
pub mod normalizer;
pub mod phrase_matcher;
pub mod similarity;
