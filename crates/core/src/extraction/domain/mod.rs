pub mod boundary_locator;
pub mod confidence_band;
pub mod confidence_scorer;
pub mod extraction_config;
pub mod extraction_result;
pub mod extraction_writer;
pub mod story_extractor;
