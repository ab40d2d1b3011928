pub mod json_extraction_store;
