pub mod align_stories_use_case;
pub mod batch_executor;
pub mod batch_logger;
pub mod extract_story_use_case;
pub mod infrastructure;
