pub mod json_story_loader;
