pub mod whisper_json_reader;
