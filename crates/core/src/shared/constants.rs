/// Minimum similarity a START or END anchor must exceed to mark a boundary.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.6;

/// Matches scoring below this floor contribute nothing to confidence.
pub const DEFAULT_EVIDENCE_FLOOR: f64 = 0.6;

/// Results below this confidence are returned without boundaries.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

pub const DEFAULT_HIGH_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_MEDIUM_CONFIDENCE: f64 = 0.3;

/// Score multiplier for matches found through a known variant rather than
/// the canonical phrase.
pub const VARIANT_MATCH_FACTOR: f64 = 0.95;

/// Phrases shorter than this only match exactly; fuzzy matching short
/// phrases collides with ordinary speech too often.
pub const MIN_FUZZY_PHRASE_WORDS: usize = 3;

/// Appended to the transcript file stem when writing an extraction record.
pub const EXTRACTION_FILE_SUFFIX: &str = "_story";

pub const ALIGNED_DATASET_FILENAME: &str = "aligned_story.json";
pub const ALIGNMENT_SUMMARY_FILENAME: &str = "alignment_summary.json";
