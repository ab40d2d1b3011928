use std::time::Instant;

use crate::extraction::domain::extraction_result::ExtractionStatus;

/// Cross-cutting logger for batch events.
///
/// Lets each caller observe a run (progress, per-file outcomes, a final
/// report) without the executors knowing where the output goes.
pub trait BatchLogger: Send {
    /// Report file-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how one transcript turned out and how long it took.
    fn outcome(&mut self, source: &str, status: ExtractionStatus, confidence: f64, duration_ms: f64);

    /// Record a transcript that could not be processed.
    fn failure(&mut self, source: &str, error: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullBatchLogger;

impl BatchLogger for NullBatchLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn outcome(&mut self, _: &str, _: ExtractionStatus, _: f64, _: f64) {}
    fn failure(&mut self, _source: &str, _error: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// Counts outcomes and timings, logging through the `log` facade and
/// producing a report when the run ends.
///
/// Progress lines are throttled to every `throttle_files` files.
pub struct TallyBatchLogger {
    throttle_files: usize,
    start_time: Instant,
    total_files: usize,
    extracted: usize,
    low_confidence: usize,
    no_story_start: usize,
    failed: usize,
    confidences: Vec<f64>,
    durations_ms: Vec<f64>,
}

impl TallyBatchLogger {
    pub fn new(throttle_files: usize) -> Self {
        Self {
            throttle_files: throttle_files.max(1),
            start_time: Instant::now(),
            total_files: 0,
            extracted: 0,
            low_confidence: 0,
            no_story_start: 0,
            failed: 0,
            confidences: Vec::new(),
            durations_ms: Vec::new(),
        }
    }

    pub fn extracted(&self) -> usize {
        self.extracted
    }

    pub fn low_confidence(&self) -> usize {
        self.low_confidence
    }

    pub fn no_story_start(&self) -> usize {
        self.no_story_start
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn processed(&self) -> usize {
        self.extracted + self.low_confidence + self.no_story_start + self.failed
    }

    /// Returns the formatted summary, or `None` if nothing was processed.
    pub fn summary_string(&self) -> Option<String> {
        let processed = self.processed();
        if processed == 0 {
            return None;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let total = self.total_files.max(processed);
        let mut lines = vec![
            format!("Batch summary ({processed}/{total} files, {elapsed:.1}s total):"),
            format!("  extracted     : {}", self.extracted),
            format!("  low confidence: {}", self.low_confidence),
            format!("  no story      : {}", self.no_story_start),
            format!("  failed        : {}", self.failed),
        ];

        if let Some(avg) = mean(&self.confidences) {
            lines.push(format!("  confidence: avg {avg:.2}"));
        }
        if let Some(avg) = mean(&self.durations_ms) {
            lines.push(format!("  time per file: avg {avg:.1}ms"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for TallyBatchLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl BatchLogger for TallyBatchLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_files = total;
        if total > 0 && (current % self.throttle_files == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Processing: {current}/{total} files ({pct:.1}%)");
        }
    }

    fn outcome(&mut self, source: &str, status: ExtractionStatus, confidence: f64, duration_ms: f64) {
        match status {
            ExtractionStatus::Extracted => {
                self.extracted += 1;
                log::info!("{source}: story extracted (confidence {confidence:.2})");
            }
            ExtractionStatus::LowConfidence => {
                self.low_confidence += 1;
                log::warn!("{source}: confidence {confidence:.2} below minimum");
            }
            ExtractionStatus::NoStoryStart => {
                self.no_story_start += 1;
                log::warn!("{source}: no story found");
            }
        }
        self.confidences.push(confidence);
        self.durations_ms.push(duration_ms);
    }

    fn failure(&mut self, source: &str, error: &str) {
        self.failed += 1;
        log::error!("{source}: {error}");
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
