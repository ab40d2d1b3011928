use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::batch_logger::BatchLogger;
use super::extract_story_use_case::{ExtractStoryUseCase, ExtractionReport};

pub type BatchError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of one input of a batch.
pub type BatchOutcome = Result<ExtractionReport, BatchError>;

/// Abstracts how the extraction use case is run over many transcripts.
///
/// This is a port (application-layer interface). Implementations return one
/// outcome per input, in input order, and report each completion to the
/// logger from the calling thread. One failing input never stops the batch.
pub trait BatchExecutor: Send + Sync {
    fn execute(
        &self,
        use_case: Arc<ExtractStoryUseCase>,
        inputs: &[PathBuf],
        logger: &mut dyn BatchLogger,
    ) -> Vec<BatchOutcome>;
}

/// Runs every input on the calling thread, one after another.
pub struct SequentialBatchExecutor;

impl BatchExecutor for SequentialBatchExecutor {
    fn execute(
        &self,
        use_case: Arc<ExtractStoryUseCase>,
        inputs: &[PathBuf],
        logger: &mut dyn BatchLogger,
    ) -> Vec<BatchOutcome> {
        let total = inputs.len();
        inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let outcome = use_case.run(input);
                report_outcome(logger, input, &outcome);
                logger.progress(i + 1, total);
                outcome
            })
            .collect()
    }
}

/// Forwards one finished input to the logger.
pub fn report_outcome(logger: &mut dyn BatchLogger, input: &Path, outcome: &BatchOutcome) {
    let source = input.display().to_string();
    match outcome {
        Ok(report) => logger.outcome(
            &source,
            report.result.status,
            report.result.confidence,
            report.duration_ms,
        ),
        Err(e) => logger.failure(&source, &e.to_string()),
    }
}
