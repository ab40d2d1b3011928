use std::path::PathBuf;
use std::sync::Arc;

use crate::pipeline::batch_executor::{report_outcome, BatchExecutor, BatchOutcome};
use crate::pipeline::batch_logger::BatchLogger;
use crate::pipeline::extract_story_use_case::ExtractStoryUseCase;

const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Spreads a batch over a fixed pool of worker threads.
///
/// Layout: `main [feed] → workers [extract] → main [collect/log]`
///
/// Inputs travel to the workers over a bounded channel; results come back
/// tagged with their input position so the returned outcomes keep input
/// order regardless of which worker finished first.
pub struct ThreadedBatchExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedBatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers)
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        use_case: Arc<ExtractStoryUseCase>,
        inputs: &[PathBuf],
        logger: &mut dyn BatchLogger,
    ) -> Vec<BatchOutcome> {
        let total = inputs.len();
        if total == 0 {
            return Vec::new();
        }

        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, PathBuf)>(self.channel_capacity);
        let (done_tx, done_rx) = crossbeam_channel::unbounded::<(usize, BatchOutcome)>();

        let handles: Vec<_> = (0..self.workers.min(total))
            .map(|_| spawn_worker(Arc::clone(&use_case), job_rx.clone(), done_tx.clone()))
            .collect();
        drop(job_rx);
        drop(done_tx);

        let feeder = spawn_feeder(inputs.to_vec(), job_tx);

        let mut slots: Vec<Option<BatchOutcome>> = (0..total).map(|_| None).collect();
        let mut completed = 0;
        for (position, outcome) in done_rx {
            report_outcome(logger, &inputs[position], &outcome);
            completed += 1;
            logger.progress(completed, total);
            slots[position] = Some(outcome);
        }

        if feeder.join().is_err() {
            log::error!("Batch feeder thread panicked");
        }
        for handle in handles {
            if handle.join().is_err() {
                log::error!("Batch worker thread panicked");
            }
        }

        slots
            .into_iter()
            .zip(inputs)
            .map(|(slot, input)| {
                slot.unwrap_or_else(|| {
                    Err(format!("{}: worker stopped before finishing", input.display()).into())
                })
            })
            .collect()
    }
}

fn spawn_feeder(
    inputs: Vec<PathBuf>,
    job_tx: crossbeam_channel::Sender<(usize, PathBuf)>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for job in inputs.into_iter().enumerate() {
            if job_tx.send(job).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker(
    use_case: Arc<ExtractStoryUseCase>,
    job_rx: crossbeam_channel::Receiver<(usize, PathBuf)>,
    done_tx: crossbeam_channel::Sender<(usize, BatchOutcome)>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for (position, path) in job_rx {
            let outcome = use_case.run(&path);
            if done_tx.send((position, outcome)).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::domain::extraction_result::ExtractionStatus;
    use crate::pipeline::batch_executor::test_support::{use_case, RecordingLogger};
    use crate::pipeline::batch_executor::SequentialBatchExecutor;

    fn inputs(n: usize) -> Vec<PathBuf> {
        (0..n)
            .map(|i| match i % 3 {
                0 => PathBuf::from(format!("{i}_story.json")),
                1 => PathBuf::from(format!("{i}_chatter.json")),
                _ => PathBuf::from(format!("{i}_broken.json")),
            })
            .collect()
    }

    #[test]
    fn test_outcomes_keep_input_order() {
        let inputs = inputs(20);
        let mut logger = RecordingLogger::default();

        let outcomes = ThreadedBatchExecutor::new(4).execute(use_case(), &inputs, &mut logger);

        assert_eq!(outcomes.len(), inputs.len());
        for (i, (outcome, input)) in outcomes.iter().zip(&inputs).enumerate() {
            match i % 3 {
                0 => {
                    let report = outcome.as_ref().unwrap();
                    assert_eq!(&report.source, input);
                    assert_eq!(report.result.status, ExtractionStatus::Extracted);
                }
                1 => assert_eq!(
                    outcome.as_ref().unwrap().result.status,
                    ExtractionStatus::NoStoryStart
                ),
                _ => assert!(outcome.is_err()),
            }
        }
    }

    #[test]
    fn test_logger_sees_every_completion() {
        let inputs = inputs(9);
        let mut logger = RecordingLogger::default();

        ThreadedBatchExecutor::new(3).execute(use_case(), &inputs, &mut logger);

        assert_eq!(logger.progress.len(), 9);
        assert_eq!(logger.progress.last(), Some(&(9, 9)));
        assert_eq!(logger.outcomes.len(), 6);
        assert_eq!(logger.failures.len(), 3);
    }

    #[test]
    fn test_matches_sequential_results() {
        let inputs = inputs(7);
        let threaded = ThreadedBatchExecutor::new(2).execute(
            use_case(),
            &inputs,
            &mut RecordingLogger::default(),
        );
        let sequential =
            SequentialBatchExecutor.execute(use_case(), &inputs, &mut RecordingLogger::default());

        for (t, s) in threaded.iter().zip(&sequential) {
            match (t, s) {
                (Ok(t), Ok(s)) => assert_eq!(t.result, s.result),
                (Err(_), Err(_)) => {}
                _ => panic!("threaded and sequential outcomes differ"),
            }
        }
    }

    #[test]
    fn test_more_workers_than_inputs() {
        let inputs = inputs(2);
        let outcomes =
            ThreadedBatchExecutor::new(8).execute(use_case(), &inputs, &mut RecordingLogger::default());
        assert_eq!(outcomes.len(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let outcomes =
            ThreadedBatchExecutor::new(4).execute(use_case(), &[], &mut RecordingLogger::default());
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_zero_workers_clamped_to_one() {
        assert_eq!(ThreadedBatchExecutor::new(0).workers(), 1);
    }
}
