mod settings;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use storyscan_core::alignment::infrastructure::json_alignment_writer::JsonAlignmentWriter;
use storyscan_core::extraction::domain::confidence_band::ConfidenceBands;
use storyscan_core::extraction::domain::extraction_result::ExtractionResult;
use storyscan_core::extraction::infrastructure::json_extraction_store::{
    read_extraction, JsonExtractionWriter,
};
use storyscan_core::pipeline::align_stories_use_case::AlignStoriesUseCase;
use storyscan_core::pipeline::batch_executor::{BatchExecutor, SequentialBatchExecutor};
use storyscan_core::pipeline::batch_logger::{BatchLogger, TallyBatchLogger};
use storyscan_core::pipeline::extract_story_use_case::ExtractStoryUseCase;
use storyscan_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use storyscan_core::story::domain::comma_story::comma_gets_a_cure;
use storyscan_core::story::domain::reference_story::ReferenceStory;
use storyscan_core::story::infrastructure::json_story_loader::JsonStoryLoader;
use storyscan_core::transcript::infrastructure::whisper_json_reader::WhisperJsonReader;

use settings::Settings;

/// Finds a known reference story in speech transcripts and extracts it.
#[derive(Parser)]
#[command(name = "storyscan", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the story from Whisper-style JSON transcripts.
    Extract(ExtractArgs),
    /// Align extracted stories sentence by sentence across speakers.
    Align(AlignArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Transcript files to scan.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the extracted story records.
    #[arg(short, long, default_value = "stories")]
    output: PathBuf,

    /// Story JSON file to search for (default: the built-in story).
    #[arg(long)]
    story: Option<PathBuf>,

    /// Settings file to use instead of the user settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum anchor similarity for a story boundary (0.0-1.0).
    #[arg(long)]
    threshold: Option<f64>,

    /// Minimum confidence for accepting a story (0.0-1.0).
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Worker threads (1 = sequential, 0 = all cores).
    #[arg(long)]
    workers: Option<usize>,

    /// Also write records for transcripts where no story was accepted.
    #[arg(long)]
    keep_rejected: bool,
}

#[derive(Args)]
struct AlignArgs {
    /// Extracted story records (`*_story.json`).
    #[arg(required = true)]
    extractions: Vec<PathBuf>,

    /// Directory for the aligned dataset and summary.
    #[arg(short, long, default_value = "aligned_story")]
    output: PathBuf,

    /// Story JSON file the records were extracted with.
    #[arg(long)]
    story: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Command::Extract(args) => {
            validate_extract(&args)?;
            run_extract(args)
        }
        Command::Align(args) => {
            validate_align(&args)?;
            run_align(args)
        }
    }
}

fn run_extract(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    apply_overrides(&mut settings, &args);

    let story = Arc::new(load_story(settings.story.as_deref())?);
    let bands = settings.extraction.bands;

    let use_case = ExtractStoryUseCase::new(
        Box::new(WhisperJsonReader::new()),
        Box::new(JsonExtractionWriter::new()),
        Arc::clone(&story),
        settings.extraction,
        args.output.clone(),
        args.keep_rejected,
    )?;

    for (destination, sources) in use_case.output_collisions(&args.inputs) {
        let sources: Vec<String> = sources.iter().map(|s| s.display().to_string()).collect();
        log::warn!(
            "{} inputs write to {}, only one record will survive: {}",
            sources.len(),
            destination.display(),
            sources.join(", ")
        );
    }

    let executor = build_executor(settings.workers);
    let mut logger = TallyBatchLogger::default();
    logger.info(&format!(
        "Scanning {} transcripts for '{}'",
        args.inputs.len(),
        story.name()
    ));

    let outcomes = executor.execute(Arc::new(use_case), &args.inputs, &mut logger);
    logger.summary();

    for report in outcomes.iter().flatten() {
        report_extraction(&report.result, &bands, report.written.as_deref());
    }

    if outcomes.iter().all(|o| o.is_err()) {
        return Err("No transcript could be processed".into());
    }
    Ok(())
}

fn run_align(args: AlignArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load();
    let story_path = args.story.as_deref().or(settings.story.as_deref());
    let story = Arc::new(load_story(story_path)?);

    let results: Vec<ExtractionResult> = args
        .extractions
        .iter()
        .filter_map(|path| match read_extraction(path) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!("Skipping {e}");
                None
            }
        })
        .collect();
    if results.is_empty() {
        return Err("None of the extraction records could be read".into());
    }

    let use_case = AlignStoriesUseCase::new(story, Box::new(JsonAlignmentWriter::new()));
    let report = use_case
        .run(&results, &args.output)
        .map_err(|e| e.to_string())?;

    log::info!("Saved aligned dataset to {}", report.output.dataset_path.display());
    log::info!("Saved alignment summary to {}", report.output.summary_path.display());

    let summary = &report.summary;
    println!("Alignment summary:");
    println!("  Total speakers: {}", summary.total_speakers);
    println!("  Total sentences: {}", summary.total_sentences);
    println!("\nSentence coverage:");
    for s in &summary.sentence_coverage {
        println!(
            "  Sentence {}: {:.1}% ({}/{} speakers)",
            s.sentence_index,
            s.coverage * 100.0,
            s.speakers_count,
            summary.total_speakers
        );
    }
    println!("\nSpeaker coverage:");
    for s in &summary.speaker_coverage {
        println!(
            "  {}: {:.1}% ({} missing)",
            s.speaker_id,
            s.coverage * 100.0,
            s.missing_sentences
        );
    }
    Ok(())
}

fn apply_overrides(settings: &mut Settings, args: &ExtractArgs) {
    if let Some(story) = &args.story {
        settings.story = Some(story.clone());
    }
    if let Some(threshold) = args.threshold {
        settings.extraction.acceptance_threshold = threshold;
    }
    if let Some(min_confidence) = args.min_confidence {
        settings.extraction.min_confidence = min_confidence;
    }
    if let Some(workers) = args.workers {
        settings.workers = workers;
    }
}

fn load_story(path: Option<&Path>) -> Result<ReferenceStory, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(JsonStoryLoader::load(path)?),
        None => Ok(comma_gets_a_cure()?),
    }
}

fn build_executor(workers: usize) -> Box<dyn BatchExecutor> {
    match workers {
        0 => Box::new(ThreadedBatchExecutor::default()),
        1 => Box::new(SequentialBatchExecutor),
        n => Box::new(ThreadedBatchExecutor::new(n)),
    }
}

fn report_extraction(result: &ExtractionResult, bands: &ConfidenceBands, written: Option<&Path>) {
    let band = bands.classify(result.confidence);
    match (result.start_segment, result.end_segment) {
        (Some(start), Some(end)) => {
            let defaulted = if result.end_boundary_defaulted {
                ", end assumed"
            } else {
                ""
            };
            log::info!(
                "{}: segments {start}-{end} of {}, {band} confidence ({:.2}{defaulted})",
                result.source_id,
                result.total_segments,
                result.confidence
            );
        }
        _ => log::info!(
            "{}: no story ({band} confidence {:.2})",
            result.source_id,
            result.confidence
        ),
    }
    if let Some(path) = written {
        log::info!("  written to {}", path.display());
    }
}

fn validate_extract(args: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(missing) = args.inputs.iter().find(|p| !p.exists()) {
        return Err(format!("Input file not found: {}", missing.display()).into());
    }
    if let Some(story) = &args.story {
        if !story.exists() {
            return Err(format!("Story file not found: {}", story.display()).into());
        }
    }
    if let Some(t) = args.threshold {
        if !(0.0..=1.0).contains(&t) {
            return Err(format!("Threshold must be between 0.0 and 1.0, got {t}").into());
        }
    }
    if let Some(c) = args.min_confidence {
        if !(0.0..=1.0).contains(&c) {
            return Err(format!("Minimum confidence must be between 0.0 and 1.0, got {c}").into());
        }
    }
    Ok(())
}

fn validate_align(args: &AlignArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(missing) = args.extractions.iter().find(|p| !p.exists()) {
        return Err(format!("Extraction record not found: {}", missing.display()).into());
    }
    if let Some(story) = &args.story {
        if !story.exists() {
            return Err(format!("Story file not found: {}", story.display()).into());
        }
    }
    Ok(())
}
