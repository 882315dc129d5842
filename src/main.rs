use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use transcript_refiner::{
    AppConfig, HumanReport, LocalPipeline, RefineMode, Refiner, SidecarTranscriber, Transcriber,
    load_document, load_transcript,
};

#[derive(Parser)]
#[command(name = "transcript-refiner")]
#[command(author, version, about = "Interview transcript cleanup and analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a transcript, analyze it and score it against a résumé and job
    Process {
        /// Transcript file (transcription JSON or plain text)
        #[arg(short, long, required_unless_present = "audio", conflicts_with = "audio")]
        input: Option<PathBuf>,

        /// Audio file whose `<audio>.transcript.json` sidecar holds the transcript
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Résumé text file
        #[arg(long)]
        cv: Option<PathBuf>,

        /// Job description text file
        #[arg(long)]
        job: Option<PathBuf>,

        /// Refinement backend: local, ollama or huggingface (overrides REFINE_MODE)
        #[arg(short, long)]
        mode: Option<RefineMode>,

        /// Transcript language code (overrides TRANSCRIBE_LANGUAGE)
        #[arg(short, long)]
        language: Option<String>,

        /// Output file for the JSON report
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a human-readable report (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the local rule pipeline and print every stage
    Analyze {
        /// Transcript file (transcription JSON or plain text)
        #[arg(short, long)]
        input: PathBuf,

        /// Language code selecting the rule tables
        #[arg(short, long)]
        language: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify an interview question
    Question {
        /// The question text
        text: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            audio,
            cv,
            job,
            mode,
            language,
            output,
            human_readable,
            verbose,
        } => {
            setup_logging(verbose);
            let mut config = AppConfig::from_env().context("Invalid configuration")?;
            if let Some(mode) = mode {
                config.refine_mode = mode;
            }
            if let Some(language) = language {
                config.language = language;
            }
            let sources = Sources { input, audio, cv, job };
            process_transcript(config, sources, output, human_readable).await
        }
        Commands::Analyze {
            input,
            language,
            verbose,
        } => {
            setup_logging(verbose);
            let mut config = AppConfig::from_env().context("Invalid configuration")?;
            if let Some(language) = language {
                config.language = language;
            }
            analyze_transcript(&config, input)
        }
        Commands::Question { text, verbose } => {
            setup_logging(verbose);
            let config = AppConfig::from_env().context("Invalid configuration")?;
            classify_question(config, &text).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Input files for one `process` run
struct Sources {
    input: Option<PathBuf>,
    audio: Option<PathBuf>,
    cv: Option<PathBuf>,
    job: Option<PathBuf>,
}

async fn process_transcript(
    config: AppConfig,
    sources: Sources,
    output: PathBuf,
    human_readable: Option<PathBuf>,
) -> Result<()> {
    let transcript = match (&sources.input, &sources.audio) {
        (_, Some(audio)) => {
            info!("Loading transcript for audio {:?}", audio);
            SidecarTranscriber
                .transcribe(audio, Some(&config.language))
                .context("Failed to transcribe audio")?
        }
        (Some(input), None) => {
            info!("Loading transcript from {:?}", input);
            load_transcript(input).context("Failed to load input transcript")?
        }
        (None, None) => anyhow::bail!("Either --input or --audio is required"),
    };
    info!(
        "Loaded {} chars, {} segments, {:.1}s",
        transcript.raw_text.len(),
        transcript.segments.len(),
        transcript.duration()
    );

    let cv_text = sources.cv.as_deref().map(load_document).transpose()?;
    let job_text = sources.job.as_deref().map(load_document).transpose()?;

    let refiner = Refiner::new(config).context("Failed to set up backends")?;
    let report = refiner
        .process(&transcript, cv_text.as_deref(), job_text.as_deref())
        .await;

    report.write_json(&output)?;
    info!("Report written to {:?}", output);

    if let Some(human_path) = human_readable {
        HumanReport::new(&report).write_file(&human_path)?;
        info!("Human-readable report written to {:?}", human_path);
    }

    match report.compatibility_score {
        Some(score) => info!(
            "Complete in {}ms via {}: compatibility {:.2}%",
            report.processing_time_ms,
            report.refinement_method.as_str(),
            score
        ),
        None => info!(
            "Complete in {}ms via {}",
            report.processing_time_ms,
            report.refinement_method.as_str()
        ),
    }

    Ok(())
}

fn analyze_transcript(config: &AppConfig, input: PathBuf) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let transcript = load_transcript(&input).context("Failed to load input transcript")?;
    let pipeline = LocalPipeline::new(config.language());
    let trace = pipeline.trace(&transcript.raw_text);

    println!("Transcript Analysis ({})", pipeline.language().code());
    println!("==================");
    println!("Characters: {}", transcript.raw_text.chars().count());
    println!("Segments: {}", transcript.segments.len());
    println!("Duration: {:.1}s", transcript.duration());
    println!();

    let stages = [
        ("Stage 0: normalize", &trace.normalized),
        ("Stage 1: denoise", &trace.denoised),
        ("Stage 2: structure", &trace.structured),
        ("Stage 3: lexical", &trace.corrected),
        ("Stage 4: coherence", &trace.coherent),
        ("Stage 5: rephrase", &trace.rephrased),
    ];
    for (title, text) in stages {
        println!("{}", title);
        println!("{}", "-".repeat(title.chars().count()));
        println!("{}", text);
        println!();
    }

    println!("Final: {}", pipeline.refine(&transcript.raw_text));
    Ok(())
}

async fn classify_question(config: AppConfig, question: &str) -> Result<()> {
    let refiner = Refiner::new(config).context("Failed to set up backends")?;
    let analysis = refiner.classify_question(question).await;

    println!("Type: {} ({:.2})", analysis.question_type, analysis.confidence);
    for (label, score) in &analysis.all_scores {
        println!("  {}: {:.2}", label, score);
    }
    Ok(())
}
