use std::{
    fmt::Write as _,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use sherlock_nlp::{
    AnswerKey, AnswerReport, BatchAnswerController, CoreNlpClient, EngineConfig, Evaluation,
    Manifest, NlpTelemetry, Sherlock, Story,
};
use shared_logging::LogLevel;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(
    name = "sherlock",
    version,
    about = "Answers reading-comprehension questions about news stories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answers every question of the stories listed in a manifest.
    Answer {
        manifest: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
        /// Answer file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Answers the manifest and scores the answers against the gold `.answers` files.
    Evaluate {
        manifest: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
        /// Also write the produced answers here.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print mean scores as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Sorts the story ids of a manifest in place.
    Alphabetize { manifest: PathBuf },
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Engine TOML configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// CoreNLP server URL, overriding the configuration.
    #[arg(long)]
    corenlp_url: Option<String>,
    /// Stop-word list, overriding the configuration.
    #[arg(long)]
    stop_words: Option<PathBuf>,
    /// JSON-lines log file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Include debug records in the log file.
    #[arg(long)]
    verbose: bool,
    /// Stories answered concurrently.
    #[arg(long, default_value_t = 4)]
    jobs: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Answer {
            manifest,
            engine,
            output,
        } => {
            let answered = answer_manifest(&manifest, &engine)?;
            write_report(&answered, output.as_deref())
        }
        Commands::Evaluate {
            manifest,
            engine,
            output,
            json,
        } => {
            let answered = answer_manifest(&manifest, &engine)?;
            if let Some(path) = output.as_deref() {
                write_report(&answered, Some(path))?;
            }
            let mut evaluation = Evaluation::new();
            for (story, key) in &answered {
                evaluation.add_story(story, key);
            }
            if json {
                let summary = json!({
                    "scored": evaluation.scored(),
                    "unanswered": evaluation.unanswered(),
                    "mean": evaluation.mean(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{evaluation}");
            }
            Ok(())
        }
        Commands::Alphabetize { manifest } => {
            let mut loaded = Manifest::load(&manifest)?;
            loaded.alphabetize();
            loaded.save()?;
            println!(
                "sorted {} story ids in {}",
                loaded.story_ids.len(),
                manifest.display()
            );
            Ok(())
        }
    }
}

fn answer_manifest(path: &Path, args: &EngineArgs) -> Result<Vec<(Story, AnswerKey)>> {
    let manifest = Manifest::load(path)?;
    let loader = manifest.loader();
    let mut stories = Vec::with_capacity(manifest.story_ids.len());
    for id in &manifest.story_ids {
        match loader.load(id) {
            Ok(story) => stories.push(story),
            Err(err) => eprintln!("skipping story {id}: {err:#}"),
        }
    }

    let config = engine_config(args)?;
    let telemetry = match &args.log_file {
        Some(log_path) => {
            let min_level = if args.verbose {
                LogLevel::Debug
            } else {
                LogLevel::Info
            };
            Some(
                NlpTelemetry::builder("sherlock")
                    .log_path(log_path)
                    .min_level(min_level)
                    .build()?,
            )
        }
        None => None,
    };
    let annotator = CoreNlpClient::new(&config.annotator)
        .with_context(|| format!("connecting to {}", config.annotator.url))?;
    let engine = Arc::new(Sherlock::new(&config, Arc::new(annotator), telemetry.clone())?);
    let controller = BatchAnswerController::new(engine, telemetry);
    let runtime = Runtime::new()?;

    let mut answered = Vec::with_capacity(stories.len());
    for chunk in stories.chunks(args.jobs.max(1)) {
        let outcomes = runtime.block_on(controller.process_batch(chunk.to_vec()))?;
        for (story, outcome) in chunk.iter().zip(outcomes) {
            match outcome.result {
                Ok(key) => answered.push((story.clone(), key)),
                Err(err) => eprintln!(
                    "skipping story {} ({}): {err}",
                    outcome.story_id, outcome.correlation_id
                ),
            }
        }
    }
    Ok(answered)
}

fn engine_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(url) = &args.corenlp_url {
        config.annotator.url.clone_from(url);
    }
    if let Some(stop_words) = &args.stop_words {
        config.stop_words = Some(stop_words.clone());
    }
    Ok(config)
}

fn write_report(answered: &[(Story, AnswerKey)], output: Option<&Path>) -> Result<()> {
    let mut report = String::new();
    for (_, key) in answered {
        write!(report, "{}", AnswerReport::new(key))?;
    }
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, report).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            io::stdout().write_all(report.as_bytes())?;
            Ok(())
        }
    }
}
