//! CLI for the disaster tweet classification pipeline
//!
//! Usage:
//! ```bash
//! cargo run -- run --train train.csv --test test.csv --output-dir predictions
//! cargo run -- features --text "BREAKING: wildfire spreads near http://x.co"
//! cargo run -- vocab --train train.csv --test test.csv --top 20
//! cargo run -- summary --train train.csv --test test.csv
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use disaster_tweets::data::DataLoader;
use disaster_tweets::features::FeatureEngine;
use disaster_tweets::models::ForestConfig;
use disaster_tweets::nlp::VocabularyBuilder;
use disaster_tweets::pipeline::{self, PipelineConfig};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "disaster_tweets")]
#[command(version = "0.1.0")]
#[command(about = "Disaster tweet classification pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write prediction files
    Run {
        /// Train partition CSV (id,keyword,location,text,target)
        #[arg(long)]
        train: PathBuf,

        /// Test partition CSV (id,keyword,location,text)
        #[arg(long)]
        test: PathBuf,

        /// Directory for the prediction files
        #[arg(long, default_value = "predictions")]
        output_dir: PathBuf,

        /// Holdout fraction of the train partition
        #[arg(long, default_value = "0.2")]
        holdout: f64,

        /// Seed for the holdout split and the forest
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Trees in the random forest
        #[arg(long, default_value = "200")]
        trees: usize,

        /// Keep the fixed 0.5 threshold instead of tuning on the holdout
        #[arg(long)]
        no_tune: bool,
    },

    /// Derive and print the scalar features of one text
    Features {
        /// Text to analyze
        #[arg(short, long)]
        text: String,
    },

    /// Build the vocabulary over both partitions and report it
    Vocab {
        #[arg(long)]
        train: PathBuf,

        #[arg(long)]
        test: PathBuf,

        /// Terms to list, ranked by document frequency
        #[arg(long, default_value = "20")]
        top: usize,

        /// Save the frozen vocabulary as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Dataset statistics
    Summary {
        #[arg(long)]
        train: PathBuf,

        #[arg(long)]
        test: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            train,
            test,
            output_dir,
            holdout,
            seed,
            trees,
            no_tune,
        } => run_pipeline(train, test, output_dir, holdout, seed, trees, no_tune),
        Commands::Features { text } => run_features(&text),
        Commands::Vocab {
            train,
            test,
            top,
            output,
        } => run_vocab(train, test, top, output),
        Commands::Summary { train, test } => run_summary(train, test),
    }
}

fn run_pipeline(
    train: PathBuf,
    test: PathBuf,
    output_dir: PathBuf,
    holdout: f64,
    seed: u64,
    trees: usize,
    no_tune: bool,
) -> Result<()> {
    let config = PipelineConfig {
        holdout_ratio: holdout,
        seed,
        tune_threshold: !no_tune,
        forest: ForestConfig {
            n_trees: trees,
            seed,
            ..Default::default()
        },
    };

    let summary = pipeline::run(&train, &test, &output_dir, &config)?;

    println!("\nPipeline complete");
    println!("=================");
    println!("Train rows:      {}", summary.n_train);
    println!("Test rows:       {}", summary.n_test);
    println!("Vocabulary size: {}", summary.vocabulary_size);
    println!("Threshold:       {:.2}", summary.threshold);

    if !summary.holdout.is_empty() {
        println!("\nHoldout metrics:");
        for report in &summary.holdout {
            println!(
                "  {:14} accuracy {:.4}  precision {:.4}  recall {:.4}  f1 {:.4}",
                report.name, report.accuracy, report.precision, report.recall, report.f1
            );
        }
    }

    println!("\nPrediction files:");
    for path in &summary.outputs {
        println!("  {}", path.display());
    }

    Ok(())
}

fn run_features(text: &str) -> Result<()> {
    let engine = FeatureEngine::new();
    let row = engine.derive(text);
    let f = &row.features;

    println!("Text: {text}");
    println!("Normalized: {}", row.normalized_text);
    println!();
    println!("  url_count:     {}", f.url_count);
    println!("  punct_count:   {}", f.punct_count);
    println!("  handles_count: {}", f.handles_count);
    println!("  hashtag_count: {}", f.hashtag_count);
    println!("  char_count:    {}", f.char_count);
    println!("  capital_count: {}", f.capital_count);
    println!("  capital_prop:  {:.4}", f.capital_prop);
    println!("  number_count:  {}", f.number_count);
    println!("  tone:          {:.4}", f.tone);
    println!("  word_count:    {}", f.word_count);

    Ok(())
}

fn run_vocab(train: PathBuf, test: PathBuf, top: usize, output: Option<PathBuf>) -> Result<()> {
    let train = DataLoader::load_train(&train)?;
    let test = DataLoader::load_test(&test)?;

    let engine = FeatureEngine::new();
    let derived_train = engine.derive_all(&train);
    let derived_test = engine.derive_all(&test);
    let corpus: Vec<String> = derived_train
        .iter()
        .chain(derived_test.iter())
        .map(|d| d.normalized_text.clone())
        .collect();

    let vocabulary = VocabularyBuilder::new()
        .build(&corpus)
        .context("building vocabulary")?;

    println!("Documents: {}", vocabulary.n_documents());
    println!("Terms:     {}", vocabulary.len());
    println!("\nTop terms by document frequency:");
    for (term, doc_count) in vocabulary.top_terms(top) {
        println!("  {:20} {}", term, doc_count);
    }

    if let Some(path) = output {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating {:?}", path))?;
        serde_json::to_writer_pretty(file, &vocabulary).context("serializing vocabulary")?;
        println!("\nSaved vocabulary to {}", path.display());
    }

    Ok(())
}

fn run_summary(train: PathBuf, test: PathBuf) -> Result<()> {
    let train = DataLoader::load_train(&train)?;
    let test = DataLoader::load_test(&test)?;

    let summary = pipeline::summarize(&train, &test);

    println!("Dataset summary");
    println!("===============");
    println!("Train rows:       {}", summary.n_train);
    println!("Test rows:        {}", summary.n_test);
    println!(
        "Class balance:    {} disaster / {} other",
        summary.positive, summary.negative
    );
    println!("Empty texts:      {}", summary.empty_texts);
    println!("Mean char count:  {:.1}", summary.mean_char_count);

    Ok(())
}
