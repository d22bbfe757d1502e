//! Command-line interface.
//!
//! ```text
//! fuzzyintent train --sentences sentences.ini --slots slots --examples examples.json
//! fuzzyintent recognize --examples examples.json "turn on the living room lamp"
//! ```

use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use fuzzyintent_foundation::{Error, Result, WordCasing};
use fuzzyintent_grammar::CyclePolicy;
use fuzzyintent_graph::serialize::examples_to_bytes;
use fuzzyintent_graph::{Format, Strictness, TrainingConfig};
use fuzzyintent_recognizer::{Metric, Recognizer, RecognizerConfig};

use crate::artifacts::{ArtifactPaths, load_examples, load_graph, save_model};
use crate::training::{TrainingPaths, train_from_paths};

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "fuzzyintent", version, about = "Train and run a fuzzy intent recognizer")]
pub struct Cli {
    /// Print DEBUG messages to the console
    #[arg(long, global = true)]
    pub debug: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an intent graph and examples from sentence templates
    Train(TrainArgs),
    /// Recognize intents from text
    Recognize(RecognizeArgs),
}

/// Word normalization shared by training and recognition.
#[derive(Debug, Args)]
pub struct TextArgs {
    /// Case transformation applied to words (ignore, lower, upper)
    #[arg(long, default_value_t = WordCasing::Ignore)]
    pub word_casing: WordCasing,

    /// Keep numbers as digits instead of spelling them out
    #[arg(long)]
    pub no_replace_numbers: bool,
}

/// Arguments to `train`.
#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Sentence file or directory of .ini files (repeatable)
    #[arg(short, long, required = true)]
    pub sentences: Vec<PathBuf>,

    /// Directory of slot files (repeatable)
    #[arg(long)]
    pub slots: Vec<PathBuf>,

    /// Directory of slot programs (repeatable)
    #[arg(long)]
    pub slot_programs: Vec<PathBuf>,

    /// Path to write the intent graph (.json or .msgpack)
    #[arg(short = 'g', long)]
    pub intent_graph: Option<PathBuf>,

    /// Path to write the examples (.json or .msgpack); printed as JSON when no output is given
    #[arg(short, long)]
    pub examples: Option<PathBuf>,

    /// Word casing and number replacement
    #[command(flatten)]
    pub text: TextArgs,

    /// Fail on intents without examples
    #[arg(long)]
    pub strict: bool,

    /// Drop intents with cyclic references instead of failing
    #[arg(long)]
    pub skip_cyclic: bool,

    /// Fail when more than this many examples would be produced
    #[arg(long)]
    pub max_examples: Option<usize>,
}

impl TrainArgs {
    /// Training configuration selected by these arguments.
    #[must_use]
    pub fn config(&self) -> TrainingConfig {
        let mut config = TrainingConfig::new()
            .with_casing(self.text.word_casing)
            .with_replace_numbers(!self.text.no_replace_numbers);
        if self.strict {
            config = config.with_empty_intents(Strictness::Strict);
        }
        if self.skip_cyclic {
            config = config.with_cycle_policy(CyclePolicy::SkipIntent);
        }
        if let Some(limit) = self.max_examples {
            config = config.with_max_examples(limit);
        }
        config
    }
}

/// Arguments to `recognize`.
#[derive(Debug, Args)]
pub struct RecognizeArgs {
    /// Path to the examples (.json or .msgpack)
    #[arg(short, long, required_unless_present = "intent_graph", conflicts_with = "intent_graph")]
    pub examples: Option<PathBuf>,

    /// Path to an intent graph, used when no examples are given
    #[arg(short = 'g', long)]
    pub intent_graph: Option<PathBuf>,

    /// Word casing and number replacement
    #[command(flatten)]
    pub text: TextArgs,

    /// Minimum confidence for a match
    #[arg(long, default_value_t = 0.5)]
    pub threshold: f64,

    /// Word similarity measure (levenshtein, jaro-winkler, exact)
    #[arg(long, default_value_t = Metric::Levenshtein)]
    pub metric: Metric,

    /// Only consider this intent (repeatable)
    #[arg(long = "intent")]
    pub intents: Vec<String>,

    /// Scan at most this many examples
    #[arg(long)]
    pub max_candidates: Option<usize>,

    /// Queries to recognize; lines are read from standard input when omitted
    pub queries: Vec<String>,
}

impl RecognizeArgs {
    /// Recognizer configuration selected by these arguments.
    #[must_use]
    pub fn config(&self) -> RecognizerConfig {
        let config = RecognizerConfig::new()
            .with_threshold(self.threshold)
            .with_metric(self.metric)
            .with_casing(self.text.word_casing)
            .with_replace_numbers(!self.text.no_replace_numbers);
        match self.max_candidates {
            Some(max) => config.with_max_candidates(max),
            None => config,
        }
    }
}

/// Runs a parsed command line.
///
/// Queries are read from `input` when none are given; results go to
/// `output`, one JSON object per line.
///
/// # Errors
/// Returns any training, artifact, or I/O error.
pub fn run(cli: Cli, input: impl BufRead, mut output: impl Write) -> Result<()> {
    match cli.command {
        Command::Train(args) => train(&args, &mut output),
        Command::Recognize(args) => recognize(&args, input, &mut output),
    }
}

fn train(args: &TrainArgs, output: &mut impl Write) -> Result<()> {
    let paths = TrainingPaths {
        sentences: args.sentences.clone(),
        slot_dirs: args.slots.clone(),
        slot_program_dirs: args.slot_programs.clone(),
    };
    let model = train_from_paths(&paths, &args.config())?;

    let artifacts = ArtifactPaths {
        intent_graph: args.intent_graph.clone(),
        examples: args.examples.clone(),
    };
    if artifacts.is_empty() {
        let bytes = examples_to_bytes(&model.examples, Format::Json)?;
        output.write_all(&bytes).map_err(write_error)?;
        writeln!(output).map_err(write_error)?;
        return Ok(());
    }
    save_model(&model, &artifacts)
}

fn recognize(args: &RecognizeArgs, input: impl BufRead, output: &mut impl Write) -> Result<()> {
    let recognizer = match (&args.examples, &args.intent_graph) {
        (Some(path), _) => Recognizer::new(&load_examples(path)?, args.config()),
        (None, Some(path)) => Recognizer::from_graph(&load_graph(path)?, args.config()),
        (None, None) => return Err(Error::io("either --examples or --intent-graph is required")),
    };
    debug!(candidates = recognizer.candidate_count(), "loaded recognizer");

    let allowed: BTreeSet<&str> = args.intents.iter().map(String::as_str).collect();
    let mut answer = |query: &str| -> Result<()> {
        let outcome = if allowed.is_empty() {
            recognizer.recognize(query)
        } else {
            recognizer.recognize_filtered(query, |intent| allowed.contains(intent))
        };
        let line = serde_json::to_string(&outcome).map_err(|e| Error::serialization(e.to_string()))?;
        writeln!(output, "{line}").map_err(write_error)
    };

    if args.queries.is_empty() {
        for line in input.lines() {
            let line = line.map_err(|e| Error::io(format!("failed to read standard input: {e}")))?;
            answer(line.trim())?;
        }
    } else {
        for query in &args.queries {
            answer(query)?;
        }
    }
    Ok(())
}

fn write_error(e: std::io::Error) -> Error {
    Error::io(format!("failed to write output: {e}"))
}
