//! Training from files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, warn};

use fuzzyintent_foundation::{Error, Result};
use fuzzyintent_grammar::{GrammarBuilder, SlotStore};
use fuzzyintent_graph::{TrainedModel, TrainingConfig, train};

use crate::slots::{load_slot_dirs, load_slot_programs};

/// Input locations for a training run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainingPaths {
    /// Sentence files, or directories searched for `*.ini` files.
    pub sentences: Vec<PathBuf>,
    /// Slot directories.
    pub slot_dirs: Vec<PathBuf>,
    /// Slot program directories.
    pub slot_program_dirs: Vec<PathBuf>,
}

impl TrainingPaths {
    /// Creates paths with the given sentence sources.
    #[must_use]
    pub fn new(sentences: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            sentences: sentences.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Adds a slot directory.
    #[must_use]
    pub fn with_slot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.slot_dirs.push(dir.into());
        self
    }

    /// Adds a slot program directory.
    #[must_use]
    pub fn with_slot_program_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.slot_program_dirs.push(dir.into());
        self
    }
}

/// Expands sentence paths into the list of sentence files.
///
/// Directories contribute their `*.ini` files in name order, without
/// descending into subdirectories.
///
/// # Errors
/// Returns an I/O error if a directory cannot be read.
pub fn sentence_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let entries = fs::read_dir(path)
            .map_err(|e| Error::io(format!("failed to read directory '{}': {e}", path.display())))?;
        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(format!("failed to read directory entry: {e}")))?;
            let file = entry.path();
            if file.is_file() && file.extension().is_some_and(|ext| ext == "ini") {
                found.push(file);
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

/// Reads sentences and slots from disk and trains a model.
///
/// # Errors
/// Returns an I/O error for unreadable inputs, any grammar or slot error, or
/// any training error.
pub fn train_from_paths(paths: &TrainingPaths, config: &TrainingConfig) -> Result<TrainedModel> {
    let _span = info_span!("train_from_paths").entered();

    let files = sentence_files(&paths.sentences)?;
    if files.is_empty() {
        return Err(Error::io("no sentence files given"));
    }

    let mut builder = GrammarBuilder::new();
    for file in &files {
        let text = read_text(file)?;
        builder.add_source(&file.display().to_string(), &text)?;
        debug!(path = %file.display(), "read sentences");
    }
    let grammar = builder.build()?;

    let mut slots = SlotStore::new();
    load_slot_dirs(&paths.slot_dirs, &mut slots)?;
    load_slot_programs(&paths.slot_program_dirs, &grammar, &mut slots)?;

    let model = train(&grammar, &slots, config)?;
    for warning in &model.warnings {
        warn!("{warning}");
    }
    info!(
        intents = model.examples.intent_count(),
        examples = model.examples.len(),
        nodes = model.graph.node_count(),
        "trained"
    );
    Ok(model)
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(format!("failed to read '{}': {e}", path.display())))
}
