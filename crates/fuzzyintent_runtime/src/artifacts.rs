//! Reading and writing artifact files.
//!
//! The encoding follows the file extension: `.json`, or `.msgpack`/`.mp`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use fuzzyintent_foundation::{Error, Result};
use fuzzyintent_graph::serialize::{examples_from_bytes, examples_to_bytes, graph_from_bytes, graph_to_bytes};
use fuzzyintent_graph::{ExamplesIndex, Format, IntentGraph, TrainedModel};

/// Output locations for a training run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Where to write the intent graph.
    pub intent_graph: Option<PathBuf>,
    /// Where to write the examples index.
    pub examples: Option<PathBuf>,
}

impl ArtifactPaths {
    /// Returns true if no outputs are requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.intent_graph.is_none() && self.examples.is_none()
    }
}

/// Writes the requested artifacts of a trained model.
///
/// Every artifact is encoded and written to a temporary file next to its
/// target first. Targets are replaced only once every write has succeeded,
/// so a failure leaves no artifact behind.
///
/// # Errors
/// Returns a serialization error for an unknown extension or failed encoding,
/// or an I/O error if a file cannot be written.
pub fn save_model(model: &TrainedModel, paths: &ArtifactPaths) -> Result<()> {
    let mut pending = Vec::new();
    if let Some(path) = &paths.intent_graph {
        pending.push((path, graph_to_bytes(&model.graph, Format::from_path(path)?)?));
    }
    if let Some(path) = &paths.examples {
        pending.push((path, examples_to_bytes(&model.examples, Format::from_path(path)?)?));
    }
    let staged = pending
        .into_iter()
        .map(|(path, bytes)| Ok((path, stage(path, &bytes)?, bytes.len())))
        .collect::<Result<Vec<_>>>()?;
    for (path, file, len) in staged {
        persist(file, path)?;
        info!(path = %path.display(), bytes = len, "wrote artifact");
    }
    Ok(())
}

/// Saves an intent graph.
///
/// # Errors
/// Returns a serialization or I/O error.
pub fn save_graph<P: AsRef<Path>>(graph: &IntentGraph, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = graph_to_bytes(graph, Format::from_path(path)?)?;
    write_file(path, &bytes)
}

/// Loads and validates an intent graph.
///
/// # Errors
/// Returns an I/O error, a serialization error, or an invalid artifact error.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<IntentGraph> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    graph_from_bytes(&bytes, Format::from_path(path)?).map_err(|e| e.in_source(path.display().to_string()))
}

/// Saves an examples index.
///
/// # Errors
/// Returns a serialization or I/O error.
pub fn save_examples<P: AsRef<Path>>(index: &ExamplesIndex, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = examples_to_bytes(index, Format::from_path(path)?)?;
    write_file(path, &bytes)
}

/// Loads an examples index.
///
/// # Errors
/// Returns an I/O error or a serialization error.
pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<ExamplesIndex> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    examples_from_bytes(&bytes, Format::from_path(path)?).map_err(|e| e.in_source(path.display().to_string()))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    persist(stage(path, bytes)?, path)
}

/// Writes `bytes` to a temporary file in the directory of `path`.
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io(format!("failed to create file '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| Error::io(format!("failed to write to file '{}': {e}", path.display())))?;
    let file = writer
        .into_inner()
        .map_err(|e| Error::io(format!("failed to flush file '{}': {e}", path.display())))?;
    debug!(path = %path.display(), temp = %file.path().display(), "staged artifact");
    Ok(file)
}

fn persist(file: NamedTempFile, path: &Path) -> Result<()> {
    file.persist(path)
        .map_err(|e| Error::io(format!("failed to replace file '{}': {}", path.display(), e.error)))?;
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;
    Ok(bytes)
}
