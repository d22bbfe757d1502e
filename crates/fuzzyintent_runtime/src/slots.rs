//! Slot sources backed by the filesystem.
//!
//! A slot directory holds one file per slot; the file's path relative to the
//! directory is the slot name, so `slots/music/artists` provides
//! `$music/artists`. A slot program directory holds executables laid out the
//! same way; a program's standard output lines are its values.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use fuzzyintent_foundation::{Error, ErrorKind, Result};
use fuzzyintent_grammar::{Grammar, SlotSource, SlotStore};

/// Splits slot text into values.
///
/// Blank lines and lines starting with `#` are skipped; values are trimmed.
#[must_use]
pub fn parse_values(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// A slot read from a text file, one value per line.
#[derive(Clone, Debug)]
pub struct SlotFile {
    name: String,
    path: PathBuf,
}

impl SlotFile {
    /// Creates a slot file source.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SlotSource for SlotFile {
    fn slot_name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            Error::io(format!("failed to read slot file '{}': {e}", self.path.display()))
        })?;
        Ok(parse_values(&text))
    }
}

/// A slot whose values are printed by an executable.
#[derive(Clone, Debug)]
pub struct SlotProgram {
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl SlotProgram {
    /// Creates a slot program source.
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds a command-line argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Path of the executable.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl SlotSource for SlotProgram {
    fn slot_name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<String>> {
        debug!(slot = %self.name, program = %self.program.display(), "running slot program");
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| slot_error(&self.name, format!("failed to run '{}': {e}", self.program.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(slot_error(
                &self.name,
                format!("'{}' exited with {}: {}", self.program.display(), output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| slot_error(&self.name, format!("output is not UTF-8: {e}")))?;
        Ok(parse_values(&stdout))
    }
}

fn slot_error(slot: &str, message: String) -> Error {
    Error::new(ErrorKind::SlotSource {
        slot: slot.to_string(),
        message,
    })
}

/// Lists the files under `dir` as `(slot name, path)` pairs, sorted by name.
///
/// Hidden files and directories are skipped.
///
/// # Errors
/// Returns an I/O error if the directory cannot be read.
pub fn discover(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|e| {
            Error::io(format!("failed to read directory '{}': {e}", current.display()))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(format!("failed to read directory entry: {e}")))?;
            let path = entry.path();
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            if path.is_dir() {
                pending.push(path);
            } else if let Some(name) = slot_name(dir, &path) {
                found.push((name, path));
            }
        }
    }

    found.sort();
    Ok(found)
}

fn slot_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Loads every file under the given directories into a store.
///
/// A slot found in a later directory replaces one of the same name found
/// earlier.
///
/// # Errors
/// Returns an I/O error for unreadable files, or a syntax error for a
/// malformed value.
pub fn load_slot_dirs(dirs: &[PathBuf], store: &mut SlotStore) -> Result<()> {
    for dir in dirs {
        for (name, path) in discover(dir)? {
            store.load(&SlotFile::new(name, path))?;
        }
    }
    Ok(())
}

/// Runs the slot programs the grammar needs.
///
/// Only programs for slots that are referenced, directly or through other
/// slot values, and not already in the store are run. Programs are found by
/// slot name under the given directories; the first directory wins.
///
/// # Errors
/// Returns a slot source error if a program fails.
pub fn load_slot_programs(dirs: &[PathBuf], grammar: &Grammar, store: &mut SlotStore) -> Result<()> {
    let mut programs = Vec::new();
    for dir in dirs {
        for (name, path) in discover(dir)? {
            if !programs.iter().any(|(existing, _)| *existing == name) {
                programs.push((name, path));
            }
        }
    }
    if programs.is_empty() {
        return Ok(());
    }

    loop {
        let wanted = referenced_slots(grammar, store);
        let next = programs
            .iter()
            .find(|(name, _)| wanted.contains(name) && !store.contains(name));
        let Some((name, path)) = next else {
            break;
        };
        store.load(&SlotProgram::new(name.clone(), path.clone()))?;
    }

    for name in referenced_slots(grammar, store) {
        if !store.contains(&name) {
            warn!(slot = %name, "no slot file or program found");
        }
    }
    Ok(())
}

/// Names of every slot referenced by the grammar or by loaded slot values.
#[must_use]
pub fn referenced_slots(grammar: &Grammar, store: &SlotStore) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for intent in grammar.intents() {
        names.extend(intent.slot_refs().into_iter().map(String::from));
    }
    for rule in grammar.rules() {
        names.extend(rule.body.slot_refs().into_iter().map(String::from));
    }
    for slot in store.names() {
        for value in store.get(slot).unwrap_or_default() {
            names.extend(value.body.slot_refs().into_iter().map(String::from));
        }
    }
    names
}
