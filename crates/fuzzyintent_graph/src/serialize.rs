//! Artifact encoding.
//!
//! Artifacts are written as JSON (portable, human-readable) or `MessagePack`
//! (compact). The format is chosen from the file extension.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use fuzzyintent_foundation::{Error, Result};

use crate::document::{ExamplesDocument, GraphDocument};
use crate::examples::ExamplesIndex;
use crate::graph::IntentGraph;

/// Encoding of an artifact file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// `MessagePack` with named fields.
    MessagePack,
}

impl Format {
    /// Picks a format from a path's extension: `.json`, or `.msgpack`/`.mp`.
    ///
    /// # Errors
    /// Returns a serialization error for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                Error::serialization(format!(
                    "cannot tell artifact format of '{}' (no extension)",
                    path.display()
                ))
            })?
            .parse()
    }

    /// Encodes a value.
    ///
    /// # Errors
    /// Returns a serialization error if encoding fails.
    pub fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>> {
        match self {
            Self::Json => serde_json::to_vec_pretty(value).map_err(|e| Error::serialization(e.to_string())),
            Self::MessagePack => {
                rmp_serde::to_vec_named(value).map_err(|e| Error::serialization(e.to_string()))
            }
        }
    }

    /// Decodes a value.
    ///
    /// # Errors
    /// Returns a serialization error if decoding fails.
    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T> {
        match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| Error::serialization(e.to_string())),
            Self::MessagePack => {
                rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::MessagePack => "msgpack",
        })
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "msgpack" | "mp" => Ok(Self::MessagePack),
            other => Err(Error::serialization(format!("unknown artifact format: {other}"))),
        }
    }
}

/// Encodes an intent graph.
///
/// # Errors
/// Returns a serialization error if encoding fails.
pub fn graph_to_bytes(graph: &IntentGraph, format: Format) -> Result<Vec<u8>> {
    format.encode(&GraphDocument::from(graph))
}

/// Decodes and validates an intent graph.
///
/// # Errors
/// Returns a serialization error for undecodable bytes, or an invalid artifact
/// error for a structurally broken graph.
pub fn graph_from_bytes(bytes: &[u8], format: Format) -> Result<IntentGraph> {
    let doc: GraphDocument = format.decode(bytes)?;
    IntentGraph::try_from(doc)
}

/// Encodes an examples index.
///
/// # Errors
/// Returns a serialization error if encoding fails.
pub fn examples_to_bytes(index: &ExamplesIndex, format: Format) -> Result<Vec<u8>> {
    format.encode(&ExamplesDocument::from(index.clone()))
}

/// Decodes an examples index.
///
/// # Errors
/// Returns a serialization error for undecodable bytes or an unsupported
/// version.
pub fn examples_from_bytes(bytes: &[u8], format: Format) -> Result<ExamplesIndex> {
    let doc: ExamplesDocument = format.decode(bytes)?;
    ExamplesIndex::try_from(doc)
}
