//! Translation-unit snapshots: an in-memory host for the engine.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! TranslationUnit (implements SourceManager + AstContext)
//! ```
//!
//! Tests and embedders can skip JSON and use [`TranslationUnitBuilder`].

use std::path::{Path, PathBuf};

pub mod dto;
pub mod loader;
mod model;

pub use loader::LoadError;
pub use model::{DeclId, FileId, PositionId, TranslationUnit, TranslationUnitBuilder};

/// Errors from reading and loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// IO error reading a snapshot file.
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model validation failed.
    #[error("{0}")]
    Load(#[from] LoadError),
}

/// Parses JSON content into a translation unit.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or references are invalid.
pub fn load_from_json(content: &str) -> Result<TranslationUnit, SnapshotError> {
    let dto: dto::TranslationUnitDto = serde_json::from_str(content)?;
    Ok(loader::load(&dto)?)
}

/// Reads and parses a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid snapshot.
pub fn load_from_path(path: &Path) -> Result<TranslationUnit, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!("Loading snapshot {}", path.display());
    load_from_json(&content)
}
