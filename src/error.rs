// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Per-file scan failure. Never fatal for the rest of the batch.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("read file: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Grammar error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no tree (path: {0})")]
    NoTree(PathBuf),
}

impl ScanError {
    /// Returns `true` for malformed-source failures.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::NoTree(_))
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
