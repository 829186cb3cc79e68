// src/config/mod.rs
pub mod types;

pub use self::types::{Bool3, FilterHints, WorkerConfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Conventional config file name looked up by [`WorkerConfig::load_local`].
pub const CONFIG_FILE: &str = "nodegrep.toml";

impl WorkerConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML or has mistyped fields.
    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid worker configuration")
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Loads `nodegrep.toml` from `dir` if present, defaults otherwise.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_local(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Resolves `filename` against the working directory for reading.
    #[must_use]
    pub fn resolve(&self, filename: &Path) -> PathBuf {
        match &self.work_dir {
            Some(dir) if filename.is_relative() => dir.join(filename),
            _ => filename.to_path_buf(),
        }
    }

    /// Comments are only kept when the autogenerated-file condition needs them.
    #[must_use]
    pub fn needs_comments(&self) -> bool {
        self.filters.autogen_cond.is_set()
    }
}
