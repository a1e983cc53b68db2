//! Run configuration
//!
//! Optional defaults for the FASTA and GFF3 paths come from a
//! `prex.json` file in the working directory; explicit command-line
//! arguments override them. The result is an explicit struct passed
//! into the run loop, not process-global state.

use crate::core::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file probed in the working directory
pub const CONFIG_FILE: &str = "prex.json";

/// Partial configuration: either source may still be missing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub fasta: Option<PathBuf>,
    pub gff3: Option<PathBuf>,
}

/// Fully resolved configuration with both inputs verified readable
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub fasta: PathBuf,
    pub gff3: PathBuf,
}

impl Config {
    /// Read defaults from a JSON config file. A missing file is not an
    /// error and yields an empty config; malformed JSON is fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(Config::default());
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrite defaults with explicit command-line arguments
    pub fn merge_args(mut self, fasta: Option<PathBuf>, gff3: Option<PathBuf>) -> Self {
        if fasta.is_some() {
            self.fasta = fasta;
        }
        if gff3.is_some() {
            self.gff3 = gff3;
        }
        self
    }

    /// Require both inputs to be present and readable
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let (fasta, gff3) = match (self.fasta, self.gff3) {
            (Some(f), Some(g)) => (f, g),
            _ => return Err(ConfigError::MissingInputs),
        };
        Ok(ResolvedConfig {
            fasta: validate_file(&fasta)?,
            gff3: validate_file(&gff3)?,
        })
    }
}

/// Check that the input file exists and is a regular file, returning
/// its tilde-expanded absolute path.
pub fn validate_file(path: &Path) -> Result<PathBuf, ConfigError> {
    let path = expand_user(path);
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path));
    }
    Ok(fs::canonicalize(path)?)
}

/// Expand a leading `~` to the user's home directory, so config-file
/// paths like `~/genome.fa` resolve. Anything else passes through
/// unchanged, including `~user/...` forms.
fn expand_user(path: &Path) -> PathBuf {
    let home = match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => return path.to_path_buf(),
    };
    match path.to_str() {
        Some("~") => home,
        Some(s) => match s.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => path.to_path_buf(),
        },
        None => path.to_path_buf(),
    }
}
