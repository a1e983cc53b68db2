//! Error types for PrEx
//!
//! Defines all error types used throughout the library.

use crate::core::identifier::LookupColumn;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for PrEx operations
#[derive(Debug, Error)]
pub enum PrexError {
    /// Annotation parsing errors
    #[error("Annotation parse error: {0}")]
    Annotation(#[from] GffParseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-identifier validation failures
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Sequence extraction errors
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while parsing the GFF3/GTF annotation
#[derive(Debug, Error)]
pub enum GffParseError {
    /// Annotation file not found
    #[error("Annotation file not found: {0}")]
    FileNotFound(PathBuf),

    /// Row has fewer than the 9 required columns
    #[error("Too few fields at line {line}: expected 9, found {found}")]
    TooFewFields { line: usize, found: usize },

    /// Coordinate column failed integer coercion
    #[error("Failed to parse {field} '{value}' at line {line}")]
    InvalidCoordinate {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Row is not valid UTF-8
    #[error("Invalid UTF-8 in {field} at line {line}")]
    InvalidUtf8 { line: usize, field: &'static str },

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-identifier validation failures.
///
/// The three-way split (unknown identifier / no principal isoform /
/// ambiguous principal isoforms) is the contract downstream code and
/// tests depend on; all three are recoverable warn-and-skip outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The lookup column has no row with this value
    #[error("no {column} known by this identifier: {identifier}")]
    UnknownIdentifier {
        column: LookupColumn,
        identifier: String,
    },

    /// The identifier exists but no transcript carries a principal tag
    #[error("no principal isoform found for {identifier}")]
    NoPrincipalIsoform { identifier: String },

    /// More than one principal start codon; not resolved automatically
    #[error("too many primary isoforms for {identifier}")]
    AmbiguousPrincipal { identifier: String },
}

/// Configuration and input-file errors (fatal at startup)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input file missing or not a regular file
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Neither the command line nor the config file supplied a path
    #[error(
        "Please specify a FASTA file and GFF3 annotation\n(or define defaults in your prex.json config file)"
    )]
    MissingInputs,

    /// Config file exists but is not valid JSON
    #[error("Malformed config file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O error reading the config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the external sequence-extraction tool
#[derive(Debug, Error)]
pub enum ExtractError {
    /// bedtools executable not on PATH
    #[error("bedtools not found on PATH")]
    ToolNotFound,

    /// `bedtools --version` output could not be parsed
    #[error("Could not parse bedtools version from '{0}'")]
    VersionProbe(String),

    /// bedtools exited with a failure status
    #[error("bedtools getfasta failed with {status}")]
    ToolFailed { status: std::process::ExitStatus },

    /// I/O error around the temp BED file or output redirect
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for PrEx operations
pub type Result<T> = std::result::Result<T, PrexError>;

/// Result type alias for annotation parsing
pub type AnnotationResult<T> = std::result::Result<T, GffParseError>;

/// Result type alias for identifier validation
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Result type alias for sequence extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
