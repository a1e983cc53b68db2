//! Core promoter-extraction functionality
//!
//! This module contains the identifier classifier, the annotation
//! store, principal-isoform validation, and promoter region
//! computation.

pub mod annotation;
pub mod config;
mod error;
pub mod identifier;
pub mod isoform;
pub mod region;

pub use annotation::{
    detect_compression, AnnotationRecord, AnnotationStore, CompressionFormat, Strand,
};
pub use config::{validate_file, Config, ResolvedConfig, CONFIG_FILE};
pub use error::{
    AnnotationResult, ConfigError, ExtractError, ExtractResult, GffParseError, PrexError,
    Result, ValidationError, ValidationResult,
};
pub use identifier::{IdKind, LookupColumn};
pub use isoform::validate;
pub use region::{promoter_region, Region};
