//! Error types for dataset generation.

use thiserror::Error;
use time::Date;

use crm_records::{PipelineKind, Segment};

use crate::integrity::IntegrityError;

/// A profile is missing data the generators need, or holds values they cannot use.
///
/// Raised before any record is produced.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile '{profile}' has an empty {table} table")]
    EmptyTable { profile: String, table: String },

    #[error("profile '{profile}': {field} range is inverted")]
    InvertedRange { profile: String, field: String },

    #[error("profile '{profile}': {field} probability {value} is outside [0, 1]")]
    InvalidProbability {
        profile: String,
        field: String,
        value: f64,
    },

    #[error("profile '{profile}' defines no {kind} pipeline")]
    MissingPipeline { profile: String, kind: PipelineKind },

    #[error("profile '{profile}' has no {table} entry for segment {segment}")]
    MissingSegment {
        profile: String,
        table: String,
        segment: Segment,
    },

    #[error("profile '{profile}': {reason}")]
    Invalid { profile: String, reason: String },

    #[error("unknown profile '{name}' (available: {available})")]
    Unknown { name: String, available: String },

    #[error("Failed to parse profile: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invalid run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("date window is empty: start {start} is not before {as_of}")]
    EmptyWindow { start: Date, as_of: Date },

    #[error("active_since {active_since} is outside the window {start} to {as_of}")]
    ActiveSince {
        active_since: Date,
        start: Date,
        as_of: Date,
    },

    #[error("history must cover 1 to 10 years, got {0}")]
    HistoryYears(u8),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Any failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("generated dataset failed integrity check: {0}")]
    Integrity(#[from] IntegrityError),
}

/// Failure while writing a dataset out.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
