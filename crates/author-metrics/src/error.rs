//! Error types for the author metrics service.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;

use crate::models::Suggestion;

/// Errors raised while loading the yearly datasets at startup.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The source file could not be opened or read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the source.
    #[error("Malformed table for {year}: {source}")]
    Csv {
        /// Dataset year.
        year: u16,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A column required by the year's schema is absent from the header row.
    #[error("Table for {year} is missing required column '{column}'")]
    MissingColumn {
        /// Dataset year.
        year: u16,
        /// Literal column name.
        column: String,
    },

    /// The year has no column mapping and cannot be interpreted.
    #[error("No field mapping defined for {year}")]
    NoFieldMapping {
        /// Dataset year.
        year: u16,
    },

    /// One or more configured years failed to load.
    #[error("Failed to load {} year(s): {}", failures.len(), describe_failures(failures))]
    Incomplete {
        /// `(year, reason)` for every failing year.
        failures: Vec<(u16, String)>,
    },

    /// No year loaded at all.
    #[error("No datasets loaded")]
    Empty,

    /// The blocking load task panicked or was cancelled.
    #[error("Dataset load task failed: {source}")]
    Task {
        /// Join error from the blocking pool.
        #[source]
        source: tokio::task::JoinError,
    },
}

fn describe_failures(failures: &[(u16, String)]) -> String {
    failures.iter().map(|(year, reason)| format!("{year} ({reason})")).collect::<Vec<_>>().join("; ")
}

impl LoadError {
    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(year: u16, column: impl Into<String>) -> Self {
        Self::MissingColumn { year, column: column.into() }
    }
}

/// Request-level errors from author resolution and analysis.
///
/// Each one fails exactly one request; shared state is never touched.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    /// The identity query is malformed or empty.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// No record matched.
    #[error("Author not found: {message}")]
    NotFound {
        /// Human readable description of the query.
        message: String,
        /// Closest names from the most recent year.
        suggestions: Vec<Suggestion>,
    },

    /// Several records matched equally well in one year.
    #[error("Ambiguous match: {message}")]
    Ambiguous {
        /// Human readable description of the query.
        message: String,
        /// Year in which the ambiguity was found.
        year: u16,
        /// Every matching row.
        candidates: Vec<Suggestion>,
    },

    /// The requested year was never loaded.
    #[error("No dataset loaded for {year}")]
    DataUnavailable {
        /// Requested year.
        year: u16,
    },
}

impl AnalysisError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>, suggestions: Vec<Suggestion>) -> Self {
        Self::NotFound { message: message.into(), suggestions }
    }

    /// Short machine-friendly label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Invalid request",
            Self::NotFound { .. } => "Author not found",
            Self::Ambiguous { .. } => "Multiple matching authors",
            Self::DataUnavailable { .. } => "Data unavailable",
        }
    }

    /// Convert to a user-friendly error message.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::NotFound { message, suggestions } if !suggestions.is_empty() => {
                format!("{message}. Did you mean one of {} similar authors?", suggestions.len())
            }
            Self::NotFound { message, .. } => message.clone(),
            Self::Ambiguous { message, .. } => message.clone(),
            Self::DataUnavailable { year } => {
                format!("Data for {year} is not available on this server.")
            }
        }
    }
}

/// Result type alias for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type alias for request operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
