//! Core data types for extracted target records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Glyph separating a central value from its uncertainty in page text.
pub const PLUS_MINUS: char = '±';

/// A measurement read from page text: a bare value or a value with uncertainty.
///
/// Serialises as a bare number or as a two-element array `[value, error]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Value(f64),
    Uncertain(f64, f64),
}

impl Measurement {
    /// Parse `"12.3"` or `"12.3±0.4"` (whitespace around tokens is ignored).
    ///
    /// With the separator present exactly two numeric tokens must follow,
    /// otherwise exactly one.
    pub fn parse(text: &str) -> Result<Self, ExofopError> {
        let invalid = || ExofopError::InvalidMeasurement(text.to_string());

        let mut tokens = text.split(PLUS_MINUS);
        let value = parse_float(tokens.next().ok_or_else(invalid)?).ok_or_else(invalid)?;
        match (tokens.next(), tokens.next()) {
            (None, _) => Ok(Measurement::Value(value)),
            (Some(err), None) => {
                let error = parse_float(err).ok_or_else(invalid)?;
                Ok(Measurement::Uncertain(value, error))
            }
            (Some(_), Some(_)) => Err(invalid()),
        }
    }

    /// Central value.
    pub fn value(&self) -> f64 {
        match *self {
            Measurement::Value(v) | Measurement::Uncertain(v, _) => v,
        }
    }

    /// Uncertainty, if the source text carried one.
    pub fn error(&self) -> Option<f64> {
        match *self {
            Measurement::Value(_) => None,
            Measurement::Uncertain(_, e) => Some(e),
        }
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Measurement::Value(v) => write!(f, "{v}"),
            Measurement::Uncertain(v, e) => write!(f, "{v},{e}"),
        }
    }
}

fn parse_float(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok()
}

/// Insertion-ordered map keyed by field name.
///
/// Re-inserting an existing key replaces the value and keeps its position.
pub type FieldMap<V> = IndexMap<String, V>;

/// Per-candidate transit and planet parameters; `None` marks an empty cell.
pub type CandidateFields = FieldMap<Option<f64>>;

/// A file that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadError {
    pub url: String,
    pub message: String,
}

impl std::fmt::Display for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.url, self.message)
    }
}

/// Errors from fetching and extracting target pages.
#[derive(Debug, thiserror::Error)]
pub enum ExofopError {
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Table not found: #{0}")]
    TableNotFound(String),

    #[error("Column not found in #{table}: {column}")]
    ColumnNotFound { table: String, column: String },

    #[error("No row attributed to '{0}' in the stellar parameter table")]
    NoPreferredProvenance(String),

    #[error("No links found on {0}")]
    NoLinksFound(String),

    #[error("Invalid measurement: {0:?}")]
    InvalidMeasurement(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExofopResult<T> = Result<T, ExofopError>;
