use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a source file into a [`SalaryDataset`](super::model::SalaryDataset).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed Parquet in {}: {source}", path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("unexpected layout in {}: {message}", path.display())]
    Layout { path: PathBuf, message: String },

    #[error("{} is missing required column(s): {}", path.display(), missing.join(", "))]
    MissingColumns {
        path: PathBuf,
        missing: Vec<&'static str>,
    },
}

/// An aggregation was asked for on a view with no records.
///
/// Callers are expected to check `is_empty()` first and show a notice instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("aggregation over an empty view")]
pub struct EmptyView;
