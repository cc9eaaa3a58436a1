use std::path::PathBuf;

use thiserror::Error;

use super::source::DataFormat;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while loading the award dataset.
/// Any of these aborts the pipeline; no partial dataset is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {uri}")]
    Fetch {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL {uri}: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("unsupported data format '.{0}', expected .csv, .json or .parquet")]
    UnsupportedFormat(String),

    #[error("cannot infer the data format of {0}: no file extension")]
    NoExtension(String),

    #[error("dataset is missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("malformed {format} data")]
    Malformed {
        format: DataFormat,
        #[source]
        source: BoxError,
    },
}

impl LoadError {
    pub(crate) fn malformed(format: DataFormat, source: impl Into<BoxError>) -> Self {
        LoadError::Malformed {
            format,
            source: source.into(),
        }
    }
}
