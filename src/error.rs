// src/error.rs

use std::path::PathBuf;

/// Every failure a stage of the run can produce. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid source URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection, DNS or non-success HTTP status.
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("archive error in {path:?}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive {path:?} contains unsafe entry name {name:?}")]
    UnsafeEntry { path: PathBuf, name: String },

    #[error("I/O error at {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path:?} at record {record}: {kind}")]
    Parse {
        path: PathBuf,
        record: u64,
        kind: ParseErrorKind,
    },

    #[error("failed to serialize {path:?}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// What exactly was wrong with a CSV row.
#[derive(Debug, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),

    #[error("expected at least 9 columns, found {found}")]
    MissingColumns { found: usize },

    #[error("unknown prefecture {0:?}")]
    UnknownPrefecture(String),

    #[error("postal code {0:?} has no 3-digit prefix")]
    PostalCodeTooShort(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }
}
