//! Error types for conftrack.
//!
//! Only the ledger file itself is fatal to a run. Unparseable ledger lines,
//! missing version metadata and missing catalog files are handled where they
//! occur and never surface here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("ledger file is unreadable: {path}: {source}")]
    LedgerUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no ledger file found (looked for: {patterns})")]
    LedgerNotFound { patterns: String },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("serialization failure: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl Error {
    /// Process exit code used by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LedgerUnreadable { .. } | Self::LedgerNotFound { .. } | Self::Config { .. } => 2,
            Self::Io { .. } | Self::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_unreadable_names_the_path() {
        let err = Error::LedgerUnreadable {
            path: PathBuf::from("tests/testsrc/test262.properties"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("tests/testsrc/test262.properties"));
        assert!(msg.contains("missing"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_write_failures_exit_with_one() {
        let err = Error::Io {
            path: PathBuf::from("out/FEATURES.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "failed to write out/FEATURES.md: denied");
    }
}
