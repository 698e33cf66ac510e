use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {} as JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("manifest {} has unexpected shape: {reason}", path.display())]
    Shape { path: PathBuf, reason: String },
    #[error("failed to serialize manifest: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn shape(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Shape {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Failures that are reported and skipped instead of aborting a prune run.
#[derive(Debug, Error)]
pub enum PruneError {
    #[error("{name} vanished before it could be deleted")]
    Race { name: String },
}
