use std::path::PathBuf;

use thiserror::Error;

/// Conditions that abort a run before any output is written.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input manifest not found: {0}")]
    MissingManifest(PathBuf),

    #[error("documents directory not found: {0}")]
    MissingDocumentDir(PathBuf),

    #[error("none of the listed documents exist")]
    NoDocuments,

    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
