/// Error types for manifest synchronization
use std::path::PathBuf;
use thiserror::Error;

use crate::manifest::ResourceKind;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("YAML codec error: {0}")]
    Codec(String),

    #[error(
        "Invalid resource object: missing {missing} (requires 'metadata.namespace', 'metadata.name' and 'kind')"
    )]
    InvalidResource { missing: String },

    #[error("Unsupported resource type: {kind}")]
    UnsupportedKind { kind: String },

    #[error("Failed to get online resource {kind} {namespace}/{name}: {source}")]
    Fetch {
        kind: ResourceKind,
        namespace: String,
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Kubernetes client error: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
