use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    /// The root folder is missing, not a directory, or could not be walked.
    #[error("cannot enumerate {}: {reason}", path.display())]
    Enumeration { path: PathBuf, reason: String },

    /// A persisted index could not be read from disk.
    #[error("cannot read index file {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A persisted index was read but is not a valid folder index.
    #[error("malformed index file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write index file {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode index: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("a hashing worker panicked")]
    WorkerPanicked,
}

impl IndexError {
    pub(crate) fn enumeration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        IndexError::Enumeration {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
