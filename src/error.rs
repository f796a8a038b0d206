use std::io;
use std::path::PathBuf;

/// Fatal scan and output errors. Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to walk {}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize report")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
