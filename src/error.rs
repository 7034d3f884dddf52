use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading settings or recordings from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}
