use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BPError {
    // Standard errors with From implementations
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Settings errors
    #[error("Invalid settings in {path}: {reason}")]
    SettingsParse { path: PathBuf, reason: String },

    #[error("Cannot read active file {path}: {source}")]
    ActiveFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Missing --line argument, required to locate the test method")]
    MissingLine,
}
