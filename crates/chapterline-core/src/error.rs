use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChapterlineError {
    #[error("Malformed timestamp {timestamp:?}: {reason}")]
    MalformedTimestamp {
        timestamp: String,
        reason: &'static str,
    },

    #[error("Invalid frame rate {fps}: must be finite and positive")]
    InvalidFrameRate { fps: f64 },

    #[error("Invalid video metadata: {reason}")]
    InvalidVideoMetadata { reason: String },

    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Description file not found: {path}")]
    MissingDescription { path: PathBuf },

    #[error("Timeline serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ChapterlineError {
    pub(crate) fn malformed(timestamp: &str, reason: &'static str) -> Self {
        Self::MalformedTimestamp {
            timestamp: timestamp.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChapterlineError>;
