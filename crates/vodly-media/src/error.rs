//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while probing or remuxing a video.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("FFmpeg exited with {exit_code:?}: {stderr}")]
    FfmpegFailed {
        stderr: String,
        exit_code: Option<i32>,
    },

    #[error("FFprobe exited with non-zero status: {stderr}")]
    FfprobeFailed { stderr: String },

    /// The prober returned a stream list with no entries. Kept distinct from
    /// a parse failure so callers can tell a structurally valid but streamless
    /// file apart from garbage output.
    #[error("no streams reported for input file")]
    NoStreams,

    #[error("operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
