//! FFmpeg/FFprobe subprocess wrappers.
//!
//! This crate provides:
//! - Aspect-ratio probing via `ffprobe` JSON output
//! - Fast-start container remuxing via `ffmpeg -c copy -movflags faststart`
//! - The [`MediaProcessor`] trait so callers can substitute fakes in tests
//!
//! Both tools run as external processes with piped stdio and a bounded
//! timeout; on expiry the child is killed and the operation fails.

pub mod error;
pub mod faststart;
pub mod probe;
pub mod processor;

pub use error::{MediaError, MediaResult};
pub use faststart::{faststart_output_path, faststart_remux};
pub use probe::probe_aspect;
pub use processor::{FfmpegProcessor, MediaProcessor};
