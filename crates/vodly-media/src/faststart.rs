//! Fast-start container remuxing.
//!
//! Rewrites an MP4 so the moov atom sits at the front of the file, letting
//! playback begin before the whole file has downloaded. Stream data is
//! copied unchanged; only the container layout moves.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Suffix appended to the input path for the remuxed sibling file.
const FASTSTART_SUFFIX: &str = ".faststart.mp4";

/// Compute the output path for a remux of `input`.
pub fn faststart_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(FASTSTART_SUFFIX);
    input.with_file_name(name)
}

fn faststart_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-v".to_string(),
        "error".to_string(),
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-c".to_string(),
        "copy".to_string(),
        "-movflags".to_string(),
        "faststart".to_string(),
        "-f".to_string(),
        "mp4".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Remux a video for progressive playback, writing a sibling file.
///
/// Returns the output path on success. The caller owns the new file's
/// lifecycle, including removal.
pub async fn faststart_remux(path: impl AsRef<Path>, timeout_secs: u64) -> MediaResult<PathBuf> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    let out_path = faststart_output_path(path);
    let args = faststart_args(path, &out_path);
    debug!("Running ffmpeg {}", args.join(" "));

    let output = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(Duration::from_secs(timeout_secs), output).await {
        Ok(result) => result?,
        Err(_) => return Err(MediaError::Timeout(timeout_secs)),
    };

    if !output.status.success() {
        return Err(MediaError::FfmpegFailed {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        });
    }

    // ffmpeg can exit zero without producing output for some malformed inputs
    if !out_path.is_file() {
        return Err(MediaError::FfmpegFailed {
            stderr: "ffmpeg produced no output file".to_string(),
            exit_code: output.status.code(),
        });
    }

    Ok(out_path)
}
