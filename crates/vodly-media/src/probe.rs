//! FFprobe aspect-ratio classification.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use vodly_models::AspectClass;

use crate::error::{MediaError, MediaResult};

/// FFprobe JSON output, restricted to the fields we read.
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    display_aspect_ratio: Option<String>,
}

/// Probe a video file and classify its aspect ratio.
///
/// Runs `ffprobe -v error -print_format json -show_streams` and classifies
/// the first stream's `display_aspect_ratio`. A missing ratio classifies as
/// [`AspectClass::Other`]; an empty stream list is [`MediaError::NoStreams`].
pub async fn probe_aspect(path: impl AsRef<Path>, timeout_secs: u64) -> MediaResult<AspectClass> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    debug!("Probing {}", path.display());

    let output = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
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
        return Err(MediaError::FfprobeFailed {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let probe: ProbeOutput = serde_json::from_slice(&output.stdout)?;
    aspect_of(&probe)
}

/// Classify the first stream of a parsed probe result.
fn aspect_of(probe: &ProbeOutput) -> MediaResult<AspectClass> {
    let first = probe.streams.first().ok_or(MediaError::NoStreams)?;

    Ok(first
        .display_aspect_ratio
        .as_deref()
        .map(AspectClass::from_ratio)
        .unwrap_or(AspectClass::Other))
}
