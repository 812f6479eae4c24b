//! The subprocess boundary as a trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use vodly_models::AspectClass;

use crate::error::MediaResult;
use crate::{faststart, probe};

/// Media inspection and remuxing operations the upload pipeline depends on.
///
/// The production implementation shells out to ffprobe/ffmpeg; tests
/// substitute fakes so no external process is ever spawned.
#[async_trait]
pub trait MediaProcessor: Send + Sync {
    /// Classify the aspect ratio of the video at `path`.
    async fn probe_aspect(&self, path: &Path) -> MediaResult<AspectClass>;

    /// Remux the video at `path` for progressive playback, returning the
    /// path of the new sibling file. The caller owns the output file.
    async fn faststart_remux(&self, path: &Path) -> MediaResult<PathBuf>;
}

/// [`MediaProcessor`] backed by the real ffprobe/ffmpeg binaries.
#[derive(Debug, Clone)]
pub struct FfmpegProcessor {
    timeout_secs: u64,
}

impl FfmpegProcessor {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl Default for FfmpegProcessor {
    fn default() -> Self {
        Self::new(300)
    }
}

#[async_trait]
impl MediaProcessor for FfmpegProcessor {
    async fn probe_aspect(&self, path: &Path) -> MediaResult<AspectClass> {
        probe::probe_aspect(path, self.timeout_secs).await
    }

    async fn faststart_remux(&self, path: &Path) -> MediaResult<PathBuf> {
        faststart::faststart_remux(path, self.timeout_secs).await
    }
}
