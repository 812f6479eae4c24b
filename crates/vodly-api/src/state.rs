//! Application state.

use std::sync::Arc;

use vodly_db::{SqliteVideoStore, VideoStore};
use vodly_media::{FfmpegProcessor, MediaProcessor};
use vodly_storage::{ObjectStorage, S3Storage};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Collaborators are held as trait objects so tests can swap in fakes
/// without touching SQLite, S3 or ffmpeg.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<dyn VideoStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub media: Arc<dyn MediaProcessor>,
}

impl AppState {
    /// Create application state backed by the real collaborators.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://vodly.db".to_string());
        let store = SqliteVideoStore::connect(&database_url).await?;

        let storage = S3Storage::from_env().await?;
        let media = FfmpegProcessor::new(config.ffmpeg_timeout_secs);

        Ok(Self {
            config,
            store: Arc::new(store),
            storage: Arc::new(storage),
            media: Arc::new(media),
        })
    }

    /// Assemble state from explicit collaborators.
    pub fn with_collaborators(
        config: ApiConfig,
        store: Arc<dyn VideoStore>,
        storage: Arc<dyn ObjectStorage>,
        media: Arc<dyn MediaProcessor>,
    ) -> Self {
        Self {
            config,
            store,
            storage,
            media,
        }
    }
}
