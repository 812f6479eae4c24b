//! Shared test doubles and router helpers.

// Not every test binary uses every helper
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use http_body_util::BodyExt;
use mockall::mock;
use uuid::Uuid;

use vodly_api::auth::issue_token;
use vodly_api::{create_router, ApiConfig, AppState};
use vodly_db::{DbResult, VideoStore};
use vodly_media::{MediaProcessor, MediaResult};
use vodly_models::{AspectClass, VideoId, VideoRecord};
use vodly_storage::{ObjectStorage, StorageResult};

pub const SECRET: &str = "integration-test-secret";
pub const BOUNDARY: &str = "vodly-test-boundary";

mock! {
    pub Store {}

    #[async_trait]
    impl VideoStore for Store {
        async fn get(&self, id: VideoId) -> DbResult<Option<VideoRecord>>;
        async fn create(&self, record: &VideoRecord) -> DbResult<()>;
        async fn update(&self, record: &VideoRecord) -> DbResult<()>;
        async fn list_for_user(&self, user_id: Uuid) -> DbResult<Vec<VideoRecord>>;
        async fn delete(&self, id: VideoId) -> DbResult<bool>;
    }
}

mock! {
    pub Storage {}

    #[async_trait]
    impl ObjectStorage for Storage {
        async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()>;
        async fn delete(&self, key: &str) -> StorageResult<()>;
        fn url_for(&self, key: &str) -> String;
    }
}

mock! {
    pub Media {}

    #[async_trait]
    impl MediaProcessor for Media {
        async fn probe_aspect(&self, path: &Path) -> MediaResult<AspectClass>;
        async fn faststart_remux(&self, path: &Path) -> MediaResult<PathBuf>;
    }
}

pub fn test_config(max_upload_bytes: usize) -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        jwt_secret: SECRET.to_string(),
        max_upload_bytes,
        ffmpeg_timeout_secs: 30,
        upload_timeout_secs: 30,
        environment: "test".to_string(),
    }
}

pub fn app_with_config(
    config: ApiConfig,
    store: MockStore,
    storage: MockStorage,
    media: MockMedia,
) -> Router {
    create_router(AppState::with_collaborators(
        config,
        Arc::new(store),
        Arc::new(storage),
        Arc::new(media),
    ))
}

pub fn app(store: MockStore, storage: MockStorage, media: MockMedia) -> Router {
    app_with_config(test_config(64 * 1024), store, storage, media)
}

pub fn record_owned_by(user_id: Uuid) -> VideoRecord {
    VideoRecord::new(user_id, "launch footage", None)
}

pub fn token_for(user_id: Uuid) -> String {
    issue_token(user_id, SECRET, chrono::Duration::hours(1)).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
