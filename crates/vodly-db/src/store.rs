//! The video store contract.

use async_trait::async_trait;
use uuid::Uuid;

use vodly_models::{VideoId, VideoRecord};

use crate::error::DbResult;

/// Persistence operations for video records.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch a record by id, or `None` if it does not exist.
    async fn get(&self, id: VideoId) -> DbResult<Option<VideoRecord>>;

    /// Insert a new record.
    async fn create(&self, record: &VideoRecord) -> DbResult<()>;

    /// Overwrite an existing record wholesale.
    async fn update(&self, record: &VideoRecord) -> DbResult<()>;

    /// List all records owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> DbResult<Vec<VideoRecord>>;

    /// Delete a record. Returns whether a row was removed.
    async fn delete(&self, id: VideoId) -> DbResult<bool>;
}
