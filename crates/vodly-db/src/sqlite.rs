//! SQLite-backed video store.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

use vodly_models::{VideoId, VideoRecord};

use crate::error::{DbError, DbResult};
use crate::store::VideoStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS videos (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    title       TEXT NOT NULL,
    description TEXT,
    video_url   TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_videos_user_id ON videos (user_id);
";

/// Raw row shape; ids and timestamps are stored as text and decoded into
/// domain types on the way out.
#[derive(Debug, FromRow)]
struct VideoRow {
    id: String,
    user_id: String,
    title: String,
    description: Option<String>,
    video_url: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<VideoRow> for VideoRecord {
    type Error = DbError;

    fn try_from(row: VideoRow) -> Result<Self, Self::Error> {
        Ok(VideoRecord {
            id: row
                .id
                .parse()
                .map_err(|_| DbError::corrupt(format!("bad video id: {}", row.id)))?,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|_| DbError::corrupt(format!("bad user id: {}", row.user_id)))?,
            title: row.title,
            description: row.description,
            video_url: row.video_url,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

fn parse_timestamp(raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| DbError::corrupt(format!("bad timestamp: {raw}")))
}

/// [`VideoStore`] over a SQLite database file.
#[derive(Clone)]
pub struct SqliteVideoStore {
    pool: SqlitePool,
}

impl SqliteVideoStore {
    /// Open (creating if missing) the database at `url` and ensure the
    /// schema exists.
    pub async fn connect(url: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(DbError::Sqlx)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        info!("Video store ready at {}", url);

        Ok(Self { pool })
    }
}

#[async_trait]
impl VideoStore for SqliteVideoStore {
    async fn get(&self, id: VideoId) -> DbResult<Option<VideoRecord>> {
        let row: Option<VideoRow> = sqlx::query_as(
            "SELECT id, user_id, title, description, video_url, created_at, updated_at
             FROM videos WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(VideoRecord::try_from).transpose()
    }

    async fn create(&self, record: &VideoRecord) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO videos (id, user_id, title, description, video_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.video_url)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, record: &VideoRecord) -> DbResult<()> {
        sqlx::query(
            "UPDATE videos
             SET user_id = ?2, title = ?3, description = ?4, video_url = ?5,
                 created_at = ?6, updated_at = ?7
             WHERE id = ?1",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.video_url)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> DbResult<Vec<VideoRecord>> {
        let rows: Vec<VideoRow> = sqlx::query_as(
            "SELECT id, user_id, title, description, video_url, created_at, updated_at
             FROM videos WHERE user_id = ?1 ORDER BY created_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(VideoRecord::try_from).collect()
    }

    async fn delete(&self, id: VideoId) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store(dir: &tempfile::TempDir) -> SqliteVideoStore {
        let path = dir.path().join("videos.db");
        SqliteVideoStore::connect(&format!("sqlite://{}", path.display()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_get_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir).await;

        let record = VideoRecord::new(Uuid::new_v4(), "boots of flight", Some("a demo".into()));
        store.create(&record).await.unwrap();

        let fetched = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, record.id);
        assert_eq!(fetched.user_id, record.user_id);
        assert_eq!(fetched.title, "boots of flight");
        assert_eq!(fetched.description.as_deref(), Some("a demo"));
        assert!(fetched.video_url.is_none());
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir).await;

        assert!(store.get(VideoId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_overwrites_the_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir).await;

        let mut record = VideoRecord::new(Uuid::new_v4(), "before", None);
        store.create(&record).await.unwrap();

        record.title = "after".into();
        record.video_url = Some("https://cdn.example.com/landscape/abc.mp4".into());
        record.updated_at = Utc::now();
        store.update(&record).await.unwrap();

        let fetched = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "after");
        assert_eq!(
            fetched.video_url.as_deref(),
            Some("https://cdn.example.com/landscape/abc.mp4")
        );
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_owner() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir).await;

        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        store.create(&VideoRecord::new(owner, "one", None)).await.unwrap();
        store.create(&VideoRecord::new(owner, "two", None)).await.unwrap();
        store.create(&VideoRecord::new(stranger, "three", None)).await.unwrap();

        let videos = store.list_for_user(owner).await.unwrap();
        assert_eq!(videos.len(), 2);
        assert!(videos.iter().all(|v| v.user_id == owner));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir).await;

        let record = VideoRecord::new(Uuid::new_v4(), "to delete", None);
        store.create(&record).await.unwrap();

        assert!(store.delete(record.id).await.unwrap());
        assert!(!store.delete(record.id).await.unwrap());
        assert!(store.get(record.id).await.unwrap().is_none());
    }
}
