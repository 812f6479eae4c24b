//! The video upload pipeline.
//!
//! `POST /api/videos/:video_id` walks a short, linear pipeline: ownership
//! check, bounded multipart ingestion into a temp file, aspect probing,
//! fast-start remux, randomized key derivation, storage upload, and a
//! wholesale record update. Every temporary artifact is owned by an RAII
//! guard from the moment it exists, so any exit path cleans up.

use std::time::Duration;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use tempfile::{NamedTempFile, TempPath};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use vodly_models::{VideoId, VideoRecord};
use vodly_storage::ObjectKey;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::videos::fetch_owned;
use crate::state::AppState;

/// Multipart field that carries the video bytes.
const VIDEO_FIELD: &str = "video";

/// The only accepted upload content type. The declared part header is
/// trusted as-is; bytes are not sniffed.
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Upload a video for an existing record.
pub async fn upload_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    user: AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<VideoRecord>> {
    // Ownership is settled before a single body byte is read; Multipart is
    // lazy until the first next_field call.
    let mut record = fetch_owned(&state, VideoId(video_id), user.user_id).await?;

    tracing::info!(video_id = %record.id, user_id = %user.user_id, "Upload started");

    // Ingest: stage the upload in a temp file that deletes itself on every
    // exit path from here on.
    let staged = stage_upload(multipart).await?;

    // Probe before remuxing; a file we cannot classify is not worth copying.
    let aspect = state.media.probe_aspect(staged.path()).await?;

    let remuxed: TempPath = state
        .media
        .faststart_remux(staged.path())
        .await
        .map(TempPath::from_path)?;

    // The remuxed artifact must be a readable file before we offer it to
    // storage.
    let size = tokio::fs::metadata(&remuxed)
        .await
        .map_err(|e| ApiError::internal(format!("remuxed file unreadable: {e}")))?
        .len();

    let key = ObjectKey::generate(aspect)?;

    let upload = state
        .storage
        .put_file(key.as_str(), &remuxed, VIDEO_CONTENT_TYPE);
    tokio::time::timeout(Duration::from_secs(state.config.upload_timeout_secs), upload)
        .await
        .map_err(|_| ApiError::internal("storage upload timed out"))??;

    record.video_url = Some(state.storage.url_for(key.as_str()));
    record.updated_at = chrono::Utc::now();
    state.store.update(&record).await?;

    tracing::info!(
        video_id = %record.id,
        key = %key,
        aspect = %aspect,
        size_bytes = size,
        "Upload complete"
    );

    Ok(Json(record))
}

/// Stream the `video` multipart field to a fresh temp file.
///
/// Returns the staged file; its deletion is owned by the returned handle.
/// The content type is validated before the temp file exists, so a rejected
/// upload leaves nothing on disk.
async fn stage_upload(mut multipart: Multipart) -> ApiResult<NamedTempFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        require_mp4(&field)?;

        let staged = NamedTempFile::with_suffix(".mp4")
            .map_err(|e| ApiError::internal(format!("failed to create temp file: {e}")))?;

        write_field_to_file(field, &staged).await?;

        return Ok(staged);
    }

    Err(ApiError::bad_request("missing video field"))
}

/// Validate the declared content type of the upload part.
fn require_mp4(field: &Field<'_>) -> ApiResult<()> {
    let declared = field
        .content_type()
        .ok_or_else(|| ApiError::bad_request("missing content type"))?;

    let parsed: mime::Mime = declared
        .parse()
        .map_err(|_| ApiError::bad_request("invalid content type"))?;

    if parsed.essence_str() != VIDEO_CONTENT_TYPE {
        return Err(ApiError::bad_request("invalid file type"));
    }

    Ok(())
}

async fn write_field_to_file(mut field: Field<'_>, staged: &NamedTempFile) -> ApiResult<()> {
    let std_file = staged
        .reopen()
        .map_err(|e| ApiError::internal(format!("failed to open temp file: {e}")))?;
    let mut file = tokio::fs::File::from_std(std_file);

    loop {
        let chunk = field
            .chunk()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;

        match chunk {
            Some(bytes) => file
                .write_all(&bytes)
                .await
                .map_err(|e| ApiError::internal(format!("failed to write temp file: {e}")))?,
            None => break,
        }
    }

    file.flush()
        .await
        .map_err(|e| ApiError::internal(format!("failed to flush temp file: {e}")))?;

    Ok(())
}
