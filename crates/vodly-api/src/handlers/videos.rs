//! Video record handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use vodly_models::{VideoId, VideoRecord};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Fetch a record and enforce ownership.
///
/// Mismatched owners get 401, matching the upload pipeline; a request that
/// fails here has touched nothing but the store.
pub(crate) async fn fetch_owned(
    state: &AppState,
    id: VideoId,
    user_id: Uuid,
) -> ApiResult<VideoRecord> {
    let record = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("video not found"))?;

    if record.user_id != user_id {
        return Err(ApiError::unauthorized("not authorized for this video"));
    }

    Ok(record)
}

/// Create video request body.
#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create a video record with no stored video yet.
pub async fn create_video(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateVideoRequest>,
) -> ApiResult<(StatusCode, Json<VideoRecord>)> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }

    let record = VideoRecord::new(user.user_id, title, body.description);
    state.store.create(&record).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Fetch one video record.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    user: AuthUser,
) -> ApiResult<Json<VideoRecord>> {
    let record = fetch_owned(&state, VideoId(video_id), user.user_id).await?;
    Ok(Json(record))
}

/// User videos response.
#[derive(Serialize)]
pub struct UserVideosResponse {
    pub videos: Vec<VideoRecord>,
}

/// List the authenticated user's video records.
pub async fn list_videos(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<UserVideosResponse>> {
    let videos = state.store.list_for_user(user.user_id).await?;
    Ok(Json(UserVideosResponse { videos }))
}

/// Delete video response.
#[derive(Serialize)]
pub struct DeleteVideoResponse {
    pub deleted: bool,
    pub video_id: VideoId,
}

/// Delete a video record and its stored object, if any.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    user: AuthUser,
) -> ApiResult<Json<DeleteVideoResponse>> {
    let record = fetch_owned(&state, VideoId(video_id), user.user_id).await?;

    if let Some(url) = &record.video_url {
        match object_key_from_url(url) {
            Some(key) => state.storage.delete(&key).await?,
            None => warn!(url = %url, "stored URL has no recognizable object key"),
        }
    }

    let deleted = state.store.delete(record.id).await?;

    Ok(Json(DeleteVideoResponse {
        deleted,
        video_id: record.id,
    }))
}

/// Recover the object key from a public URL built by `ObjectStorage::url_for`
/// (`{scheme}://{host}/{key}`).
fn object_key_from_url(url: &str) -> Option<String> {
    url.splitn(4, '/')
        .nth(3)
        .filter(|key| !key.is_empty())
        .map(|key| key.to_string())
}
