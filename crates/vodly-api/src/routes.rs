//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{health, ready};
use crate::handlers::upload::upload_video;
use crate::handlers::videos::{create_video, delete_video, get_video, list_videos};
use crate::middleware::{cors_layer, request_context};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/videos", post(create_video).get(list_videos))
        .route(
            "/videos/:video_id",
            post(upload_video).get(get_video).delete(delete_video),
        );

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(from_fn(request_context))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
