//! Axum HTTP API server.
//!
//! This crate provides:
//! - The video upload pipeline (`POST /api/videos/:video_id`)
//! - Video record CRUD for authenticated users
//! - JWT bearer authentication
//! - Request logging and error-to-status mapping

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
