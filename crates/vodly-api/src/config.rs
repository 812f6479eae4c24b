//! API configuration.

use anyhow::Context;

/// Hard ceiling on upload body size: 1 GiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 1 << 30;

/// API server configuration.
///
/// Built once at startup and carried inside [`crate::state::AppState`];
/// nothing in the pipeline reads the environment directly.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Secret used to validate bearer tokens
    pub jwt_secret: String,
    /// Upper bound on request body size for uploads
    pub max_upload_bytes: usize,
    /// Timeout applied to ffprobe/ffmpeg subprocess calls
    pub ffmpeg_timeout_secs: u64,
    /// Timeout applied to the storage upload
    pub upload_timeout_secs: u64,
    /// Environment (development/production)
    pub environment: String,
}

impl ApiConfig {
    /// Create config from environment variables. Fails if `JWT_SECRET` is
    /// missing; everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET not set")?,
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            ffmpeg_timeout_secs: std::env::var("FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
            upload_timeout_secs: std::env::var("UPLOAD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
