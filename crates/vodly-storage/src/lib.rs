//! S3 object storage for uploaded videos.
//!
//! This crate provides:
//! - Randomized, aspect-class-namespaced object keys
//! - An [`ObjectStorage`] trait the pipeline depends on
//! - An aws-sdk-s3 implementation with bounded upload retry
//! - Public URL construction (CDN host or virtual-hosted S3 URL)

pub mod client;
pub mod error;
pub mod key;

pub use client::{ObjectStorage, S3Config, S3Storage};
pub use error::{StorageError, StorageResult};
pub use key::ObjectKey;
