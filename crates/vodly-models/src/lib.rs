//! Shared data models for the Vodly backend.
//!
//! This crate provides Serde-serializable types for:
//! - Video records and their identifiers
//! - Aspect-ratio classification used for storage namespacing

pub mod aspect;
pub mod video;

pub use aspect::AspectClass;
pub use video::{VideoId, VideoRecord};
