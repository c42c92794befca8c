//! Image storage for contacts backed by an S3-compatible object store
//!
//! Uploads images under unique per-contact keys, hands back CDN or direct
//! store URLs, signs time-limited read URLs and deletes stored objects.

pub mod error;
pub mod gateway;
pub mod keys;
pub mod mime;
pub mod models;
pub mod store;
pub mod urls;

pub use error::{Error, Result};
pub use gateway::ImageGateway;
