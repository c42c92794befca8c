//! Object store integration
//!
//! Wraps put/get/delete/presign calls against an S3-compatible bucket
//! behind a trait so the gateway can run against an in-memory store.

pub mod client;
pub mod mock;

pub use client::S3ObjectStore;
pub use mock::MockObjectStore;

use crate::models::ObjectKey;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `data` under `key` with a private ACL.
    async fn put_object(&self, key: &ObjectKey, data: &[u8], content_type: &str) -> Result<()>;
    async fn get_object(&self, key: &ObjectKey) -> Result<Vec<u8>>;
    /// Succeeds when the key does not exist.
    async fn delete_object(&self, key: &ObjectKey) -> Result<()>;
    async fn presign_get(&self, key: &ObjectKey, expires_in: Duration) -> Result<String>;
}
