//! Gateway between callers handling contact images and the object store.

use crate::keys::{extract_extension, generate_key};
use crate::mime::resolve_content_type;
use crate::models::{Config, ImageUpload, ObjectKey, PresignedUrl, UploadedImage};
use crate::store::{ObjectStore, S3ObjectStore};
use crate::urls::derive_access_url;
use crate::{Error, Result};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info};

/// Longest lifetime a SigV4 presigned URL may have (7 days).
pub const MAX_PRESIGN_MINUTES: i64 = 7 * 24 * 60;

/// Uploads, signs and deletes contact images in a single bucket.
pub struct ImageGateway {
    store: Box<dyn ObjectStore>,
    bucket_name: String,
    cdn_domain: Option<String>,
}

impl ImageGateway {
    /// Build a gateway over an arbitrary store.
    ///
    /// Tests use this to run against [`crate::store::MockObjectStore`] with a
    /// per-test bucket and CDN setting.
    pub fn with_store(store: Box<dyn ObjectStore>, config: &Config) -> Self {
        Self {
            store,
            bucket_name: config.bucket_name.clone(),
            cdn_domain: config.cdn_domain.clone(),
        }
    }

    /// Construct a gateway talking to S3 as described by `config`.
    pub async fn new(config: &Config) -> Result<Self> {
        let store = S3ObjectStore::new(config).await?;
        info!(
            "Using bucket {} (CDN: {})",
            config.bucket_name,
            config.cdn_domain.as_deref().unwrap_or("none")
        );
        Ok(Self::with_store(Box::new(store), config))
    }

    /// Store an image for `contact_id` and return the URL it is served from.
    pub async fn upload(&self, upload: ImageUpload, contact_id: &str) -> Result<String> {
        Ok(self.upload_image(upload, contact_id).await?.url)
    }

    /// Like [`ImageGateway::upload`], but also returns the generated key so
    /// the caller can delete or sign it later.
    pub async fn upload_image(
        &self,
        upload: ImageUpload,
        contact_id: &str,
    ) -> Result<UploadedImage> {
        let key = generate_key(&upload.file_name, contact_id)?;
        let extension = extract_extension(&upload.file_name)?;
        let content_type =
            resolve_content_type(upload.content_type.as_deref(), &upload.data, extension);

        self.store
            .put_object(&key, &upload.data, &content_type)
            .await?;

        let url = self.access_url(&key);
        info!(
            "Uploaded {} ({} bytes, {}) for contact {}",
            key,
            upload.content_length(),
            content_type,
            contact_id
        );

        Ok(UploadedImage {
            key,
            url,
            content_type,
            size: upload.content_length(),
        })
    }

    /// Time-limited signed GET URL for a stored object.
    pub async fn generate_presigned_url(
        &self,
        key: &ObjectKey,
        expiration_minutes: i64,
    ) -> Result<PresignedUrl> {
        if expiration_minutes <= 0 {
            return Err(Error::InvalidExpiration(format!(
                "expiration must be positive, got {} minutes",
                expiration_minutes
            )));
        }
        if expiration_minutes > MAX_PRESIGN_MINUTES {
            return Err(Error::InvalidExpiration(format!(
                "expiration of {} minutes exceeds the maximum of {}",
                expiration_minutes, MAX_PRESIGN_MINUTES
            )));
        }

        let expires_at = Utc::now() + chrono::Duration::minutes(expiration_minutes);
        let expires_in = Duration::from_secs(expiration_minutes as u64 * 60);
        let url = self.store.presign_get(key, expires_in).await?;
        debug!("Presigned {} until {}", key, expires_at.to_rfc3339());

        Ok(PresignedUrl { url, expires_at })
    }

    /// Remove a stored object. Deleting a missing key succeeds.
    pub async fn delete(&self, key: &ObjectKey) -> Result<()> {
        self.store.delete_object(key).await?;
        info!("Deleted {}", key);
        Ok(())
    }

    pub async fn fetch(&self, key: &ObjectKey) -> Result<Vec<u8>> {
        self.store.get_object(key).await
    }

    pub fn access_url(&self, key: &ObjectKey) -> String {
        derive_access_url(self.cdn_domain.as_deref(), &self.bucket_name, key)
    }
}
