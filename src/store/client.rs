use super::ObjectStore;
use crate::models::{Config, ObjectKey};
use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{
    config::{Credentials, Region},
    types::ObjectCannedAcl,
    Client as S3Client,
};
use std::time::Duration;

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub async fn new(config: &Config) -> Result<Self> {
        // One attempt per call; failures go straight back to the caller.
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled());

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "contact-image-store",
            ));
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self::from_client(
            S3Client::from_conf(s3_config),
            config.bucket_name.clone(),
        ))
    }

    pub fn from_client(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// A missing key is a `NoSuchKey` code, or a bare 404 carrying no code.
/// Other coded 404s (`NoSuchBucket`, ...) are store failures.
fn is_missing_key<E: ProvideErrorMetadata>(err: &SdkError<E>) -> bool {
    match err.as_service_error().and_then(|se| se.code()) {
        Some(code) => code == "NoSuchKey",
        None => err
            .raw_response()
            .map(|response| response.status().as_u16() == 404)
            .unwrap_or(false),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &ObjectKey, data: &[u8], content_type: &str) -> Result<()> {
        let body = ByteStream::from(data.to_vec());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .body(body)
            .content_type(content_type)
            .content_length(data.len() as i64)
            .acl(ObjectCannedAcl::Private)
            .send()
            .await
            .map_err(|e| Error::StorageUnavailable(format!("Failed to upload {}: {}", key, e)))?;

        Ok(())
    }

    async fn get_object(&self, key: &ObjectKey) -> Result<Vec<u8>> {
        let response = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if is_missing_key(&e) => {
                return Err(Error::NotFound(key.to_string()));
            }
            Err(e) => {
                return Err(Error::StorageUnavailable(format!(
                    "Failed to read {}: {}",
                    key, e
                )))
            }
        };

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| Error::StorageUnavailable(format!("Failed to read body: {}", e)))?;

        Ok(bytes.to_vec())
    }

    async fn delete_object(&self, key: &ObjectKey) -> Result<()> {
        match self
            .client
            .delete_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_missing_key(&e) => {
                tracing::debug!("Delete of missing key {} treated as success", key);
                Ok(())
            }
            Err(e) => Err(Error::StorageUnavailable(format!(
                "Failed to delete {}: {}",
                key, e
            ))),
        }
    }

    async fn presign_get(&self, key: &ObjectKey, expires_in: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| Error::InvalidExpiration(format!("Presigning config error: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .presigned(presigning)
            .await
            .map_err(|e| Error::StorageUnavailable(format!("Failed to presign {}: {}", key, e)))?;

        Ok(request.uri().to_string())
    }
}
