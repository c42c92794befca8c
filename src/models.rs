//! Data models and structures
//!
//! Defines object keys, upload requests and results, and the runtime
//! configuration for the object store and CDN.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Key under which an uploaded object lives in the bucket,
/// e.g. `contacts/42/3f1c...e9.png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Wrap a key previously handed out by an upload.
    pub fn parse(key: impl Into<String>) -> crate::Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(crate::Error::InvalidKey("key is empty".to_string()));
        }
        Ok(Self(key))
    }

    pub(crate) fn from_parts(contact_id: &str, token: &str, extension: &str) -> Self {
        Self(format!("contacts/{}/{}{}", contact_id, token, extension))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectKey {
    type Error = crate::Error;

    fn try_from(key: String) -> crate::Result<Self> {
        Self::parse(key)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An image handed in by the caller for storage.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data,
        }
    }

    /// Read an upload from disk, naming it after the file.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                crate::Error::InvalidFilename(format!("{} has no file name", path.display()))
            })?;
        let data = std::fs::read(path)?;
        Ok(Self::new(file_name, data))
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn content_length(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    pub key: ObjectKey,
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl UploadedImage {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl PresignedUrl {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bucket_name: String,
    pub cdn_domain: Option<String>,
    pub region: String,
    pub endpoint: Option<String>,
    pub force_path_style: bool,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Config {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            cdn_domain: None,
            region: "us-east-1".to_string(),
            endpoint: None,
            force_path_style: false,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    pub fn with_cdn_domain(mut self, cdn_domain: impl Into<String>) -> Self {
        let domain = cdn_domain.into();
        let domain = domain.trim();
        self.cdn_domain = if domain.is_empty() {
            None
        } else {
            Some(domain.to_string())
        };
        self
    }

    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket_name = lookup("AWS_S3_BUCKET_NAME")
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| crate::Error::Config("AWS_S3_BUCKET_NAME not set".to_string()))?;

        let access_key_id = lookup("AWS_ACCESS_KEY_ID").filter(|v| !v.is_empty());
        let secret_access_key = lookup("AWS_SECRET_ACCESS_KEY").filter(|v| !v.is_empty());
        if access_key_id.is_some() != secret_access_key.is_some() {
            return Err(crate::Error::Config(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together".to_string(),
            ));
        }

        let config = Self {
            bucket_name,
            cdn_domain: None,
            region: lookup("AWS_REGION")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "us-east-1".to_string()),
            endpoint: lookup("AWS_S3_ENDPOINT").filter(|v| !v.is_empty()),
            force_path_style: lookup("AWS_S3_FORCE_PATH_STYLE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1"))
                .unwrap_or(false),
            access_key_id,
            secret_access_key,
        };

        Ok(config.with_cdn_domain(lookup("AWS_CLOUDFRONT_DOMAIN").unwrap_or_default()))
    }
}
