//! Public URL derivation for stored objects.

use crate::models::ObjectKey;

/// URL served straight from the bucket, bypassing any CDN.
pub fn direct_store_url(bucket_name: &str, key: &ObjectKey) -> String {
    format!("https://{}.s3.amazonaws.com/{}", bucket_name, key)
}

/// CDN URL when a domain is configured, otherwise the direct store URL.
pub fn derive_access_url(cdn_domain: Option<&str>, bucket_name: &str, key: &ObjectKey) -> String {
    match cdn_domain.filter(|d| !d.is_empty()) {
        Some(domain) => format!("https://{}/{}", domain, key),
        None => direct_store_url(bucket_name, key),
    }
}
