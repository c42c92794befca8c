//! Object key naming
//!
//! Every upload gets a fresh `contacts/<contact>/<uuid><ext>` key so
//! concurrent uploads for the same contact never overwrite each other.

use crate::models::ObjectKey;
use crate::{Error, Result};
use uuid::Uuid;

/// Returns the filename suffix starting at the last `.`, e.g. `.png`.
pub fn extract_extension(file_name: &str) -> Result<&str> {
    let idx = file_name
        .rfind('.')
        .ok_or_else(|| Error::InvalidFilename(format!("'{}' has no extension", file_name)))?;

    let extension = &file_name[idx..];
    if extension.contains(['/', '\\']) {
        return Err(Error::InvalidFilename(format!(
            "'{}' has no extension in its final path segment",
            file_name
        )));
    }

    Ok(extension)
}

pub fn validate_contact_id(contact_id: &str) -> Result<()> {
    if contact_id.trim().is_empty() {
        return Err(Error::InvalidContactId("contact id is empty".to_string()));
    }
    if contact_id.contains('/') {
        return Err(Error::InvalidContactId(format!(
            "'{}' must not contain '/'",
            contact_id
        )));
    }
    Ok(())
}

pub fn generate_key(file_name: &str, contact_id: &str) -> Result<ObjectKey> {
    validate_contact_id(contact_id)?;
    let extension = extract_extension(file_name)?;
    let token = Uuid::new_v4().to_string();

    let key = ObjectKey::from_parts(contact_id, &token, extension);
    tracing::debug!("Generated key {} for '{}'", key, file_name);
    Ok(key)
}
