pub const OCTET_STREAM: &str = "application/octet-stream";

pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

pub fn mime_from_extension(extension: &str) -> Option<&'static str> {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Picks the content type to store: the declared one, else sniffed bytes,
/// else the extension, else `application/octet-stream`.
pub fn resolve_content_type(declared: Option<&str>, bytes: &[u8], extension: &str) -> String {
    if let Some(declared) = declared.filter(|d| !d.is_empty() && *d != OCTET_STREAM) {
        return declared.to_string();
    }

    if let Some(sniffed) = detect_image_mime(bytes).or_else(|| mime_from_extension(extension)) {
        return sniffed.to_string();
    }

    tracing::warn!(
        "Unrecognized image format (first 4 bytes: {:02X?}), falling back to {}",
        &bytes[..bytes.len().min(4)],
        OCTET_STREAM
    );
    OCTET_STREAM.to_string()
}
