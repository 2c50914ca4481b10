use crate::error::AppError;
use crate::render::ImageData;
use base64::{engine::general_purpose, Engine as _};

/// Largest upload accepted for rendering
pub const MAX_SIZE_BYTES: usize = 20 * 1024 * 1024; // 20MB (Gemini inline limit)

const SUPPORTED_FORMATS: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/heic"];

/// Parse a data URL (e.g., "data:image/jpeg;base64,<data>") into validated image data
pub fn parse_data_url(data_url: &str) -> Result<ImageData, AppError> {
    let url_body = data_url.strip_prefix("data:").ok_or_else(|| {
        AppError::ImageError("Invalid data URL: must start with 'data:'".to_string())
    })?;

    let (header, data) = url_body.split_once(',').ok_or_else(|| {
        AppError::ImageError("Invalid data URL format: missing comma separator".to_string())
    })?;

    // Parse header: "image/jpeg;base64" or just "image/jpeg"
    let mut header_parts = header.split(';');
    let mime_type = header_parts.next().unwrap_or_default().to_string();
    let is_base64 = header_parts.any(|part| part == "base64");

    if !is_base64 {
        return Err(AppError::ImageError(
            "Only base64-encoded data URLs are supported".to_string(),
        ));
    }

    let decoded = general_purpose::STANDARD
        .decode(data)
        .map_err(|e| AppError::ImageError(format!("Invalid base64 data: {}", e)))?;

    validate_image(&decoded, &mime_type)?;

    Ok(ImageData {
        base64: data.to_string(),
        mime_type: mime_type.to_lowercase(),
    })
}

/// Encode raw image bytes (e.g. a file read by the CLI) into image data
pub fn encode_image(bytes: &[u8], mime_type: &str) -> Result<ImageData, AppError> {
    validate_image(bytes, mime_type)?;

    Ok(ImageData {
        base64: general_purpose::STANDARD.encode(bytes),
        mime_type: mime_type.to_lowercase(),
    })
}

/// Guess a MIME type from a file extension
pub fn mime_from_extension(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Decode a `data:` URL produced by a render back into (mime_type, bytes)
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), AppError> {
    let body = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::ImageError("Invalid data URL".to_string()))?;
    let (header, data) = body
        .split_once(',')
        .ok_or_else(|| AppError::ImageError("Invalid data URL".to_string()))?;
    let mime_type = header.split(';').next().unwrap_or_default().to_string();
    let bytes = general_purpose::STANDARD
        .decode(data)
        .map_err(|e| AppError::ImageError(format!("Invalid base64 data: {}", e)))?;

    Ok((mime_type, bytes))
}

/// Validate image format and size
pub fn validate_image(data: &[u8], mime_type: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::ImageError("Image is empty".to_string()));
    }

    if data.len() > MAX_SIZE_BYTES {
        return Err(AppError::ImageError(format!(
            "Image too large: {} bytes (max: {} bytes)",
            data.len(),
            MAX_SIZE_BYTES
        )));
    }

    let mime_base = mime_type
        .split(';')
        .next()
        .unwrap_or(mime_type)
        .trim()
        .to_lowercase();

    if !SUPPORTED_FORMATS.contains(&mime_base.as_str()) {
        return Err(AppError::ImageError(format!(
            "Unsupported image format: {} (supported: jpeg, png, webp, heic)",
            mime_base
        )));
    }

    Ok(())
}
