use crate::error::{MarkitError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

/// Reads a file and returns its content as base64, without a data-URI prefix.
pub async fn file_to_base64(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    log::debug!("Encoding file: {}", path.display());
    let bytes = tokio::fs::read(path).await?;
    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// `data:image/png;base64,AAAA` becomes `AAAA`; anything else is returned as is.
pub fn strip_data_uri_prefix(text: &str) -> &str {
    if text.starts_with("data:") {
        if let Some((_, payload)) = text.split_once(',') {
            return payload;
        }
    }
    text
}

pub fn to_data_uri(mime_type: &str, data: &str) -> String {
    format!("data:{};base64,{}", mime_type, data)
}

/// Splits `data:<mime>;base64,<payload>` into its mime type and decoded bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let (header, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| MarkitError::InvalidInput("not a data URI".into()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| MarkitError::InvalidInput("data URI is not base64 encoded".into()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| MarkitError::InvalidInput(format!("invalid base64 payload: {}", e)))?;
    Ok((mime_type.to_string(), bytes))
}

/// File extension for an image mime type; `bin` when the type is not one we know.
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

/// Mime type for the raster formats the upload form accepts.
pub fn guess_mime_type(path: impl AsRef<Path>) -> Option<&'static str> {
    let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
