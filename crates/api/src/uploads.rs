//! Upload handling — persists multipart image parts to the upload
//! directory and returns the `/uploads/...` paths stored on records.
//!
//! Files are renamed to UUIDs; the original name only contributes its
//! extension. The directory itself is served statically by the router.

use axum::extract::multipart::Field;
use uuid::Uuid;

use mandi_common::error::AppError;

/// Extensions accepted for image uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Persist one multipart image field, returning its public `/uploads/...`
/// path.
pub async fn store_image(upload_dir: &str, field: Field<'_>) -> Result<String, AppError> {
    let extension = resolve_extension(field.file_name(), field.content_type())?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Upload(format!("Failed to read upload: {}", e)))?;
    if data.is_empty() {
        return Err(AppError::Upload("Uploaded file is empty".to_string()));
    }

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Cannot create upload dir: {}", e)))?;

    let file_name = format!("{}.{}", Uuid::new_v4(), extension);
    let path = std::path::Path::new(upload_dir).join(&file_name);
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| AppError::Internal(format!("Cannot write upload: {}", e)))?;

    tracing::debug!(file = %file_name, bytes = data.len(), "Stored upload");

    Ok(format!("/uploads/{}", file_name))
}

/// Work out the stored extension from the client file name, falling back
/// to the part's content type. Non-image uploads are rejected.
fn resolve_extension(
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<String, AppError> {
    if let Some(name) = file_name
        && let Some((_, ext)) = name.rsplit_once('.')
    {
        let ext = ext.to_ascii_lowercase();
        if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Ok(ext);
        }
    }

    match content_type {
        Some("image/jpeg") => Ok("jpg".to_string()),
        Some("image/png") => Ok("png".to_string()),
        Some("image/webp") => Ok("webp".to_string()),
        _ => Err(AppError::Upload(
            "Only jpg, jpeg, png and webp images are accepted".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_file_name() {
        assert_eq!(resolve_extension(Some("car.JPG"), None).unwrap(), "jpg");
        assert_eq!(resolve_extension(Some("a.b.webp"), None).unwrap(), "webp");
    }

    #[test]
    fn test_extension_from_content_type() {
        assert_eq!(
            resolve_extension(Some("blob"), Some("image/png")).unwrap(),
            "png"
        );
        assert_eq!(resolve_extension(None, Some("image/jpeg")).unwrap(), "jpg");
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(resolve_extension(Some("malware.exe"), None).is_err());
        assert!(resolve_extension(Some("doc.pdf"), Some("application/pdf")).is_err());
        assert!(resolve_extension(None, None).is_err());
    }
}
