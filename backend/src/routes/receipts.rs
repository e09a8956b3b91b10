use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    media_storage::{BucketError, MediaStorage},
    types::AppError,
};

/// Direct upload request: a base64 image captured by the web client
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UploadReceiptRequest {
    /// Base64-encoded image bytes
    pub image: String,
    /// MIME content type of the decoded image
    #[serde(rename = "type")]
    pub content_type: String,
    /// Filename suffix appended to the generated key, e.g. ".jpg"
    pub suffix: String,
}

/// Direct upload response, returned with the same shape on failure
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadReceiptResponse {
    /// Full object key of the stored receipt
    pub filename: String,
    /// Publicly readable URL of the stored receipt
    pub url: String,
}

/// Camera upload response: where to PUT the photo and under which key
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CameraUploadResponse {
    /// Presigned S3 PUT URL the client uploads the photo to
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
    /// Object key the upload URL is bound to
    #[serde(rename = "photoFilename")]
    pub photo_filename: String,
}

/// Decodes a base64 receipt image and stores it server-side
///
/// The object key is `receipts/<uuid><suffix>`; the suffix comes from the
/// caller and is used verbatim. Returns the key and the public URL of the
/// stored object.
///
/// A storage-write failure keeps the `{filename, url}` body shape with a
/// 500 status; only the log line carries the cause.
///
/// # Errors
///
/// Returns `AppError` (400, `invalid_input`) when `image` is not valid base64
#[instrument(skip(media_storage, payload))]
pub async fn upload_receipt(
    Extension(media_storage): Extension<Arc<MediaStorage>>,
    Json(payload): Json<UploadReceiptRequest>,
) -> Result<Response, AppError> {
    let image = STANDARD
        .decode(payload.image.as_bytes())
        .map_err(|e| BucketError::InvalidInput(format!("image is not valid base64: {e}")))?;

    tracing::info!(
        image_bytes = image.len(),
        content_type = %payload.content_type,
        suffix = %payload.suffix,
        "Received direct receipt upload"
    );

    let filename = MediaStorage::receipt_key(&payload.suffix);
    let url = media_storage.public_url(&filename);
    let body = UploadReceiptResponse {
        filename: filename.clone(),
        url,
    };

    match media_storage
        .put_receipt(&filename, &payload.content_type, image)
        .await
    {
        Ok(()) => Ok((StatusCode::OK, Json(body)).into_response()),
        Err(err) => {
            tracing::error!("Failed to store receipt {filename}: {err}");
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}

/// Creates a presigned URL for uploading a camera photo directly to S3
///
/// Generates a fresh `<uuid>.jpg` key and signs a PUT for it with content
/// type `image/jpeg`. The URL is only valid for the configured expiry
/// window; the client performs the upload itself.
///
/// # Errors
///
/// Returns `AppError` when presigned URL generation fails
#[instrument(skip(media_storage))]
pub async fn create_camera_upload_url(
    Extension(media_storage): Extension<Arc<MediaStorage>>,
) -> Result<Json<CameraUploadResponse>, AppError> {
    let photo_filename = MediaStorage::camera_key();

    let presigned = media_storage
        .generate_presigned_put_url(&photo_filename, mime::IMAGE_JPEG.essence_str())
        .await?;

    tracing::info!(
        expires_at = %presigned.expires_at.to_rfc3339(),
        "Generated camera upload URL for {photo_filename}"
    );

    Ok(Json(CameraUploadResponse {
        upload_url: presigned.url,
        photo_filename,
    }))
}
