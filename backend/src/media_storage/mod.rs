//! S3-based receipt photo storage operations
mod error;

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::{
    error::SdkError, presigning::PresigningConfig, primitives::ByteStream,
    types::ObjectCannedAcl, Client as S3Client,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use error::{BucketError, BucketResult};

/// Bucket folder that direct uploads land in
const RECEIPT_FOLDER: &str = "receipts/";

/// Cache lifetime hint stamped on camera uploads (360 days)
const CAMERA_UPLOAD_CACHE_CONTROL: &str = "max-age=31104000";

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for PUT operations
    pub url: String,
    /// ISO-8601 UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Receipt photo storage client for S3 operations
pub struct MediaStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    public_base_url: String,
    upload_url_expiry_secs: u64,
}

impl MediaStorage {
    /// Creates a new media storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for receipt storage
    /// * `public_base_url` - Base URL under which stored objects are publicly readable
    /// * `upload_url_expiry_secs` - Expiry time for presigned upload URLs in seconds
    #[must_use]
    pub const fn new(
        s3_client: Arc<S3Client>,
        bucket_name: String,
        public_base_url: String,
        upload_url_expiry_secs: u64,
    ) -> Self {
        Self {
            s3_client,
            bucket_name,
            public_base_url,
            upload_url_expiry_secs,
        }
    }

    /// Generates a fresh object key for a direct receipt upload
    ///
    /// The suffix is caller-supplied and appended verbatim; the random UUID
    /// makes the key unique within the bucket namespace.
    #[must_use]
    pub fn receipt_key(suffix: &str) -> String {
        format!("{RECEIPT_FOLDER}{}{suffix}", Uuid::new_v4())
    }

    /// Generates a fresh object key for a camera photo upload
    #[must_use]
    pub fn camera_key() -> String {
        format!("{}.jpg", Uuid::new_v4())
    }

    /// Publicly readable URL of an object key
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    /// Writes a decoded receipt image to the bucket, publicly readable
    ///
    /// # Arguments
    ///
    /// * `key` - The object key to write to
    /// * `content_type` - MIME type of the image bytes
    /// * `image` - The decoded image bytes
    ///
    /// # Errors
    ///
    /// Returns `BucketError::UpstreamError` for 5xx errors from S3
    /// Returns `BucketError::S3Error` for other S3 service errors
    pub async fn put_receipt(
        &self,
        key: &str,
        content_type: &str,
        image: Vec<u8>,
    ) -> BucketResult<()> {
        let result = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .content_encoding("base64")
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(image))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(SdkError::ServiceError(service_err))
                if service_err.raw().status().as_u16() >= 500 =>
            {
                Err(BucketError::UpstreamError(format!("{service_err:?}")))
            }
            Err(e) => Err(BucketError::from(e)),
        }
    }

    /// Generates a presigned URL authorizing a PUT of the given key
    ///
    /// The signed request carries a public-read ACL and a long cache
    /// lifetime hint; the signature is only valid for the configured
    /// expiry window.
    ///
    /// # Errors
    ///
    /// Returns `BucketError::S3Error` if presigned URL generation fails
    /// Returns `BucketError::ConfigError` if presigning config creation fails
    pub async fn generate_presigned_put_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> BucketResult<PresignedUrl> {
        let presigned_config =
            PresigningConfig::expires_in(Duration::from_secs(self.upload_url_expiry_secs))
                .map_err(|e| {
                    BucketError::ConfigError(format!("Failed to create presigning config: {e}"))
                })?;

        let presigned_url = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .cache_control(CAMERA_UPLOAD_CACHE_CONTROL)
            .acl(ObjectCannedAcl::PublicRead)
            .presigned(presigned_config)
            .await
            .map_err(|e| BucketError::S3Error(format!("Failed to generate presigned URL: {e}")))?;

        let expires_at: DateTime<Utc> =
            Utc::now() + Duration::from_secs(self.upload_url_expiry_secs);

        Ok(PresignedUrl {
            url: presigned_url.uri().to_string(),
            expires_at,
        })
    }
}
