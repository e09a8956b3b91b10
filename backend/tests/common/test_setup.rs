use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use axum::{body::Body, http::Request, response::Response, Extension, Router};
use receipt_backend::{media_storage::MediaStorage, routes, types::Environment};
use tower::ServiceExt;

use super::s3_utils::ensure_bucket;

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Base test setup with core dependencies
#[allow(dead_code)]
pub struct TestSetup {
    pub router: Router,
    pub environment: Environment,
    pub s3_client: Arc<S3Client>,
    pub bucket_name: String,
    pub public_base_url: String,
    pub media_storage: Arc<MediaStorage>,
}

impl TestSetup {
    pub async fn new(upload_url_expiry_override: Option<u64>) -> Self {
        Self::build(upload_url_expiry_override, None).await
    }

    /// Router wired to a bucket that was never created, so storage writes fail
    pub async fn with_missing_bucket() -> Self {
        let bucket = format!("missing-{}", uuid::Uuid::new_v4());
        Self::build(None, Some(bucket)).await
    }

    async fn build(
        upload_url_expiry_override: Option<u64>,
        bucket_override: Option<String>,
    ) -> Self {
        setup_test_env();

        let environment = Environment::Development {
            upload_url_expiry_override,
        };

        let s3_config = environment.s3_client_config().await;
        let s3_client = Arc::new(S3Client::from_conf(s3_config));

        let (bucket_name, public_base_url) = match bucket_override {
            Some(bucket) => {
                let base = format!("http://localhost:4566/{bucket}");
                (bucket, base)
            }
            None => {
                let bucket = environment.s3_bucket();
                ensure_bucket(&s3_client, &bucket, &environment.region()).await;
                (bucket, environment.public_base_url())
            }
        };

        let media_storage = Arc::new(MediaStorage::new(
            s3_client.clone(),
            bucket_name.clone(),
            public_base_url.clone(),
            environment.upload_url_expiry_secs(),
        ));

        let router = routes::handler()
            .layer(Extension(environment.clone()))
            .layer(Extension(media_storage.clone()))
            .into();

        Self {
            router,
            environment,
            s3_client,
            bucket_name,
            public_base_url,
            media_storage,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn parse_response_body(
        &self,
        response: Response,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        use http_body_util::BodyExt;

        let body = response.into_body().collect().await?.to_bytes();
        let json = serde_json::from_slice(&body)?;
        Ok(json)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
