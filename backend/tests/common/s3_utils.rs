use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client as S3Client;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};

/// Creates the test bucket on LocalStack if it does not exist yet
pub async fn ensure_bucket(client: &S3Client, bucket_name: &str, region: &str) {
    let result = client
        .create_bucket()
        .bucket(bucket_name)
        .create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build(),
        )
        .send()
        .await;

    match result {
        Ok(_) => {}
        // The bucket persisting across test runs is fine
        Err(SdkError::ServiceError(err))
            if err.err().is_bucket_already_owned_by_you()
                || err.err().is_bucket_already_exists() => {}
        Err(e) => panic!("failed to create test bucket {bucket_name}: {e}"),
    }
}

/// Upload data to S3 using a presigned camera-upload URL
///
/// Sends the headers the signature covers: content type, public-read ACL
/// and the cache lifetime hint.
pub async fn upload_to_s3(
    presigned_url: &str,
    data: &[u8],
    content_type: &str,
) -> Result<reqwest::Response, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_LENGTH, HeaderValue::from(data.len()));
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=31104000"));
    headers.insert("x-amz-acl", HeaderValue::from_static("public-read"));

    let client = reqwest::Client::new();
    client
        .put(presigned_url)
        .headers(headers)
        .body(data.to_vec())
        .send()
        .await
}

/// Download data from S3 using the S3 client directly
pub async fn download_from_s3(
    client: &S3Client,
    bucket: &str,
    key: &str,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let object = client.get_object().bucket(bucket).key(key).send().await?;
    let data = object.body.collect().await?;
    Ok(data.into_bytes().to_vec())
}

/// Download data from a public asset URL using HTTP
pub async fn download_from_asset_url(
    asset_url: &str,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client.get(asset_url).send().await?;

    if response.status().is_success() {
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    } else {
        Err(format!(
            "Failed to download from {}: HTTP {}",
            asset_url,
            response.status()
        )
        .into())
    }
}

/// Check if an object exists in the bucket
pub async fn s3_object_exists(
    client: &S3Client,
    bucket: &str,
    key: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    match client.head_object().bucket(bucket).key(key).send().await {
        Ok(_) => Ok(true),
        Err(SdkError::ServiceError(err)) if matches!(err.err(), HeadObjectError::NotFound(_)) => {
            Ok(false)
        }
        Err(e) => Err(Box::new(e)),
    }
}
