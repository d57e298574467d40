#![allow(dead_code)]

use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use upload_url_issuer::{IssuerError, PresignPut, S3UrlSigner, StorageDescriptor};

pub const TEST_BUCKET: &str = "assembly-line-uploads";

/// A signer that records every descriptor and returns a fixed URL.
#[derive(Clone, Default)]
pub struct RecordingSigner {
    seen: Arc<Mutex<Vec<StorageDescriptor>>>,
}

impl RecordingSigner {
    pub fn descriptors(&self) -> Vec<StorageDescriptor> {
        self.seen.lock().unwrap().clone()
    }
}

impl PresignPut for RecordingSigner {
    async fn presign_put(&self, descriptor: &StorageDescriptor) -> Result<String, IssuerError> {
        self.seen.lock().unwrap().push(descriptor.clone());
        Ok(format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Signature=mock",
            descriptor.bucket, descriptor.key
        ))
    }
}

/// A signer that always fails, as the S3 client does without credentials.
pub struct FailingSigner;

impl PresignPut for FailingSigner {
    async fn presign_put(&self, _descriptor: &StorageDescriptor) -> Result<String, IssuerError> {
        Err(IssuerError::SigningFailed {
            message: "no credentials in the provider chain".to_string(),
        })
    }
}

/// Builds a real S3 signer over static test credentials, optionally pointed at
/// a mock endpoint with path-style addressing.
pub fn static_s3_signer(endpoint_url: Option<&str>, url_ttl: Duration) -> S3UrlSigner {
    let credentials = Credentials::new("AKIDEXAMPLE", "test-secret-key", None, None, "test");
    let mut builder = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("eu-west-1"))
        .credentials_provider(credentials);

    if let Some(endpoint_url) = endpoint_url {
        builder = builder.endpoint_url(endpoint_url).force_path_style(true);
    }

    S3UrlSigner::new(aws_sdk_s3::Client::from_conf(builder.build()), url_ttl)
}
