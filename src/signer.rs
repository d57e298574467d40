use crate::config::Settings;
use crate::error::IssuerError;
use crate::types::StorageDescriptor;
use aws_config::SdkConfig;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::time::Duration;
use tracing::error;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Produces a pre-signed URL that lets the holder put one object.
pub trait PresignPut {
    /// Signs a put of the object described by `descriptor` and returns the URL.
    fn presign_put(
        &self,
        descriptor: &StorageDescriptor,
    ) -> impl Future<Output = Result<String, IssuerError>> + Send;
}

/// A [`PresignPut`] backed by the AWS S3 client.
///
/// Signing happens locally against the client's credentials; no request is
/// sent to S3 when a URL is issued.
#[derive(Clone, Debug)]
pub struct S3UrlSigner {
    client: aws_sdk_s3::Client,
    url_ttl: Duration,
}

impl S3UrlSigner {
    /// Creates a signer from an existing client and URL lifetime.
    pub fn new(client: aws_sdk_s3::Client, url_ttl: Duration) -> Self {
        Self { client, url_ttl }
    }

    /// Creates a signer from the shared AWS config, overridden by `settings`.
    ///
    /// The region always comes from `settings`. When an endpoint override is
    /// set the client switches to path-style addressing.
    pub fn from_settings(sdk_config: &SdkConfig, settings: &Settings) -> Self {
        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(sdk_config)
            .region(Region::new(settings.region.clone()));

        if let Some(endpoint_url) = &settings.endpoint_url {
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint_url)
                .force_path_style(true);
        }

        let client = aws_sdk_s3::Client::from_conf(s3_config_builder.build());
        Self::new(client, settings.url_ttl)
    }

    /// The lifetime of every URL this signer issues.
    pub fn url_ttl(&self) -> Duration {
        self.url_ttl
    }
}

impl PresignPut for S3UrlSigner {
    async fn presign_put(&self, descriptor: &StorageDescriptor) -> Result<String, IssuerError> {
        let presigning_config = PresigningConfig::expires_in(self.url_ttl)?;
        // Metadata travels in the query string so the uploader only has to send
        // `Content-Type`; it is still covered by the signature.
        let query = metadata_query(&descriptor.metadata);
        let presigned = self
            .client
            .put_object()
            .bucket(&descriptor.bucket)
            .key(&descriptor.key)
            .content_type(&descriptor.content_type)
            .customize()
            .mutate_request(move |req| {
                if query.is_empty() {
                    return;
                }
                let separator = if req.uri().contains('?') { '&' } else { '?' };
                let uri = format!("{}{}{}", req.uri(), separator, query);
                if let Err(e) = req.set_uri(uri) {
                    error!(error = %e, "Failed to attach metadata to upload URL");
                }
            })
            .presigned(presigning_config)
            .await
            .map_err(|e| IssuerError::SigningFailed {
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let upload_url = presigned.uri().to_string();
        let signed = Url::parse(&upload_url).map_err(|e| IssuerError::SigningFailed {
            message: format!("signed URL is malformed: {}", e),
        })?;
        for name in descriptor.metadata.keys() {
            let param = format!("x-amz-meta-{}", name.to_lowercase());
            if !signed.query_pairs().any(|(k, _)| k == param.as_str()) {
                return Err(IssuerError::SigningFailed {
                    message: format!("{} is missing from the signed URL", param),
                });
            }
        }

        Ok(upload_url)
    }
}

/// Encodes metadata as `x-amz-meta-<name>=<value>` query pairs, sorted by name.
fn metadata_query(metadata: &HashMap<String, String>) -> String {
    let sorted: BTreeMap<&String, &String> = metadata.iter().collect();
    sorted
        .into_iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                encode_query_component(&format!("x-amz-meta-{}", name.to_lowercase())),
                encode_query_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

// SigV4 wants spaces as %20, form encoding emits '+' (a literal '+' becomes %2B).
fn encode_query_component(raw: &str) -> String {
    byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
