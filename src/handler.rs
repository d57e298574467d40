use crate::config::Settings;
use crate::error::IssuerError;
use crate::signer::PresignPut;
use crate::types::{ProxyResponse, StorageDescriptor, UploadEvent, UploadParams, UploadUrlBody};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, info};

pub const CAMERA_ID_PARAM: &str = "cameraid";
pub const ASSEMBLY_LINE_ID_PARAM: &str = "assemblylineid";
pub const IMAGE_ID_PARAM: &str = "imageid";

pub const DEFAULT_CAMERA_ID: &str = "cameraid";
pub const DEFAULT_ASSEMBLY_LINE_ID: &str = "assemblylineid";
pub const DEFAULT_IMAGE_ID: &str = "imageid";

pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Returns the value of `field` in `params` if it is present and non-empty,
/// otherwise `fallback`.
pub fn resolve(params: Option<&HashMap<String, String>>, field: &str, fallback: &str) -> String {
    match params.and_then(|p| p.get(field)) {
        Some(value) if !value.is_empty() => {
            debug!(field, value = %value, "Using caller-supplied value");
            value.clone()
        }
        _ => fallback.to_string(),
    }
}

impl UploadParams {
    /// Extracts the identifiers from the event's query string, defaulting each
    /// one that is absent or empty.
    pub fn from_event(event: &UploadEvent) -> Self {
        let params = event.query_string_parameters.as_ref();
        Self {
            camera_id: resolve(params, CAMERA_ID_PARAM, DEFAULT_CAMERA_ID),
            assembly_line_id: resolve(params, ASSEMBLY_LINE_ID_PARAM, DEFAULT_ASSEMBLY_LINE_ID),
            image_id: resolve(params, IMAGE_ID_PARAM, DEFAULT_IMAGE_ID),
        }
    }
}

impl StorageDescriptor {
    /// Describes the JPEG object an upload of `params` writes into `bucket`.
    ///
    /// The image id is the object key, and all three identifiers are attached
    /// as object metadata.
    pub fn for_upload(bucket: &str, params: &UploadParams) -> Self {
        let metadata = HashMap::from([
            (CAMERA_ID_PARAM.to_string(), params.camera_id.clone()),
            (ASSEMBLY_LINE_ID_PARAM.to_string(), params.assembly_line_id.clone()),
            (IMAGE_ID_PARAM.to_string(), params.image_id.clone()),
        ]);

        Self {
            bucket: bucket.to_string(),
            key: params.image_id.clone(),
            content_type: IMAGE_CONTENT_TYPE.to_string(),
            metadata,
        }
    }
}

/// Issues pre-signed upload URLs for camera images.
///
/// Built once per process and shared by every invocation; it holds no
/// mutable state.
#[derive(Clone, Debug)]
pub struct UploadUrlIssuer<S> {
    signer: S,
    bucket: String,
}

impl<S: PresignPut> UploadUrlIssuer<S> {
    /// Creates an issuer that signs uploads into `bucket`.
    pub fn new(signer: S, bucket: impl Into<String>) -> Self {
        Self {
            signer,
            bucket: bucket.into(),
        }
    }

    /// Creates an issuer targeting the configured bucket.
    pub fn from_settings(signer: S, settings: &Settings) -> Self {
        Self::new(signer, settings.bucket.clone())
    }

    /// The bucket uploads are signed for.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Handles one invocation.
    ///
    /// Always produces a response: a 200 carrying the URL, or a 500 with a
    /// JSON error message if signing failed.
    pub async fn handle(&self, event: UploadEvent) -> ProxyResponse {
        match self.try_handle(event).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Failed to issue upload URL");
                error_response(&e)
            }
        }
    }

    /// Handles one invocation, returning signing failures to the caller.
    ///
    /// # Errors
    ///
    /// - `IssuerError::SigningFailed` or `IssuerError::PresigningConfig` if the
    ///   signer rejects the request.
    /// - `IssuerError::ResponseSerialize` if the body cannot be encoded.
    pub async fn try_handle(&self, event: UploadEvent) -> Result<ProxyResponse, IssuerError> {
        let params = UploadParams::from_event(&event);
        info!(
            camera_id = %params.camera_id,
            assembly_line_id = %params.assembly_line_id,
            image_id = %params.image_id,
            "Resolved upload parameters"
        );

        let descriptor = StorageDescriptor::for_upload(&self.bucket, &params);
        info!(bucket = %descriptor.bucket, key = %descriptor.key, "Signing upload URL");

        let upload_url = self.signer.presign_put(&descriptor).await?;

        let body = serde_json::to_string(&UploadUrlBody {
            upload_url: &upload_url,
            photo_filename: &params.image_id,
        })?;
        let response = envelope(200, body);

        info!(status = response.status_code, body = %response.body, "Result");
        Ok(response)
    }
}

fn envelope(status_code: u16, body: String) -> ProxyResponse {
    ProxyResponse {
        status_code,
        is_base64_encoded: false,
        headers: BTreeMap::from([(
            "Access-Control-Allow-Origin".to_string(),
            "*".to_string(),
        )]),
        body,
    }
}

fn error_response(err: &IssuerError) -> ProxyResponse {
    envelope(500, json!({ "message": err.to_string() }).to_string())
}
