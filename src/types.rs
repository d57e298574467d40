use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The inbound invocation payload.
///
/// Only the query string matters here; every other field the gateway sends
/// (headers, request context, body) is ignored during deserialization.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadEvent {
    /// Query string parameters. The gateway sends `null` when the request has none.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl UploadEvent {
    /// Builds an event carrying the given query string parameters.
    pub fn with_query<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            query_string_parameters: Some(
                params
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

/// The identifiers of one upload, after defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadParams {
    /// The camera that took the image.
    pub camera_id: String,
    /// The assembly line the camera watches.
    pub assembly_line_id: String,
    /// The image identifier, also used as the object key.
    pub image_id: String,
}

/// The target object of a pre-signed put: bucket, key, content type and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageDescriptor {
    /// The name of the S3 bucket.
    pub bucket: String,
    /// The key of the object within the bucket.
    pub key: String,
    /// The content type the uploader must send.
    pub content_type: String,
    /// User metadata stored with the object (`x-amz-meta-*`).
    pub metadata: HashMap<String, String>,
}

/// (Internal) The JSON body of a successful response.
#[derive(Serialize, Debug)]
pub(crate) struct UploadUrlBody<'a> {
    #[serde(rename = "uploadURL")]
    pub(crate) upload_url: &'a str,
    #[serde(rename = "photoFilename")]
    pub(crate) photo_filename: &'a str,
}

/// A gateway proxy response envelope. The body is a JSON document encoded as a string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub is_base64_encoded: bool,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}
