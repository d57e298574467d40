//! A Lambda handler that issues pre-signed S3 upload URLs for camera images.
//!
//! A camera on an assembly line calls the function with its camera id, the
//! assembly line id and an image id in the query string. The function answers
//! with a time-limited URL the camera can `PUT` a JPEG to, plus the object key
//! the image will be stored under.
//!
//! ## Features
//! - Defaulting of absent or empty identifiers to fixed literals.
//! - Object metadata mirroring the resolved identifiers.
//! - Local SigV4 presigning through the AWS SDK; no request is made to S3.
//! - Typed errors mapped to a JSON 500 response instead of a failed invocation.

pub mod config;
pub mod error;
pub mod handler;
pub mod signer;
pub mod types;

pub use config::Settings;
pub use error::IssuerError;
pub use handler::{resolve, UploadUrlIssuer};
pub use signer::{PresignPut, S3UrlSigner};
pub use types::{ProxyResponse, StorageDescriptor, UploadEvent, UploadParams};
