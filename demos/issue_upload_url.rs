//! This example issues a single upload URL locally, without the Lambda runtime.
//!
//! It reads the same settings as the deployed function (`UploadBucket` is required,
//! `AWS_REGION`, `UPLOAD_URL_TTL_SECS` and `S3_ENDPOINT_URL` are optional), builds
//! the issuer and prints the response envelope it would return.
//!
//! Usage:
//! `cargo run --example issue_upload_url -- <imageid> [cameraid] [assemblylineid]`

use aws_config::BehaviorVersion;
use std::env;
use upload_url_issuer::{S3UrlSigner, Settings, UploadEvent, UploadUrlIssuer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let issuer = UploadUrlIssuer::from_settings(
        S3UrlSigner::from_settings(&sdk_config, &settings),
        &settings,
    );

    let query: Vec<_> = ["imageid", "cameraid", "assemblylineid"]
        .into_iter()
        .zip(env::args().skip(1))
        .collect();

    println!("Issuing upload URL into bucket '{}'", issuer.bucket());
    let response = issuer.try_handle(UploadEvent::with_query(query)).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
