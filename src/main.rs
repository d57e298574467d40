use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upload_url_issuer::{ProxyResponse, S3UrlSigner, Settings, UploadEvent, UploadUrlIssuer};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json().without_time())
        .init();

    // A missing bucket stops the function here, before any request is served.
    let settings = Settings::from_env()?;
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let signer = S3UrlSigner::from_settings(&sdk_config, &settings);
    let issuer = UploadUrlIssuer::from_settings(signer, &settings);

    info!(
        bucket = %settings.bucket,
        region = %settings.region,
        url_ttl_secs = settings.url_ttl.as_secs(),
        "Upload URL issuer starting"
    );

    run(service_fn(|event| function_handler(event, &issuer))).await
}

async fn function_handler(
    event: LambdaEvent<UploadEvent>,
    issuer: &UploadUrlIssuer<S3UrlSigner>,
) -> Result<ProxyResponse, Error> {
    Ok(issuer.handle(event.payload).await)
}
