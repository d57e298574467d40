#[derive(Debug, thiserror::Error)]
pub enum IssuerError {
    #[error("Required setting {0} is missing. Set it in the function environment.")]
    MissingSetting(&'static str),
    #[error("Setting {name} is invalid: {message}")]
    InvalidSetting { name: &'static str, message: String },
    #[error("Invalid presigning configuration: {0}")]
    PresigningConfig(#[from] aws_sdk_s3::presigning::PresigningConfigError),
    #[error("Failed to presign upload URL: {message}")]
    SigningFailed { message: String },
    #[error("Failed to serialize response body: {0}")]
    ResponseSerialize(#[from] serde_json::Error),
}
