use crate::error::IssuerError;
use std::env;
use std::time::Duration;

pub const BUCKET_VAR: &str = "UploadBucket";
pub const REGION_VAR: &str = "AWS_REGION";
pub const URL_TTL_VAR: &str = "UPLOAD_URL_TTL_SECS";
pub const ENDPOINT_VAR: &str = "S3_ENDPOINT_URL";

pub const DEFAULT_REGION: &str = "eu-west-1";
pub const DEFAULT_URL_TTL: Duration = Duration::from_secs(900);

// Longest lifetime SigV4 accepts for a pre-signed request.
const MAX_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The bucket uploads are written to.
    pub bucket: String,
    /// The AWS region of the bucket.
    pub region: String,
    /// How long an issued URL stays valid.
    pub url_ttl: Duration,
    /// An alternate S3 endpoint, e.g. a local emulator. Enables path-style addressing.
    pub endpoint_url: Option<String>,
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// # Errors
    ///
    /// - `IssuerError::MissingSetting` if `UploadBucket` is unset or empty.
    /// - `IssuerError::InvalidSetting` if `UPLOAD_URL_TTL_SECS` is not a valid lifetime.
    pub fn from_env() -> Result<Self, IssuerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolves the settings against an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IssuerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bucket = var(BUCKET_VAR).ok_or(IssuerError::MissingSetting(BUCKET_VAR))?;
        let region = var(REGION_VAR).unwrap_or_else(|| DEFAULT_REGION.to_string());
        let url_ttl = match var(URL_TTL_VAR) {
            Some(raw) => parse_ttl(&raw)?,
            None => DEFAULT_URL_TTL,
        };
        let endpoint_url = var(ENDPOINT_VAR);

        Ok(Self {
            bucket,
            region,
            url_ttl,
            endpoint_url,
        })
    }
}

fn parse_ttl(raw: &str) -> Result<Duration, IssuerError> {
    let secs: u64 = raw.trim().parse().map_err(|_| IssuerError::InvalidSetting {
        name: URL_TTL_VAR,
        message: format!("expected a number of seconds, got {:?}", raw),
    })?;

    if secs == 0 || secs > MAX_URL_TTL_SECS {
        return Err(IssuerError::InvalidSetting {
            name: URL_TTL_VAR,
            message: format!("must be between 1 and {} seconds, got {}", MAX_URL_TTL_SECS, secs),
        });
    }

    Ok(Duration::from_secs(secs))
}
