//! Configuration for Parcel

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection settings for a single bucket in a single region
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_key: String,

    /// Temporary credentials token, sent as `x-amz-security-token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    /// Base URL override for S3-compatible services (e.g. `http://localhost:9000`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ClientConfig {
    pub fn new(
        bucket: impl Into<String>,
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
            session_token: None,
            endpoint: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            crate::Error::InvalidConfig(format!("Failed to read config: {}", e))
        })?;

        toml::from_str(&content)
            .map_err(|e| crate::Error::InvalidConfig(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::new(
            required_env("PARCEL_BUCKET")?,
            required_env("PARCEL_REGION")?,
            required_env("PARCEL_ACCESS_KEY_ID")?,
            required_env("PARCEL_SECRET_KEY")?,
        );

        if let Ok(token) = std::env::var("PARCEL_SESSION_TOKEN") {
            config.session_token = Some(token);
        }
        if let Ok(endpoint) = std::env::var("PARCEL_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        Ok(config)
    }

    /// Check that every required field is set
    pub fn validate(&self) -> crate::Result<()> {
        let required = [
            ("bucket", &self.bucket),
            ("region", &self.region),
            ("access_key_id", &self.access_key_id),
            ("secret_key", &self.secret_key),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(crate::Error::InvalidConfig(format!("{} is required", name)));
            }
        }
        Ok(())
    }

    /// Base URL every object key is appended to, always ending in a single `/`
    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/", endpoint.trim_end_matches('/')),
            None => format!(
                "https://{}.s3.{}.{}/",
                self.bucket,
                self.region,
                crate::PROVIDER_DOMAIN
            ),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn required_env(name: &str) -> crate::Result<String> {
    std::env::var(name)
        .map_err(|_| crate::Error::InvalidConfig(format!("environment variable {} is not set", name)))
}
