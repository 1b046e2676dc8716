//! Parcel Core Library
//!
//! Configuration, error taxonomy, and shared types for the Parcel object client.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::ClientConfig;
pub use error::{Error, Result};

/// Parcel version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name used in the credential scope
pub const SERVICE: &str = "s3";

/// Domain of the default virtual-hosted endpoint
pub const PROVIDER_DOMAIN: &str = "amazonaws.com";

/// Signing algorithm identifier
pub const SIGNING_ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// SHA-256 of the empty payload, hex encoded
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Well-known header names
pub mod headers {
    pub const AUTHORIZATION: &str = "Authorization";
    pub const HOST: &str = "host";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const ETAG: &str = "etag";
    pub const X_AMZ_ACL: &str = "x-amz-acl";
    pub const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";
    pub const X_AMZ_DATE: &str = "x-amz-date";
    pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";
}
