//! Object operation options and results

use serde::{Deserialize, Serialize};

use super::acl::CannedAcl;

/// Options for fetching an object
///
/// Carries no fields yet; reserved for selectors such as a version id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct GetObjectOptions {}

impl GetObjectOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Options for uploading an object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutObjectOptions {
    /// Value sent as `x-amz-acl`, e.g. `public-read`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
}

impl PutObjectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_acl(mut self, acl: impl Into<String>) -> Self {
        self.acl = Some(acl.into());
        self
    }

    pub fn with_canned_acl(self, acl: CannedAcl) -> Self {
        self.with_acl(acl.to_string())
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutObjectOutput {
    /// ETag returned by the store, without surrounding quotes
    pub etag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_options_acl() {
        assert_eq!(PutObjectOptions::new().acl, None);
        assert_eq!(
            PutObjectOptions::new().with_acl("public-read").acl.as_deref(),
            Some("public-read")
        );
        assert_eq!(
            PutObjectOptions::new()
                .with_canned_acl(CannedAcl::BucketOwnerFullControl)
                .acl
                .as_deref(),
            Some("bucket-owner-full-control")
        );
    }

    #[test]
    fn test_put_options_deserialize() {
        let opts: PutObjectOptions = serde_json::from_str(r#"{"acl":"private"}"#).unwrap();
        assert_eq!(opts.acl.as_deref(), Some("private"));

        let opts: PutObjectOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, PutObjectOptions::default());
    }
}
