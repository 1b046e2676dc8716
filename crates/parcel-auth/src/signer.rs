//! AWS Signature Version 4 request signer
//!
//! Produces the `Authorization`, `x-amz-date` and `host` headers (plus
//! `x-amz-security-token` for temporary credentials) for a single request.
//! The signer keeps no per-request state; [`SignerV4::sign_at`] takes the
//! signing time explicitly so signatures are reproducible.

use chrono::{DateTime, Utc};
use parcel_core::headers::{
    AUTHORIZATION, HOST, X_AMZ_CONTENT_SHA256, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use parcel_core::types::Headers;
use parcel_core::utils::URI_ENCODE_SET;
use parcel_core::{Error, Result, SIGNING_ALGORITHM};
use parcel_crypto::{hmac_sha256, hmac_sha256_hex, sha256_hash};
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const DATE_STAMP_FORMAT: &str = "%Y%m%d";
const SCOPE_TERMINATOR: &str = "aws4_request";

/// Long-term (or temporary) credentials used to derive signing keys
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Outcome of signing one request
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Caller headers plus `Authorization`, `x-amz-date`, `host` and the session token
    pub headers: Headers,
    /// `date/region/service/aws4_request`
    pub credential_scope: String,
    /// Lowercase header names covered by the signature, sorted
    pub signed_headers: Vec<String>,
    /// Hex-encoded HMAC of the string to sign
    pub signature: String,
}

/// SigV4 signer bound to one region and one set of credentials
#[derive(Debug, Clone)]
pub struct SignerV4 {
    region: String,
    credentials: Credentials,
}

impl SignerV4 {
    pub fn new(region: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            region: region.into(),
            credentials,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn access_key_id(&self) -> &str {
        &self.credentials.access_key_id
    }

    /// Sign a request at the current time
    pub fn sign(
        &self,
        service: &str,
        url: &str,
        method: &str,
        headers: Headers,
        body: Option<&[u8]>,
    ) -> Result<Headers> {
        self.sign_at(service, url, method, headers, body, Utc::now())
    }

    /// Sign a request as of `now`
    ///
    /// Returns the caller's headers, spelled as supplied, together with the
    /// headers the signature depends on. If the caller already provides
    /// `x-amz-content-sha256` it is used as the payload hash, otherwise the
    /// body (or the empty payload) is hashed.
    pub fn sign_at(
        &self,
        service: &str,
        url: &str,
        method: &str,
        headers: Headers,
        body: Option<&[u8]>,
        now: DateTime<Utc>,
    ) -> Result<Headers> {
        self.sign_request_at(service, url, method, headers, body, now)
            .map(|signed| signed.headers)
    }

    /// Same as [`SignerV4::sign_at`], also returning the scope, signed header
    /// list and signature that went into `Authorization`
    pub fn sign_request_at(
        &self,
        service: &str,
        url: &str,
        method: &str,
        mut headers: Headers,
        body: Option<&[u8]>,
        now: DateTime<Utc>,
    ) -> Result<SignedRequest> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        let host = host_header(&parsed)?;

        let amz_date = now.format(AMZ_DATE_FORMAT).to_string();
        let date_stamp = now.format(DATE_STAMP_FORMAT).to_string();

        headers.insert(X_AMZ_DATE, amz_date.clone());
        if let Some(token) = &self.credentials.session_token {
            headers.insert(X_AMZ_SECURITY_TOKEN, token.clone());
        }
        headers.insert(HOST, host);

        let payload_hash = match headers.get(X_AMZ_CONTENT_SHA256) {
            Some(hash) => hash.to_string(),
            None => sha256_hash(body.unwrap_or_default()),
        };

        let canonical = canonicalize_headers(&headers);
        let signed_headers: Vec<String> = canonical.keys().cloned().collect();
        let canonical_headers: String = canonical
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value))
            .collect();

        let canonical_uri = match parsed.path() {
            "" => "/",
            path => path,
        };
        let canonical_query = canonicalize_query_string(parsed.query().unwrap_or(""));

        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            method,
            canonical_uri,
            canonical_query,
            canonical_headers,
            signed_headers.join(";"),
            payload_hash
        );

        debug!("Canonical request:\n{}", canonical_request);

        let credential_scope = format!(
            "{}/{}/{}/{}",
            date_stamp, self.region, service, SCOPE_TERMINATOR
        );
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            SIGNING_ALGORITHM,
            amz_date,
            credential_scope,
            sha256_hash(canonical_request.as_bytes())
        );

        debug!("String to sign:\n{}", string_to_sign);

        let signing_key = self.derive_signing_key(&date_stamp, service);
        let signature = hmac_sha256_hex(&signing_key, string_to_sign.as_bytes());

        headers.insert(
            AUTHORIZATION,
            format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                SIGNING_ALGORITHM,
                self.credentials.access_key_id,
                credential_scope,
                signed_headers.join(";"),
                signature
            ),
        );

        Ok(SignedRequest {
            headers,
            credential_scope,
            signed_headers,
            signature,
        })
    }

    /// Four chained HMACs: date, region, service, terminator
    fn derive_signing_key(&self, date_stamp: &str, service: &str) -> [u8; 32] {
        let k_date = hmac_sha256(
            format!("AWS4{}", self.credentials.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        );
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, service.as_bytes());
        hmac_sha256(&k_service, SCOPE_TERMINATOR.as_bytes())
    }
}

/// Host header value; default ports are omitted
fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(format!("{}: missing host", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Lowercase names, trimmed values with inner whitespace collapsed, sorted by name
fn canonicalize_headers(headers: &Headers) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_ascii_lowercase(),
                value.split_whitespace().collect::<Vec<_>>().join(" "),
            )
        })
        .collect()
}

fn canonicalize_query_string(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut params: Vec<(String, String)> = query
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|p| {
            let mut parts = p.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = parts.next().unwrap_or("");
            (uri_encode(key), uri_encode(value))
        })
        .collect();

    params.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    params
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Normalize an already-encoded query component to the canonical encoding
fn uri_encode(component: &str) -> String {
    let decoded = percent_decode_str(component).decode_utf8_lossy();
    utf8_percent_encode(&decoded, URI_ENCODE_SET).to_string()
}
