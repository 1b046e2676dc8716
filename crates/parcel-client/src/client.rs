//! S3 object client
//!
//! Translates `get_object` / `put_object` into one signed HTTP request each
//! and interprets the response. No retries, buffering or timeouts are added
//! on top of the transport.

use bytes::Bytes;
use parcel_auth::{Credentials, SignerV4};
use parcel_core::headers::{CONTENT_LENGTH, ETAG, X_AMZ_ACL, X_AMZ_CONTENT_SHA256};
use parcel_core::types::{GetObjectOptions, Headers, PutObjectOptions, PutObjectOutput};
use parcel_core::utils::{encode_key, parse_etag};
use parcel_core::{ClientConfig, Error, Result, SERVICE};
use parcel_crypto::sha256_hash;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use tracing::debug;

/// Client for a single bucket in a single region
///
/// Clone is cheap; the underlying HTTP client is reference counted.
#[derive(Debug, Clone)]
pub struct S3Client {
    http: reqwest::Client,
    signer: SignerV4,
    bucket: String,
    /// `https://{bucket}.s3.{region}.amazonaws.com/` or the endpoint override
    base_url: String,
}

impl S3Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(Error::transport)?;
        Ok(Self::with_http_client(config, http))
    }

    /// Build a client on top of an existing `reqwest::Client`
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        let base_url = config.base_url();

        let mut credentials = Credentials::new(config.access_key_id, config.secret_key);
        credentials.session_token = config.session_token;

        Self {
            http,
            signer: SignerV4::new(config.region, credentials),
            bucket: config.bucket,
            base_url,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn region(&self) -> &str {
        self.signer.region()
    }

    /// URL the given key is stored under
    pub fn object_url(&self, key: &str) -> String {
        format!("{}{}", self.base_url, encode_key(key))
    }

    /// Fetch an object's bytes; `Ok(None)` when the key does not exist
    pub async fn get_object(
        &self,
        key: &str,
        _options: Option<GetObjectOptions>,
    ) -> Result<Option<Bytes>> {
        let path = object_path(key)?;
        let response = self.dispatch(&path, Method::GET, Headers::new(), None).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(request_failed("get", response).await);
        }

        let body = response.bytes().await.map_err(Error::transport)?;
        Ok(Some(body))
    }

    /// Upload `body` under `key`
    pub async fn put_object(
        &self,
        key: &str,
        body: impl Into<Bytes>,
        options: Option<PutObjectOptions>,
    ) -> Result<PutObjectOutput> {
        let mut headers = Headers::new();
        if let Some(acl) = options.and_then(|o| o.acl) {
            headers.insert(X_AMZ_ACL, acl);
        }

        let path = object_path(key)?;
        let response = self
            .dispatch(&path, Method::PUT, headers, Some(body.into()))
            .await?;

        if !response.status().is_success() {
            return Err(request_failed("put", response).await);
        }

        let raw = response
            .headers()
            .get(ETAG)
            .ok_or_else(|| Error::MissingHeader(ETAG.to_string()))?
            .to_str()
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", ETAG, e)))?;

        Ok(PutObjectOutput {
            etag: parse_etag(raw)?,
        })
    }

    /// Sign and send exactly one request for an already-encoded `path`
    async fn dispatch(
        &self,
        path: &str,
        method: Method,
        mut headers: Headers,
        body: Option<Bytes>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);

        let payload_hash = sha256_hash(body.as_deref().unwrap_or_default());
        headers.insert(X_AMZ_CONTENT_SHA256, payload_hash.clone());

        let mut signed = self
            .signer
            .sign(SERVICE, &url, method.as_str(), headers, body.as_deref())?;
        signed.insert(X_AMZ_CONTENT_SHA256, payload_hash);
        if let Some(body) = &body {
            signed.insert(CONTENT_LENGTH, body.len().to_string());
        }

        debug!(method = %method, url = %url, "Dispatching S3 request");

        let mut request = self.http.request(method, &url).headers(to_header_map(&signed)?);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(Error::transport)?;
        debug!(url = %url, status = %response.status(), "S3 response received");

        Ok(response)
    }
}

fn object_path(key: &str) -> Result<String> {
    match key {
        "" => Err(Error::InvalidRequest("object key must not be empty".into())),
        // dot segments are unreserved but URL normalization collapses them to the bucket root
        "." | ".." => Err(Error::InvalidRequest(format!(
            "object key {:?} is a relative path segment",
            key
        ))),
        _ => Ok(encode_key(key)),
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Consume a non-success response into `RequestFailed`
async fn request_failed(operation: &'static str, response: Response) -> Error {
    let status = response.status();
    let status_text = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string());
    let body = response.text().await.unwrap_or_default();

    Error::RequestFailed {
        operation,
        status: status.as_u16(),
        status_text,
        body,
    }
}
