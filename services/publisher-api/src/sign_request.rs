//! YUDU Publisher request signing.
use std::fmt::Write;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::HeaderValue;
use log::debug;
use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use yudu_publisher_core::hash::base64_hmac_sha256;
use yudu_publisher_core::time::now_timestamp;
use yudu_publisher_core::Result;

use super::constants::*;
use crate::{ApiRequest, Config, Credential};

/// Characters escaped in the resource path, everything but unreserved and `/`.
const RESOURCE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// RequestSigner that implements the YUDU Publisher REST API authentication.
///
/// Every request carries three headers:
///
/// - `Authentication`: the api key
/// - `Content-Type`: `application/vnd.yudu+xml`
/// - `Signature`: base64 encoded HMAC-SHA256 of the string to sign, keyed with the secret
#[derive(Debug, Clone)]
pub struct RequestSigner {
    version: String,
    service_url: String,
    timestamp: Option<i64>,
}

impl RequestSigner {
    /// Create a signer for the given api version and service base url.
    pub fn new(version: &str, service_url: &str) -> Self {
        Self {
            version: version.to_string(),
            service_url: service_url.trim_end_matches('/').to_string(),
            timestamp: None,
        }
    }

    /// Create a signer from config, honouring its fixed timestamp if any.
    pub fn from_config(config: &Config) -> Self {
        let signer = Self::new(config.version(), config.service_url());
        match config.timestamp {
            Some(ts) => signer.with_timestamp(ts),
            None => signer,
        }
    }

    /// Specify the signing timestamp.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for reproducible signatures.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The api version segment used in urls and signatures.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Sign the request and build the http request to send.
    ///
    /// `req` gets its `timestamp` query parameter injected, so afterwards it
    /// describes exactly what went over the wire.
    pub fn sign(&self, req: &mut ApiRequest, cred: &Credential) -> Result<http::Request<Bytes>> {
        let timestamp = self.timestamp.unwrap_or_else(now_timestamp);
        req.query_insert(TIMESTAMP, timestamp.to_string());

        let signature = self.signature(req, cred)?;
        let url = self.request_url(req);
        debug!("signed request url: {} {}", req.method, url);

        let mut authentication: HeaderValue = cred.key.parse()?;
        authentication.set_sensitive(true);

        let signed = http::Request::builder()
            .method(http::Method::from(req.method))
            .uri(url)
            .header(AUTHENTICATION, authentication)
            .header(CONTENT_TYPE, CONTENT_TYPE_XML)
            .header(SIGNATURE, signature)
            .body(Bytes::from(req.body.clone()))?;

        Ok(signed)
    }

    /// Compute the signature of a request exactly as it stands.
    ///
    /// No timestamp is injected here.
    pub fn signature(&self, req: &ApiRequest, cred: &Credential) -> Result<String> {
        let string_to_sign = string_to_sign(req, &self.version)?;
        Ok(base64_hmac_sha256(
            cred.secret.as_bytes(),
            string_to_sign.as_bytes(),
        ))
    }

    /// Build the url the request is sent to.
    ///
    /// ```text
    /// {service_url}/{version}/{resource}?{transport query}
    /// ```
    ///
    /// The resource is percent encoded here while the signature covers it raw.
    pub fn request_url(&self, req: &ApiRequest) -> String {
        format!(
            "{}/{}/{}?{}",
            self.service_url,
            self.version,
            utf8_percent_encode(&req.resource, RESOURCE_ENCODE_SET),
            transport_query_string(&req.query)
        )
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// Method + "/Yudu/services/" + Version + "/" + Resource + "?" + CanonicalQuery + Body
/// ```
///
/// The path prefix is fixed regardless of the service url the request is
/// actually sent to.
pub fn string_to_sign(req: &ApiRequest, version: &str) -> Result<String> {
    let mut s = string_to_sign_head(req, version)?;
    // Bodies may carry passwords, keep them out of the log.
    debug!("string to sign: {s} (+{} body bytes)", req.body.len());
    s.write_str(&req.body)?;

    Ok(s)
}

/// Everything in the string to sign before the body.
fn string_to_sign_head(req: &ApiRequest, version: &str) -> Result<String> {
    let mut s = String::with_capacity(64 + req.body.len());
    s.write_str(req.method.as_str())?;
    s.write_str(SIGNING_PATH_PREFIX)?;
    write!(&mut s, "{version}/{}", req.resource)?;
    s.write_str("?")?;
    s.write_str(&canonical_query_string(&req.query))?;
    Ok(s)
}

/// Build the canonical query string used for signing.
///
/// Pairs are sorted by key bytes, form encoded and joined with `&`, then the
/// whole string is decoded again (`+` back to space, `%XX` back to bytes).
/// The result is readable, not transport safe.
///
/// ```shell
/// [(timestamp, 1), (code, a b)] => "code=a b&timestamp=1"
/// ```
pub fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = query.iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted)
        .finish();

    // Encoded `+` only ever stands for a space, literal plus is `%2B`.
    let encoded = encoded.replace('+', " ");
    percent_decode_str(&encoded).decode_utf8_lossy().into_owned()
}

/// Build the form encoded query string sent on the wire, in insertion order.
pub fn transport_query_string(query: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish()
}
