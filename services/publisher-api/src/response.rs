use std::fmt;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde_json::Value;
use yudu_publisher_core::{Error, Result};

use crate::{ApiRequest, XmlElement};

/// ResponseView wraps whatever the server answered.
///
/// Error statuses are ordinary responses here, check [`ResponseView::status_code`]
/// to tell them apart. Decoding happens on demand through the explicit
/// `xml`/`json` accessors.
#[derive(Debug, Clone)]
pub struct ResponseView {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    request: ApiRequest,
}

impl ResponseView {
    /// Wrap a transport response together with the request that produced it.
    pub fn new(resp: http::Response<Bytes>, request: ApiRequest) -> Self {
        let (parts, body) = resp.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
            request,
        }
    }

    /// Numeric http status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Http status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Undecoded response body.
    pub fn raw_body(&self) -> &Bytes {
        &self.body
    }

    /// The request exactly as sent, `timestamp` included.
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Parse the body as xml.
    pub fn xml(&self) -> Result<XmlElement> {
        let body = std::str::from_utf8(&self.body).map_err(|e| {
            Error::response_invalid("response body is not valid utf-8").with_source(e)
        })?;
        XmlElement::parse(body)
    }

    /// Parse the body as xml and serialize it back in compact form.
    pub fn xml_string(&self) -> Result<String> {
        self.xml()?.to_xml_string()
    }

    /// Parse the body as xml and convert it into a json value.
    pub fn json(&self) -> Result<Value> {
        Ok(self.xml()?.to_json_value())
    }

    /// Parse the body as xml and convert it into a json string.
    pub fn json_string(&self) -> Result<String> {
        self.xml()?.to_json_string()
    }
}

impl fmt::Display for ResponseView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.body))
    }
}
