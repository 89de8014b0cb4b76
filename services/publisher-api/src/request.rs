use std::fmt;
use std::str::FromStr;

use log::debug;
use yudu_publisher_core::{Context, Error, Result};

use crate::{Credential, RequestSigner, ResponseView};

/// HTTP methods accepted by the publisher signing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// The uppercase method name, as it appears in the string to sign.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(Error::invalid_argument(format!(
                "invalid method type {s:?} given - must be GET, POST, PUT, DELETE"
            ))),
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = Error;

    fn try_from(method: &http::Method) -> Result<Self> {
        method.as_str().parse()
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// A fully described publisher request.
///
/// This is the immutable value produced by [`RequestBuilder::build`]. After
/// signing it also carries the injected `timestamp` query parameter, which
/// makes it an exact record of what was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Resource path relative to the api version, without leading slash.
    pub resource: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Request body, empty for reads.
    pub body: String,
}

impl ApiRequest {
    /// Get query value by key.
    pub fn query_get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert a query pair.
    ///
    /// An existing key keeps its position and takes the new value, a new key
    /// is appended.
    pub fn query_insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        query_insert(&mut self.query, key.into(), value.into());
    }
}

fn query_insert(query: &mut Vec<(String, String)>, key: String, value: String) {
    match query.iter_mut().find(|(k, _)| *k == key) {
        Some((_, v)) => *v = value,
        None => query.push((key, value)),
    }
}

/// RequestBuilder accumulates one publisher call.
///
/// The builder is consumed by [`RequestBuilder::send`], so nothing configured
/// for one call can leak into the next.
///
/// ```no_run
/// use yudu_publisher_api::{Credential, Method, RequestBuilder, RequestSigner};
/// use yudu_publisher_core::Context;
///
/// # async fn example(ctx: Context) -> yudu_publisher_core::Result<()> {
/// let signer = RequestSigner::new("2.1", "https://api.yudu.com/Yudu/services");
/// let cred = Credential::new("key", "secret");
///
/// let resp = RequestBuilder::new()
///     .method(Method::Get)
///     .resource("/readers")
///     .query([("limit", "10")])
///     .send(&ctx, &signer, &cred)
///     .await?;
/// println!("{}", resp.status_code());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    resource: String,
    query: Vec<(String, String)>,
    body: String,
}

impl RequestBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the http method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the resource path, leading slashes are stripped.
    pub fn resource(mut self, resource: impl AsRef<str>) -> Self {
        self.resource = resource.as_ref().trim_start_matches('/').to_string();
        self
    }

    /// Merge query parameters, later values overwrite same-named keys.
    pub fn query<K, V>(mut self, query: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in query {
            query_insert(&mut self.query, k.into(), v.into());
        }
        self
    }

    /// Set the request body, usually a serialized [`crate::XmlDocument`].
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Freeze the builder into an [`ApiRequest`].
    ///
    /// Fails with `InvalidArgument` if no method was set.
    pub fn build(self) -> Result<ApiRequest> {
        let method = self
            .method
            .ok_or_else(|| Error::invalid_argument("request method must be set before sending"))?;

        Ok(ApiRequest {
            method,
            resource: self.resource,
            query: self.query,
            body: self.body,
        })
    }

    /// Sign and send the request.
    ///
    /// Any response the server produced is returned, 4xx and 5xx included.
    /// Failures to reach the server surface as `TransportFailure`.
    pub async fn send(
        self,
        ctx: &Context,
        signer: &RequestSigner,
        cred: &Credential,
    ) -> Result<ResponseView> {
        let mut req = self.build()?;
        let signed = signer.sign(&mut req, cred)?;

        let resp = ctx.http_send(signed).await?;
        debug!(
            "{} {} returned status {}",
            req.method,
            req.resource,
            resp.status()
        );

        Ok(ResponseView::new(resp, req))
    }
}
