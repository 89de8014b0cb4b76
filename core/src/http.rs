use anyhow::Result;
use bytes::Bytes;
use std::fmt::Debug;

/// HttpSend is used to deliver a signed request to the publisher service.
///
/// Implementations must resolve to `Ok` for every response the server
/// produced, including 4xx and 5xx statuses. Only failures to reach the
/// server or to read its response are reported as `Err`.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// NoopHttpSend refuses every request.
///
/// It is the transport of a fresh [`crate::Context`] until a real one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(anyhow::anyhow!(
            "no http client configured, use Context::with_http_send"
        ))
    }
}
