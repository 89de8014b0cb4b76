//! Reqwest-based transport for the YUDU Publisher client.
//!
//! `ReqwestHttpSend` implements [`HttpSend`] on top of a [`reqwest::Client`].
//! Responses are returned as-is whatever their status code; only failures to
//! reach the server are reported as errors.
//!
//! ```no_run
//! use yudu_publisher_core::Context;
//! use yudu_publisher_http_send_reqwest::ReqwestHttpSend;
//!
//! # fn main() -> yudu_publisher_core::Result<()> {
//! // Skip TLS verification and trace connections, e.g. against a staging proxy.
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::with_options(false, true)?);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use yudu_publisher_core::{Error, HttpSend};

/// HttpSend implementation backed by reqwest.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client honouring the publisher transport options.
    ///
    /// - `verify`: verify the server's TLS certificate. Disable only for testing.
    /// - `debug`: emit low-level connection traces through `log`.
    pub fn with_options(verify: bool, debug: bool) -> yudu_publisher_core::Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!verify)
            .connection_verbose(debug)
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> anyhow::Result<http::Response<Bytes>> {
        let req = Request::try_from(req)?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self.client.execute(req).await?.into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body).await.map(|buf| buf.to_bytes())?;
        debug!("received {} with {} bytes", parts.status, bs.len());
        Ok(http::Response::from_parts(parts, bs))
    }
}
