use std::fmt::{Debug, Formatter};

use super::constants::*;
use yudu_publisher_core::utils::Redact;
use yudu_publisher_core::Context;

/// Config carries all the configuration for the publisher client.
#[derive(Clone)]
pub struct Config {
    /// `key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`YUDU_PUBLISHER_KEY`]
    ///
    /// Sent in the `Authentication` header to identify the caller.
    pub key: Option<String>,
    /// `secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`YUDU_PUBLISHER_SECRET`]
    ///
    /// Never transmitted, only used to derive the request signature.
    pub secret: Option<String>,
    /// `version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`YUDU_PUBLISHER_VERSION`]
    /// - default to [`DEFAULT_VERSION`]
    pub version: Option<String>,
    /// `service_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`YUDU_PUBLISHER_SERVICE_URL`]
    /// - default to [`DEFAULT_SERVICE_URL`]
    pub service_url: Option<String>,
    /// Verify the server's TLS certificate, default to `true`.
    ///
    /// Read by the transport, not by [`Publisher`](crate::Publisher). Pass it
    /// to `ReqwestHttpSend::with_options` when building your own context.
    pub verify: bool,
    /// Trace connections of the underlying http client, default to `false`.
    ///
    /// Same as `verify`, only the transport honours it.
    pub debug: bool,
    /// Fixed unix timestamp used instead of the wall clock.
    ///
    /// Only useful for reproducible signatures in tests.
    pub timestamp: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key: None,
            secret: None,
            version: None,
            service_url: None,
            verify: true,
            debug: false,
            timestamp: None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("key", &Redact::from(&self.key))
            .field("secret", &Redact::from(&self.secret))
            .field("version", &self.version)
            .field("service_url", &self.service_url)
            .field("verify", &self.verify)
            .field("debug", &self.debug)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(YUDU_PUBLISHER_KEY) {
            self.key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(YUDU_PUBLISHER_SECRET) {
            self.secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(YUDU_PUBLISHER_VERSION) {
            self.version.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(YUDU_PUBLISHER_SERVICE_URL) {
            self.service_url.get_or_insert(v);
        }

        self
    }

    /// The api version segment in use.
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    /// The service base url in use, without trailing slash.
    pub fn service_url(&self) -> &str {
        self.service_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_URL)
            .trim_end_matches('/')
    }
}
