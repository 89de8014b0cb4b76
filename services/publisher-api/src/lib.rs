//! YUDU Publisher REST API client.
//!
//! This crate signs and sends requests to the YUDU Publisher service and
//! builds the XML documents its write endpoints expect.
//!
//! ## Overview
//!
//! Every request is signed with HMAC-SHA256 over
//!
//! ```text
//! {METHOD}/Yudu/services/{version}/{resource}?{canonical query}{body}
//! ```
//!
//! where the canonical query is the sorted, decoded query string including a
//! `timestamp` parameter. The api key travels in the `Authentication` header,
//! the signature in the `Signature` header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use yudu_publisher_api::{Config, Fields, Publisher};
//! use yudu_publisher_core::{Context, OsEnv};
//! use yudu_publisher_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> yudu_publisher_core::Result<()> {
//!     let ctx = Context::new().with_env(OsEnv);
//!
//!     // Reads YUDU_PUBLISHER_KEY and YUDU_PUBLISHER_SECRET.
//!     let config = Config::default().from_env(&ctx);
//!     let ctx = ctx.with_http_send(ReqwestHttpSend::with_options(config.verify, config.debug)?);
//!     let publisher = Publisher::new(ctx, &config)?;
//!
//!     let resp = publisher.readers(&[("limit", "10")]).await?;
//!     println!("{}: {}", resp.status_code(), resp);
//!
//!     let resp = publisher
//!         .create_permission(Fields::from([("reader", "12345"), ("edition", "64256")]))
//!         .await?;
//!     println!("{}", resp.status_code());
//!     Ok(())
//! }
//! ```
//!
//! ## Lower level usage
//!
//! [`RequestBuilder`] and [`RequestSigner`] can be used directly for
//! endpoints [`Publisher`] does not cover, and [`XmlDocument`] renders
//! request bodies on its own.
//!
//! ## Environment Variables
//!
//! ```bash
//! export YUDU_PUBLISHER_KEY=your-api-key
//! export YUDU_PUBLISHER_SECRET=your-api-secret
//! export YUDU_PUBLISHER_VERSION=2.1                                    # Optional
//! export YUDU_PUBLISHER_SERVICE_URL=https://api.yudu.com/Yudu/services # Optional
//! ```

mod constants;
pub use constants::{
    DEFAULT_SERVICE_URL, DEFAULT_VERSION, YUDU_PUBLISHER_KEY, YUDU_PUBLISHER_SECRET,
    YUDU_PUBLISHER_SERVICE_URL, YUDU_PUBLISHER_VERSION,
};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod request;
pub use request::{ApiRequest, Method, RequestBuilder};

mod sign_request;
pub use sign_request::{
    canonical_query_string, string_to_sign, transport_query_string, RequestSigner,
};

mod document;
pub use document::{Fields, TargetedNotification, XmlDocument, XmlNode};

mod xml;
pub use xml::XmlElement;

mod response;
pub use response::ResponseView;

mod publisher;
pub use publisher::Publisher;
