use anyhow::Result;
use pretty_assertions::assert_eq;
use yudu_publisher_api::{Credential, Method, RequestBuilder, RequestSigner, XmlDocument};
use yudu_publisher_core::{Context, ErrorKind};

use super::{assert_signed, VERSION};
use crate::{expected_url, MockHttpSend, KEY, SECRET, SERVICE_URL, TIMESTAMP};

fn init() -> (Context, RequestSigner, Credential, MockHttpSend) {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = MockHttpSend::default();
    let ctx = Context::new().with_http_send(http.clone());
    let signer = RequestSigner::new(VERSION, SERVICE_URL).with_timestamp(TIMESTAMP);
    (ctx, signer, Credential::new(KEY, SECRET), http)
}

#[tokio::test]
async fn test_builder_matches_publisher() -> Result<()> {
    let (ctx, signer, cred, http) = init();

    let resp = RequestBuilder::new()
        .method(Method::Get)
        .resource("/readers")
        .send(&ctx, &signer, &cred)
        .await?;

    assert_signed(
        &http.last(),
        http::Method::GET,
        &expected_url(VERSION, "readers", ""),
        "E9RAVo/ZpgqeId+XJ5NiXW3j3CSxM8F6jdQvMM3RsvY=",
    );
    assert_eq!(resp.request().method, Method::Get);
    assert_eq!(resp.request().resource, "readers");
    assert_eq!(
        resp.request().query,
        vec![("timestamp".to_string(), TIMESTAMP.to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn test_method_parsed_from_string() -> Result<()> {
    let (ctx, signer, cred, http) = init();

    RequestBuilder::new()
        .method("DELETE".parse()?)
        .resource("readers/1")
        .send(&ctx, &signer, &cred)
        .await?;

    assert_signed(
        &http.last(),
        http::Method::DELETE,
        &expected_url(VERSION, "readers/1", ""),
        "ODYi5mImQDGD61cjN/lKiyiomZRx5Wo8Te8eN+7LrfA=",
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_method_fails_before_sending() -> Result<()> {
    let (ctx, signer, cred, http) = init();

    let err = RequestBuilder::new()
        .resource("readers")
        .send(&ctx, &signer, &cred)
        .await
        .expect_err("method is required");

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(http.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sequential_calls_do_not_leak() -> Result<()> {
    let (ctx, signer, cred, http) = init();

    let body = XmlDocument::CreatePermission(
        [("reader", "12345"), ("edition", "64256")].into(),
    )
    .to_xml()?;
    RequestBuilder::new()
        .method(Method::Post)
        .resource("permissions")
        .query([("publicationNodeId", "12345")])
        .body(body)
        .send(&ctx, &signer, &cred)
        .await?;

    // A fresh builder starts empty whatever the previous call carried.
    let resp = RequestBuilder::new()
        .method(Method::Get)
        .resource("readers/12345")
        .send(&ctx, &signer, &cred)
        .await?;

    let second = http.last();
    assert_signed(
        &second,
        http::Method::GET,
        &expected_url(VERSION, "readers/12345", ""),
        "WIMdjcVsHzD2WkZ9MPEMcQInDoU9yWWmpPu7XBlxppU=",
    );
    assert!(second.body.is_empty());
    assert_eq!(resp.request().body, "");
    assert_eq!(resp.request().query_get("publicationNodeId"), None);
    assert_eq!(http.requests().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_query_is_encoded_on_the_wire() -> Result<()> {
    let (ctx, signer, cred, http) = init();

    let resp = RequestBuilder::new()
        .method(Method::Get)
        .resource("readers")
        .query([("emailAddress", "user+test@example.com"), ("lastName", "van der Berg")])
        .send(&ctx, &signer, &cred)
        .await?;

    let req = http.last();
    assert_eq!(
        req.uri,
        expected_url(
            VERSION,
            "readers",
            "emailAddress=user%2Btest%40example.com&lastName=van+der+Berg&"
        )
    );
    assert_eq!(
        req.header("Signature"),
        signer.signature(resp.request(), &cred)?
    );
    Ok(())
}
