use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;
use yudu_publisher_api::{Fields, Method};
use yudu_publisher_core::ErrorKind;

use crate::{init_mock_publisher, FailingHttpSend, MockHttpSend, TIMESTAMP};

const READER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<reader xmlns="http://schema.yudu.com" id="12345" username="example">
    <emailAddress>user@example.com</emailAddress>
    <firstName>example</firstName>
    <lastName>user</lastName>
    <authorisedDeviceLimit>3</authorisedDeviceLimit>
</reader>
"#;

const ERROR: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<error xmlns="http://schema.yudu.com"><message>Invalid signature</message></error>
"#;

#[tokio::test]
async fn test_error_statuses_are_responses() -> Result<()> {
    for status in [400, 401, 403, 404, 422, 429, 500, 503] {
        let http = MockHttpSend::new(status, ERROR);
        let publisher = init_mock_publisher("2.1", http.clone());

        let resp = publisher.readers(&[]).await?;
        assert_eq!(resp.status_code(), status);
        assert!(!resp.is_success());
        assert_eq!(
            resp.xml()?.child("message").map(|m| m.text().to_string()),
            Some("Invalid signature".to_string())
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_success_statuses() -> Result<()> {
    for status in [200, 201, 204] {
        let publisher = init_mock_publisher("2.1", MockHttpSend::new(status, ""));
        let resp = publisher.delete_reader("1").await?;
        assert_eq!(resp.status_code(), status);
        assert!(resp.is_success());
    }
    Ok(())
}

#[tokio::test]
async fn test_transport_failure() -> Result<()> {
    let publisher = init_mock_publisher("2.1", FailingHttpSend);

    let err = publisher
        .create_reader(Fields::from([("username", "example")]))
        .await
        .expect_err("transport must fail");

    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert!(err.is_transport_failure());
    assert!(err.to_string().contains("POST"));
    assert!(std::error::Error::source(&err).is_some());
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_does_not_poison_client() -> Result<()> {
    let failing = init_mock_publisher("2.1", FailingHttpSend);
    assert!(failing.readers(&[]).await.is_err());
    assert!(failing.readers(&[]).await.is_err());

    // The same configuration keeps working with a healthy transport.
    let http = MockHttpSend::default();
    let publisher = init_mock_publisher("2.1", http.clone());
    publisher.readers(&[]).await?;
    assert_eq!(http.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_request_snapshot() -> Result<()> {
    let publisher = init_mock_publisher("2.1", MockHttpSend::new(201, READER));

    let resp = publisher
        .update_permission("1", Fields::from([("expiryDate", "2015-06-01T00:00:00Z")]))
        .await?;

    let req = resp.request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.resource, "permissions/1");
    assert_eq!(req.query_get("timestamp"), Some(TIMESTAMP.to_string().as_str()));
    assert!(req.body.contains("<expiryDate>2015-06-01T00:00:00Z</expiryDate>"));
    Ok(())
}

#[tokio::test]
async fn test_decoded_views() -> Result<()> {
    let publisher = init_mock_publisher("2.1", MockHttpSend::new(200, READER));
    let resp = publisher.reader("12345").await?;

    assert_eq!(resp.to_string(), READER);
    assert_eq!(resp.raw_body().as_ref(), READER.as_bytes());

    let xml = resp.xml()?;
    assert_eq!(xml.local_name(), "reader");
    assert_eq!(xml.attribute("username"), Some("example"));
    assert_eq!(
        xml.child("authorisedDeviceLimit").map(|e| e.text()),
        Some("3")
    );

    assert_eq!(
        resp.xml_string()?,
        "<?xml version=\"1.0\"?>\n\
         <reader xmlns=\"http://schema.yudu.com\" id=\"12345\" username=\"example\">\
         <emailAddress>user@example.com</emailAddress>\
         <firstName>example</firstName>\
         <lastName>user</lastName>\
         <authorisedDeviceLimit>3</authorisedDeviceLimit>\
         </reader>\n"
    );

    assert_eq!(
        resp.json()?,
        json!({
            "@attributes": {"id": "12345", "username": "example"},
            "emailAddress": "user@example.com",
            "firstName": "example",
            "lastName": "user",
            "authorisedDeviceLimit": "3"
        })
    );

    let parsed: serde_json::Value = serde_json::from_str(&resp.json_string()?)?;
    assert_eq!(parsed, resp.json()?);
    Ok(())
}

#[tokio::test]
async fn test_non_xml_body() -> Result<()> {
    let publisher = init_mock_publisher("2.1", MockHttpSend::new(502, "Bad Gateway"));
    let resp = publisher.links().await?;

    assert_eq!(resp.status_code(), 502);
    assert_eq!(resp.to_string(), "Bad Gateway");
    assert_eq!(
        resp.xml().expect_err("body is not xml").kind(),
        ErrorKind::ResponseInvalid
    );
    assert_eq!(
        resp.json_string().expect_err("body is not xml").kind(),
        ErrorKind::ResponseInvalid
    );
    Ok(())
}
