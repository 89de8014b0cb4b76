use anyhow::Result;
use pretty_assertions::assert_eq;
use yudu_publisher_api::{Fields, TargetedNotification};

use super::{assert_signed, VERSION};
use crate::{expected_url, init_mock_publisher, MockHttpSend};

const DECL: &str = "<?xml version=\"1.0\"?>\n";

pub fn reader_fields() -> Fields {
    Fields::from([
        ("emailAddress", "user@example.com"),
        ("username", "example"),
        ("firstName", "example"),
        ("lastName", "user"),
        ("nodeId", "12345"),
        ("password", "secret"),
        ("authorisedDeviceLimit", "3"),
    ])
}

fn category_fields() -> Fields {
    Fields::from([
        ("categoryTitle", "Category Example"),
        ("code", "CATEGORY_EXAMPLE"),
        ("containsAll", "true"),
        ("defaultCategory", "false"),
        ("ordering", "4"),
        ("publicationNodeId", "61"),
    ])
}

#[tokio::test]
async fn test_readers() -> Result<()> {
    let http = MockHttpSend::new(201, "");
    let publisher = init_mock_publisher(VERSION, http.clone());

    publisher.create_reader(reader_fields()).await?;
    let req = http.last();
    assert_signed(
        &req,
        http::Method::POST,
        &expected_url(VERSION, "readers", ""),
        "98VRZgeRqwx/g8YeK++QfPBWlY9HCB+nc1AEyIscoBM=",
    );
    assert_eq!(
        req.body_str(),
        format!(
            "{DECL}<reader xmlns=\"http://schema.yudu.com\">\
             <emailAddress>user@example.com</emailAddress>\
             <username>example</username>\
             <firstName>example</firstName>\
             <lastName>user</lastName>\
             <nodeId>12345</nodeId>\
             <password>secret</password>\
             <authorisedDeviceLimit>3</authorisedDeviceLimit>\
             </reader>\n"
        )
    );

    publisher.update_reader("1", reader_fields()).await?;
    let req = http.last();
    assert_signed(
        &req,
        http::Method::PUT,
        &expected_url(VERSION, "readers/1", ""),
        "KcABo3a6BaGPYTcNpnPcyrQ7gmKMUSIb10J8a8/Wo5E=",
    );
    assert!(req
        .body_str()
        .starts_with("<?xml version=\"1.0\"?>\n<reader xmlns=\"http://schema.yudu.com\" id=\"1\">"));

    publisher
        .authenticate_password("1", "%$Rfdg_)ka,Ki")
        .await?;
    let req = http.last();
    assert_signed(
        &req,
        http::Method::PUT,
        &expected_url(VERSION, "readers/1/authentication", ""),
        "ha+XHFDtSrkek9hbUu/H7KBSRQ6NaQJVkQOHhoWqJW8=",
    );
    assert_eq!(
        req.body_str(),
        format!(
            "{DECL}<authentication xmlns=\"http://schema.yudu.com\">\
             <password>%$Rfdg_)ka,Ki</password></authentication>\n"
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_permissions() -> Result<()> {
    let http = MockHttpSend::new(201, "");
    let publisher = init_mock_publisher(VERSION, http.clone());

    publisher
        .create_permission(Fields::from([("reader", "12345"), ("edition", "64256")]))
        .await?;
    let req = http.last();
    assert_signed(
        &req,
        http::Method::POST,
        &expected_url(VERSION, "permissions", ""),
        "3LGXWt0l4OmT5mTLyk5QLADiRmhSIlTW0ljpANnRALE=",
    );
    assert_eq!(
        req.body_str(),
        format!(
            "{DECL}<permission xmlns=\"http://schema.yudu.com\">\
             <reader id=\"12345\"/><edition id=\"64256\"/></permission>\n"
        )
    );

    publisher
        .update_permission("1", Fields::from([("expiryDate", "2015-06-01T00:00:00Z")]))
        .await?;
    assert_signed(
        &http.last(),
        http::Method::PUT,
        &expected_url(VERSION, "permissions/1", ""),
        "JoNTy8MhAtMclcHxonRiS8x3AAbBuYHbkCQHORF0dAk=",
    );
    Ok(())
}

#[tokio::test]
async fn test_subscription_periods() -> Result<()> {
    let http = MockHttpSend::new(201, "");
    let publisher = init_mock_publisher(VERSION, http.clone());

    publisher
        .create_subscription_period(Fields::from([
            ("reader", "1234"),
            ("subscription", "9876"),
            ("startDate", "2014-11-01T00:00:00Z"),
            ("expiryDate", "2016-11-01T00:00:00Z"),
        ]))
        .await?;
    assert_signed(
        &http.last(),
        http::Method::POST,
        &expected_url(VERSION, "subscriptionPeriods", ""),
        "Fvsqng8GEBKTrE/kveQFmoquLVAxPrGeupe6MP/J9wI=",
    );

    // Field order of the input does not matter for this document.
    publisher
        .create_subscription_period(Fields::from([
            ("expiryDate", "2016-11-01T00:00:00Z"),
            ("startDate", "2014-11-01T00:00:00Z"),
            ("subscription", "9876"),
            ("reader", "1234"),
        ]))
        .await?;
    assert_signed(
        &http.last(),
        http::Method::POST,
        &expected_url(VERSION, "subscriptionPeriods", ""),
        "Fvsqng8GEBKTrE/kveQFmoquLVAxPrGeupe6MP/J9wI=",
    );

    publisher
        .update_subscription_period(
            "1",
            Fields::from([
                ("startDate", "2014-11-01T00:00:00Z"),
                ("expiryDate", "2016-11-01T00:00:00Z"),
            ]),
        )
        .await?;
    assert_signed(
        &http.last(),
        http::Method::PUT,
        &expected_url(VERSION, "subscriptionPeriods/1", ""),
        "jFJuAuMpPU9xndNSd6SOVzWWwbjP1GGiKuV2/ebuW3A=",
    );
    Ok(())
}

#[tokio::test]
async fn test_tokens() -> Result<()> {
    let http = MockHttpSend::new(201, "");
    let publisher = init_mock_publisher(VERSION, http.clone());

    publisher.create_token("user12345").await?;
    let req = http.last();
    assert_signed(
        &req,
        http::Method::POST,
        &expected_url(VERSION, "token", ""),
        "2qYDsY1UNp51ySIUjpcSgl8OJbJMunIwe/p8UAXCDHY=",
    );
    assert_eq!(
        req.body_str(),
        format!("{DECL}<authToken xmlns=\"http://schema.yudu.com\"><key>user12345</key></authToken>\n")
    );

    publisher.create_publication_token("user12345", "1").await?;
    assert_signed(
        &http.last(),
        http::Method::POST,
        &expected_url(VERSION, "publications/1/token", ""),
        "egBFkCmj4hVBfkKg3Zdhbsv2TktjEHH7M15nD+9jXC4=",
    );

    publisher.create_edition_token("user12345", "1").await?;
    assert_signed(
        &http.last(),
        http::Method::POST,
        &expected_url(VERSION, "editions/1/token", ""),
        "5u8Ay/LgbMHKD4ECpEAprDexiG6uvAiFvVmijxQ5j6U=",
    );
    Ok(())
}

#[tokio::test]
async fn test_categories() -> Result<()> {
    let http = MockHttpSend::new(201, "");
    let publisher = init_mock_publisher(VERSION, http.clone());

    publisher.create_category(category_fields()).await?;
    assert_signed(
        &http.last(),
        http::Method::POST,
        &expected_url(VERSION, "categories", ""),
        "d3sxk09nNsGjJ1bO0bIkpRe/Euvj9Kf4IwSScTar+Eg=",
    );

    publisher
        .update_category("category_code", "12345", category_fields())
        .await?;
    assert_signed(
        &http.last(),
        http::Method::PUT,
        &expected_url(VERSION, "categories/category_code", "publicationNodeId=12345&"),
        "D/0Ufp8Q597dBJFeZV2CtMZ6aPpWE8V8GLIsHSHojAI=",
    );

    publisher
        .create_category_edition(Fields::from([
            ("code", "CATEGORY_EXAMPLE"),
            ("editionId", "72"),
            ("publicationNodeId", "58"),
        ]))
        .await?;
    let req = http.last();
    assert_signed(
        &req,
        http::Method::POST,
        &expected_url(VERSION, "categoryEditions", ""),
        "qHkXM1Q5wOL/6XbPZNwlnKV1NYXXFAB7JiXmy+H9GU8=",
    );
    assert!(req
        .body_str()
        .contains("<categoryEdition xmlns=\"http://schema.yudu.com\"><code>CATEGORY_EXAMPLE</code>"));
    Ok(())
}

#[tokio::test]
async fn test_third_party_subscriber() -> Result<()> {
    let http = MockHttpSend::default();
    let publisher = init_mock_publisher(VERSION, http.clone());

    publisher
        .third_party_subscriber(Fields::from([
            ("token", "test.user@example.com"),
            ("editionId", "12345"),
        ]))
        .await?;
    assert_signed(
        &http.last(),
        http::Method::POST,
        &expected_url(VERSION, "thirdPartySubscribers", ""),
        "21cFLKEgKrGCHjdfmOU6ylT57n5OKNuYk1TzKlCmTYM=",
    );
    Ok(())
}

#[tokio::test]
async fn test_targeted_notification() -> Result<()> {
    let http = MockHttpSend::default();
    let publisher = init_mock_publisher(VERSION, http.clone());

    publisher
        .send_targeted_notification(TargetedNotification {
            node_id: "12345".to_string(),
            message: "A new edition is out".to_string(),
            title: "New edition".to_string(),
            subscribers: vec!["a".to_string(), "b".to_string()],
            third_party_subscribers: vec!["x".to_string(), "y".to_string()],
            ..Default::default()
        })
        .await?;

    let req = http.last();
    assert_eq!(req.method, http::Method::POST);
    assert_eq!(req.uri, expected_url(VERSION, "targetedNotifications", ""));
    assert_eq!(
        req.body_str(),
        format!(
            "{DECL}<targetedNotification xmlns=\"http://schema.yudu.com\">\
             <nodeId>12345</nodeId>\
             <message>A new edition is out</message>\
             <title>New edition</title>\
             <subscribers>\
             <subscriberUsername>a</subscriberUsername>\
             <subscriberUsername>b</subscriberUsername>\
             <thirdPartySubscriberToken>x</thirdPartySubscriberToken>\
             <thirdPartySubscriberToken>y</thirdPartySubscriberToken>\
             </subscribers>\
             </targetedNotification>\n"
        )
    );
    Ok(())
}
