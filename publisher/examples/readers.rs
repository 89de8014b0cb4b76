use anyhow::Result;
use yudu_publisher::{default_publisher, Config, Fields};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let publisher = default_publisher(Config::default())?;

    let resp = publisher.readers(&[("limit", "5")]).await?;
    println!("GET readers: {}", resp.status_code());
    match resp.json_string() {
        Ok(json) => println!("{json}"),
        Err(err) => println!("response is not xml: {err}"),
    }

    let resp = publisher
        .create_reader(Fields::from([
            ("emailAddress", "user@example.com"),
            ("username", "example"),
            ("firstName", "example"),
            ("lastName", "user"),
            ("nodeId", "12345"),
            ("password", "secret"),
        ]))
        .await?;
    println!("POST readers: {}", resp.status_code());
    println!("sent: {:?}", resp.request());

    Ok(())
}
