use anyhow::Result;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use yudu_publisher_core::Context;
use yudu_publisher_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    // Tune the client instead of relying on ReqwestHttpSend::with_options.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(4)
        .user_agent("yudu-publisher-example/0.1")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    // Unsigned on purpose, the service answers with an error status.
    let req = http::Request::builder()
        .method("GET")
        .uri("https://api.yudu.com/Yudu/services/2.1/?timestamp=0")
        .header("Content-Type", "application/vnd.yudu+xml")
        .body(Bytes::new())?;

    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            for (name, value) in resp.headers() {
                println!("  {name}: {value:?}");
            }
            println!("{}", String::from_utf8_lossy(resp.body()));
        }
        Err(e) => {
            // Only failures to reach the server end up here.
            eprintln!("Transport failed: {e}");
        }
    }

    Ok(())
}
