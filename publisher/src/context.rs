use yudu_publisher_api::{Config, Publisher};
use yudu_publisher_core::{Context, OsEnv, Result};
use yudu_publisher_http_send_reqwest::ReqwestHttpSend;

/// Build a context with a reqwest transport and the process environment.
///
/// `config.verify` and `config.debug` decide TLS verification and
/// connection tracing of the transport.
pub fn default_context(config: &Config) -> Result<Context> {
    let http = ReqwestHttpSend::with_options(config.verify, config.debug)?;
    Ok(Context::new().with_http_send(http).with_env(OsEnv))
}

/// Build a publisher client from config, filling unset fields from env.
pub fn default_publisher(config: Config) -> Result<Publisher> {
    let config = config.from_env(&Context::new().with_env(OsEnv));
    let ctx = default_context(&config)?;
    Publisher::new(ctx, &config)
}
