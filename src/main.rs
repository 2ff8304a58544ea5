use anyhow::Result;
use config::{Config, ServeMode};
use handler::Handler;

mod config;
mod exchange_rate;
mod gateway;
mod handler;
mod invocation;
mod lambda;
mod proxy_handler;
mod rate_table;
mod server;
mod static_handler;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::info!(
        "Starting {:?} handler in {:?} mode",
        config.handler,
        config.mode
    );

    let handler = Handler::from_config(&config);

    match config.mode {
        ServeMode::Lambda => lambda::run(&handler).await,
        ServeMode::Http => server::run(handler, config.bind).await,
    }
}
