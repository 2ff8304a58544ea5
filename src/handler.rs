use anyhow::Result;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use reqwest::Client;
use serde_json::Value;

use crate::config::{Config, HandlerKind};
use crate::invocation::Invocation;
use crate::proxy_handler::ProxyHandler;
use crate::rate_table::StaticRates;
use crate::static_handler::StaticHandler;

/// The variant this process serves.
#[derive(Debug)]
pub enum Handler {
    Static(StaticHandler),
    Proxy(ProxyHandler),
}

impl Handler {
    pub fn from_config(config: &Config) -> Self {
        match config.handler {
            HandlerKind::Static => Handler::Static(StaticHandler::new(StaticRates)),
            HandlerKind::Proxy => {
                let proxy = ProxyHandler::new(Client::new(), config.upstream_url.clone());
                log::info!("Relaying requests to {}", proxy.upstream_url());
                Handler::Proxy(proxy)
            }
        }
    }

    /// Runs one invocation. Only the proxy variant can return an error.
    pub async fn invoke(&self, payload: Value) -> Result<ApiGatewayProxyResponse> {
        let invocation = Invocation::new();

        let outcome = match self {
            Handler::Static(handler) => Ok(handler.handle(payload, &invocation)),
            Handler::Proxy(handler) => handler.handle(&payload, &invocation).await,
        };

        if let Err(err) = &outcome {
            log::error!("[{}] Invocation failed: {:#}", invocation, err);
        }
        invocation.finish();

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServeMode;
    use serde_json::json;

    fn config(handler: HandlerKind, upstream_url: &str) -> Config {
        Config {
            handler,
            mode: ServeMode::Http,
            bind: "127.0.0.1:0".parse().unwrap(),
            upstream_url: upstream_url.to_string(),
        }
    }

    #[test]
    fn builds_the_configured_variant() {
        let handler = Handler::from_config(&config(HandlerKind::Static, "unused"));
        assert!(matches!(handler, Handler::Static(_)));

        let handler = Handler::from_config(&config(HandlerKind::Proxy, "http://localhost:9/x"));
        let Handler::Proxy(proxy) = handler else {
            panic!("expected the proxy variant");
        };
        assert_eq!(proxy.upstream_url(), "http://localhost:9/x");
    }

    #[tokio::test]
    async fn static_invocations_always_answer() {
        let handler = Handler::from_config(&config(HandlerKind::Static, "unused"));

        let ok = handler.invoke(json!({"path": "/rate"})).await.unwrap();
        let broken = handler.invoke(json!("not an event")).await.unwrap();

        assert_eq!(ok.status_code, 200);
        assert_eq!(broken.status_code, 500);
    }

    #[tokio::test]
    async fn proxy_transport_errors_escape() {
        let handler = Handler::from_config(&config(HandlerKind::Proxy, "http://127.0.0.1:1/"));

        assert!(handler.invoke(json!({})).await.is_err());
    }
}
