use anyhow::{Context, Result};
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use crate::gateway::json_response;
use crate::invocation::Invocation;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to retrieve exchange rates";

/// Relays the upstream rate API. Transport errors are returned to the
/// caller as-is; only upstream status codes are turned into responses.
#[derive(Debug, Clone)]
pub struct ProxyHandler {
    client: Client,
    upstream_url: String,
}

impl ProxyHandler {
    pub fn new(client: Client, upstream_url: impl Into<String>) -> Self {
        Self {
            client,
            upstream_url: upstream_url.into(),
        }
    }

    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    pub async fn handle(
        &self,
        payload: &Value,
        invocation: &Invocation,
    ) -> Result<ApiGatewayProxyResponse> {
        info!("[{}] Event received: {}", invocation, payload);

        let resp = self
            .client
            .get(&self.upstream_url)
            .send()
            .await
            .with_context(|| format!("Can't reach {}", self.upstream_url))?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!("[{}] Upstream answered {}", invocation, status);
            let body = json!({"error": UPSTREAM_FAILURE_MESSAGE});
            return Ok(json_response(status.as_u16(), body.to_string()));
        }

        let body = resp.text().await.context("Can't read upstream body")?;
        info!("[{}] Relaying {} bytes from upstream", invocation, body.len());

        Ok(json_response(StatusCode::OK.as_u16(), body))
    }
}
