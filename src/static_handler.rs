use anyhow::{Context, Result};
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use log::{error, info};
use serde_json::{Value, json};

use crate::exchange_rate::{RateResult, RateService};
use crate::gateway::{allow_any_origin, json_response, parse_event};
use crate::invocation::Invocation;
use crate::rate_table::{RateSource, StaticRates};

pub const DEFAULT_FROM: &str = "USD";
pub const DEFAULT_TO: &str = "BRL";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Answers rate requests from the in-memory table.
#[derive(Debug)]
pub struct StaticHandler<S = StaticRates> {
    service: RateService<S>,
}

impl<S: RateSource> StaticHandler<S> {
    pub fn new(source: S) -> Self {
        Self {
            service: RateService::new(source),
        }
    }

    /// Never fails: anything that escapes the lookup becomes a 500.
    pub fn handle(&self, payload: Value, invocation: &Invocation) -> ApiGatewayProxyResponse {
        match self.try_handle(payload, invocation) {
            Ok(response) => response,
            Err(err) => {
                error!("[{}] Unhandled error: {:#}", invocation, err);
                internal_error()
            }
        }
    }

    fn try_handle(
        &self,
        payload: Value,
        invocation: &Invocation,
    ) -> Result<ApiGatewayProxyResponse> {
        info!("[{}] Event received: {}", invocation, payload);

        let event = parse_event(payload)?;
        let result = self.route(&event, invocation);

        let body = serde_json::to_string(&result).context("Can't encode response body")?;
        let response = allow_any_origin(json_response(result.status_code(), body));

        info!(
            "[{}] Response sent: {}",
            invocation,
            serde_json::to_string(&response)?
        );

        Ok(response)
    }

    pub fn route(&self, event: &ApiGatewayProxyRequest, invocation: &Invocation) -> RateResult {
        let params = &event.query_string_parameters;
        let from = params.first("from").unwrap_or(DEFAULT_FROM);
        let to = params.first("to").unwrap_or(DEFAULT_TO);

        let path = event.path.as_deref().unwrap_or_default();
        if path.contains("multiple") {
            self.service.get_multiple_rates(from, invocation)
        } else {
            self.service.get_exchange_rate(from, to, invocation)
        }
    }
}

fn internal_error() -> ApiGatewayProxyResponse {
    let body = json!({"status": "error", "message": INTERNAL_ERROR_MESSAGE});
    json_response(500, body.to_string())
}
