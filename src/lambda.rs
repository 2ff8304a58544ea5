use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use log::debug;
use serde_json::Value;

use crate::handler::Handler;

/// Serves invocations from the Lambda runtime API until the process is
/// stopped.
pub async fn run(handler: &Handler) -> anyhow::Result<()> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(handler, event).await
    }))
    .await
    .map_err(|err| anyhow::anyhow!(err))
}

// The payload stays raw JSON so a malformed event still reaches the
// handler's own error boundary.
async fn function_handler(
    handler: &Handler,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let (payload, context) = event.into_parts();
    debug!("Lambda request {}", context.request_id);

    Ok(handler.invoke(payload).await?)
}
