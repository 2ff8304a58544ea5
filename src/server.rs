use std::collections::HashMap;
use std::net::SocketAddr;

use actix_web::error::ErrorInternalServerError;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use anyhow::Result;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use serde_json::{Value, json};

use crate::gateway::body_bytes;
use crate::handler::Handler;

/// Hosts the handler behind a plain HTTP listener, translating each request
/// into a gateway event.
pub async fn run(handler: Handler, bind: SocketAddr) -> Result<()> {
    let handler = web::Data::new(handler);

    log::info!("Listening on http://{}", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(handler.clone())
            .default_service(web::to(relay))
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}

/// Builds the proxy event payload API Gateway would send for `req`.
pub fn gateway_event(req: &HttpRequest) -> actix_web::Result<Value> {
    let query_string_parameters = if req.query_string().is_empty() {
        None
    } else {
        let params = web::Query::<HashMap<String, String>>::from_query(req.query_string())?;
        Some(params.into_inner())
    };

    Ok(json!({
        "httpMethod": req.method().as_str(),
        "path": req.path(),
        "queryStringParameters": query_string_parameters,
    }))
}

async fn relay(req: HttpRequest, handler: web::Data<Handler>) -> actix_web::Result<HttpResponse> {
    let payload = gateway_event(&req)?;

    let response = handler
        .invoke(payload)
        .await
        .map_err(ErrorInternalServerError)?;

    into_http_response(response)
}

fn into_http_response(response: ApiGatewayProxyResponse) -> actix_web::Result<HttpResponse> {
    let status = u16::try_from(response.status_code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| ErrorInternalServerError(format!("Bad status {}", response.status_code)))?;

    let mut builder = HttpResponse::build(status);
    for (name, value) in &response.headers {
        let value = value.to_str().map_err(ErrorInternalServerError)?;
        builder.insert_header((name.as_str(), value));
    }

    Ok(builder.body(body_bytes(&response).to_vec()))
}
