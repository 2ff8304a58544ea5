use anyhow::{Context, Result, bail};
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

/// Decodes a raw proxy event. Direct invocations may omit `httpMethod`; they
/// are read as GET. An explicit `"path": null` is rejected since there is no
/// path to route on.
pub fn parse_event(mut payload: Value) -> Result<ApiGatewayProxyRequest> {
    let fields = match payload.as_object_mut() {
        Some(fields) => fields,
        None => bail!("Gateway event must be a JSON object"),
    };

    if fields.get("path").is_some_and(Value::is_null) {
        bail!("Gateway event has a null path");
    }
    fields
        .entry("httpMethod")
        .or_insert_with(|| json!("GET"));

    serde_json::from_value(payload).context("Malformed gateway event")
}

/// A response carrying an already encoded JSON body.
pub fn json_response(status_code: u16, body: String) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    ApiGatewayProxyResponse {
        status_code: i64::from(status_code),
        headers,
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}

pub fn allow_any_origin(mut response: ApiGatewayProxyResponse) -> ApiGatewayProxyResponse {
    response
        .headers
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

pub fn body_bytes(response: &ApiGatewayProxyResponse) -> &[u8] {
    match &response.body {
        Some(Body::Text(text)) => text.as_bytes(),
        Some(Body::Binary(bytes)) => bytes.as_slice(),
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_query_parameters_behave_like_missing_ones() {
        let event = parse_event(json!({"queryStringParameters": null, "path": "/rate"})).unwrap();

        assert_eq!(event.query_string_parameters.first("from"), None);
        assert_eq!(event.path.as_deref(), Some("/rate"));
        assert_eq!(event.http_method, http::Method::GET);
    }

    #[test]
    fn ignores_unknown_event_fields() {
        let event = parse_event(json!({
            "httpMethod": "POST",
            "queryStringParameters": {"from": "BRL"},
            "version": "1.0"
        }))
        .unwrap();

        assert_eq!(event.query_string_parameters.first("from"), Some("BRL"));
        assert_eq!(event.path, None);
        assert_eq!(event.http_method, http::Method::POST);
    }

    #[test]
    fn rejects_null_path_and_non_objects() {
        assert!(parse_event(json!({"path": null})).is_err());
        assert!(parse_event(json!("not an event")).is_err());
        assert!(parse_event(json!({"path": 42})).is_err());
    }

    #[test]
    fn serializes_in_proxy_response_shape() {
        let response = allow_any_origin(json_response(200, "{}".to_string()));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["content-type"], "application/json");
        assert_eq!(value["headers"]["access-control-allow-origin"], "*");
        assert_eq!(value["body"], "{}");
        assert_eq!(body_bytes(&response), b"{}");
    }
}
