//! Request/response plumbing for route tests.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::backend::AccessToken;

/// Build a request, optionally authenticated and with a JSON body.
pub fn request(method: Method, uri: &str, token: Option<&AccessToken>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("session_token={}", token.as_str()));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request should build")
}

/// Drive `router` with one request; the body is parsed as JSON (`Null` when empty).
pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(req).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.expect("body should collect").to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, headers, json)
}
