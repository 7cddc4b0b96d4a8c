//! Shared helpers for driving the router in behavioural tests.

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{Request, Response, header};
use featuredoc_server::config::ServerConfig;
use featuredoc_server::server::{AppState, build_router};
use tower::ServiceExt;

const BOUNDARY: &str = "featuredoc-test-boundary";

/// A feature file with two complete scenarios and one header without steps.
pub const LOGIN_FEATURE: &str = concat!(
    "Feature: Login\n",
    "\n",
    "  @smoke\n",
    "  Scenario: Successful login\n",
    "    Given a registered user\n",
    "    When they submit valid credentials\n",
    "    Then they see the dashboard\n",
    "\n",
    "  Scenario: Pending design\n",
    "\n",
    "  @negative\n",
    "  Scenario Outline: Rejected login\n",
    "    Given a registered user\n",
    "    When they submit <password>\n",
    "    Then they see an error\n",
);

/// Build a router over fresh state.
pub fn router(config: ServerConfig) -> Router {
    build_router(AppState::new(config))
}

/// Build a multipart request carrying one file part named `field`.
pub fn multipart_request(uri: &str, field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid multipart request")
}

/// Build a bodiless GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("valid GET request")
}

/// Send one request through the router.
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

/// Collect a response body.
pub async fn body_bytes(response: Response<Body>) -> Bytes {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("JSON body")
}
