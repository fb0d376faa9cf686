#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use catalog_back::{
    AppConfig, AppState, app,
    repository::InMemoryProductRepository,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const BOUNDARY: &str = "catalog-test-boundary";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("response body is not UTF-8")
    }
}

pub fn test_app() -> Router {
    test_app_with(&[])
}

/// An in-memory app with extra environment, e.g. `FRONTEND_URL`.
pub fn test_app_with(vars: &[(&str, &str)]) -> Router {
    let config = AppConfig::from_lookup(|key| {
        if key == "STORAGE" {
            return Some("memory".to_string());
        }
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_string())
    })
    .expect("memory config");

    let state = AppState::new(Arc::new(InMemoryProductRepository::new()));
    app::router(state, &config).expect("router")
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("failed to collect body")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

pub const PEN_PNG: FilePart<'static> = FilePart {
    file_name: "pen.png",
    content_type: "image/png",
    bytes: &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a],
};

fn push_product_part(body: &mut Vec<u8>, product: &Value) {
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"product\"; filename=\"blob\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: application/json\r\n\r\n");
    body.extend_from_slice(product.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");
}

fn push_file_head(body: &mut Vec<u8>, file: &FilePart<'_>) {
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"imageFile\"; filename=\"{}\"\r\n",
            file.file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
    body.extend_from_slice(file.bytes);
}

/// A complete form; `file` may be left out to exercise the missing-part path.
pub fn product_form(product: &Value, file: Option<&FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    push_product_part(&mut body, product);
    if let Some(file) = file {
        push_file_head(&mut body, file);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// A form whose body stops in the middle of the image part.
pub fn truncated_product_form(product: &Value, file: &FilePart<'_>) -> Vec<u8> {
    let mut body = Vec::new();
    push_product_part(&mut body, product);
    push_file_head(&mut body, file);
    body
}

pub fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .expect("request")
}

pub async fn create(app: &Router, product: &Value, file: &FilePart<'_>) -> TestResponse {
    let body = product_form(product, Some(file));
    send(app, multipart_request("POST", "/api/product", body)).await
}
