//! Response construction.
//!
//! # Responsibilities
//! - Build the success response around a rendered document
//! - Build the fixed error envelope and the pre-flight response
//! - Define the CORS headers attached to every response
//!
//! # Design Decisions
//! - CORS headers are constants applied by a response layer, so no path can miss them
//! - The error body is static; details only go to the log

use axum::body::Body;
use axum::http::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::render::SubscriptionDocument;

/// Body of every failed request.
pub const ERROR_BODY: &str = "Error generating subscription";

/// Content type of the subscription document.
pub const DOCUMENT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// CORS headers sent on every response.
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// 200 with the document body and cache directive.
pub fn subscription_response(document: SubscriptionDocument, cache_max_age_secs: u64) -> Response {
    let cache_control = format!("public, max-age={}", cache_max_age_secs);
    let mut response = (StatusCode::OK, Body::from(document.body)).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(DOCUMENT_CONTENT_TYPE));
    if let Ok(value) = HeaderValue::from_str(&cache_control) {
        headers.insert(CACHE_CONTROL, value);
    }
    response
}

/// 500 with the static error body.
pub fn error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, ERROR_BODY).into_response()
}

/// Empty pre-flight response; CORS headers are added by the response layer.
pub fn preflight_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
