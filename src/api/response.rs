//! JSON rendering with CORS and cache headers.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;
use tracing::error;

use crate::error::UpstreamError;

/// Cache lifetime for a year of contributions.
pub const CONTRIBUTIONS_MAX_AGE: u32 = 3600;
/// Cache lifetime for the contribution years summary.
pub const YEARS_MAX_AGE: u32 = 21600;
/// No `Cache-Control` header.
pub const NO_CACHE: u32 = 0;

/// Preflight cache lifetime, in seconds.
const CORS_MAX_AGE: &str = "86400";
const CORS_ALLOW_METHODS: &str = "GET, OPTIONS";
const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body of every 500 response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure.
    pub error: String,
}

/// CORS headers for a response to a request carrying `request` headers.
///
/// The request's `Origin` is reflected back, `*` when there is none.
pub fn cors_headers(request: &HeaderMap) -> HeaderMap {
    let origin = request
        .get(header::ORIGIN)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    let mut headers = HeaderMap::with_capacity(4);
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(CORS_MAX_AGE),
    );
    headers
}

/// Serialize `payload` as JSON with CORS headers.
///
/// `Cache-Control: public, max-age=N` is only added when `max_age_seconds > 0`.
pub fn render_json<T: Serialize>(
    payload: &T,
    status: StatusCode,
    request: &HeaderMap,
    max_age_seconds: u32,
) -> Response {
    let mut headers = cors_headers(request);

    let body = match serde_json::to_vec(payload) {
        Ok(body) => body,
        Err(e) => {
            error!("failed to serialize response: {}", e);
            return build(StatusCode::INTERNAL_SERVER_ERROR, headers, Body::empty());
        }
    };

    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    if max_age_seconds > 0 {
        if let Ok(value) = HeaderValue::try_from(format!("public, max-age={max_age_seconds}")) {
            headers.insert(header::CACHE_CONTROL, value);
        }
    }

    build(status, headers, Body::from(body))
}

/// `500` with `{"error": ...}` and no caching.
pub fn render_error(err: &UpstreamError, request: &HeaderMap) -> Response {
    let body = ErrorBody {
        error: err.to_string(),
    };
    render_json(&body, StatusCode::INTERNAL_SERVER_ERROR, request, NO_CACHE)
}

/// Empty `204` answering a CORS preflight.
pub fn preflight_response(request: &HeaderMap) -> Response {
    build(StatusCode::NO_CONTENT, cors_headers(request), Body::empty())
}

fn build(status: StatusCode, headers: HeaderMap, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
