//! HTTP API route definitions.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{contributions, health, not_found, years, AppState};
use super::response::preflight_response;

/// Create the API router.
///
/// Dispatch is by path only; `OPTIONS` on any path is answered as a CORS
/// preflight before routing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", any(health))
        .route("/api/contributions", any(contributions))
        .route("/api/years", any(years))
        .fallback(not_found)
        .layer(middleware::from_fn(preflight))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return preflight_response(request.headers());
    }
    next.run(request).await
}
