//! HTTP API handlers.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::UpstreamError;
use crate::github::GitHubClient;
use crate::utils::{current_utc_year, resolve_year};

use super::response::{render_error, render_json, CONTRIBUTIONS_MAX_AGE, NO_CACHE, YEARS_MAX_AGE};

/// Application state shared with handlers.
///
/// Immutable after construction; every request gets its own clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upstream client.
    pub github: GitHubClient,
}

impl AppState {
    /// Create new app state.
    pub fn new(github: GitHubClient) -> Self {
        Self { github }
    }

    /// Build the upstream client from config.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Ok(Self::new(GitHubClient::new(config)?))
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always true.
    pub ok: bool,
}

/// Body for unknown paths.
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    /// Always "Not Found".
    pub message: &'static str,
}

/// Query string of `/api/contributions`.
#[derive(Debug, Deserialize)]
pub struct ContributionsQuery {
    /// Kept as text so a malformed value falls back instead of rejecting.
    pub year: Option<String>,
}

/// Health check handler - always returns 200.
pub async fn health(headers: HeaderMap) -> Response {
    render_json(&HealthResponse { ok: true }, StatusCode::OK, &headers, NO_CACHE)
}

/// Contributions for one calendar year, keyed by date.
pub async fn contributions(
    State(state): State<AppState>,
    query: Option<Query<ContributionsQuery>>,
    headers: HeaderMap,
) -> Response {
    let raw_year = query.as_ref().and_then(|Query(q)| q.year.as_deref());
    let year = resolve_year(raw_year, current_utc_year());
    debug!(requested = ?raw_year, year, "Serving contributions");

    match state.github.fetch_contributions_for_year(year).await {
        Ok(by_date) => render_json(&by_date, StatusCode::OK, &headers, CONTRIBUTIONS_MAX_AGE),
        Err(e) => {
            warn!(year, error = %e, "Failed to fetch contributions");
            render_error(&e, &headers)
        }
    }
}

/// Years with recorded activity.
pub async fn years(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.github.fetch_contribution_years().await {
        Ok(summary) => render_json(&summary, StatusCode::OK, &headers, YEARS_MAX_AGE),
        Err(e) => {
            warn!(error = %e, "Failed to fetch contribution years");
            render_error(&e, &headers)
        }
    }
}

/// Fallback for every other path, whatever the method.
pub async fn not_found(headers: HeaderMap) -> Response {
    render_json(
        &NotFoundResponse {
            message: "Not Found",
        },
        StatusCode::NOT_FOUND,
        &headers,
        NO_CACHE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_from_config_keeps_username() {
        let state = AppState::from_config(&Config::for_user("octocat")).unwrap();
        assert_eq!(state.github.username(), "octocat");
        assert!(!state.github.has_credential());
    }

    #[tokio::test]
    async fn health_is_uncached_200() {
        let response = health(HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(axum::http::header::CACHE_CONTROL)
            .is_none());
    }
}
