//! End-to-end tests: the full router against a mocked GitHub GraphQL endpoint.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use contrib_proxy::api::{create_router, AppState};
use contrib_proxy::config::Config;
use contrib_proxy::utils::current_utc_year;

const TOKEN: &str = "ghp_integration";

fn app_for(server: &MockServer, token: Option<&str>) -> Router {
    let mut config = Config::for_user("octocat");
    config.github_graphql_url = server.url("/graphql");
    config.github_token = token.map(str::to_string);
    create_router(AppState::from_config(&config).expect("client builds"))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "https://blog.example.com")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn calendar(days: &[(&str, u32)]) -> Value {
    let days: Vec<Value> = days
        .iter()
        .map(|(date, count)| {
            json!({ "date": date, "contributionCount": count, "color": "#ebedf0" })
        })
        .collect();
    json!({
        "data": { "user": { "contributionsCollection": { "contributionCalendar": {
            "totalContributions": 0,
            "weeks": [ { "contributionDays": days } ]
        } } } }
    })
}

fn years_body(years: &[i32]) -> Value {
    json!({
        "data": { "user": { "contributionsCollection": { "contributionYears": years } } }
    })
}

#[tokio::test]
async fn contributions_expand_counts_and_drop_empty_days() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("authorization", format!("Bearer {TOKEN}"))
                .json_body_partial(
                    r#"{"variables":{"from":"2022-01-01T00:00:00Z","to":"2022-12-31T23:59:59Z"}}"#,
                );
            then.status(200)
                .json_body(calendar(&[("2022-06-01", 2), ("2022-06-02", 0), ("2022-06-03", 1)]));
        })
        .await;

    let response = get(app_for(&server, Some(TOKEN)), "/api/contributions?year=2022").await;

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=3600");
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://blog.example.com"
    );
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json; charset=utf-8"
    );
    assert_eq!(
        body_json(response).await,
        json!({
            "2022-06-01": ["contribution", "contribution"],
            "2022-06-03": ["contribution"]
        })
    );
}

#[tokio::test]
async fn malformed_year_falls_back_to_current_year() {
    let year = current_utc_year();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/graphql")
                .json_body_partial(format!(
                    r#"{{"variables":{{"from":"{year}-01-01T00:00:00Z"}}}}"#
                ));
            then.status(200).json_body(calendar(&[]));
        })
        .await;

    let response = get(app_for(&server, Some(TOKEN)), "/api/contributions?year=abc").await;

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn upstream_http_failure_is_uncached_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(502).body("bad gateway");
        })
        .await;

    let response = get(app_for(&server, Some(TOKEN)), "/api/contributions?year=2022").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    assert_eq!(
        body_json(response).await,
        json!({ "error": "GitHub API error: 502 bad gateway" })
    );
}

#[tokio::test]
async fn graphql_errors_on_years_are_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200)
                .json_body(json!({ "errors": [{ "message": "Something went wrong" }] }));
        })
        .await;

    let response = get(app_for(&server, Some(TOKEN)), "/api/years").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("GitHub API errors: "));
    assert!(message.contains("Something went wrong"));
}

#[tokio::test]
async fn years_are_sorted_and_cached_for_six_hours() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(years_body(&[2019, 2017, 2022]));
        })
        .await;

    let response = get(app_for(&server, Some(TOKEN)), "/api/years").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=21600");
    assert_eq!(
        body_json(response).await,
        json!({ "startYear": 2017, "endYear": 2022, "years": [2017, 2019, 2022] })
    );
}

#[tokio::test]
async fn empty_years_default_to_current_year() {
    let year = current_utc_year();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(years_body(&[]));
        })
        .await;

    let response = get(app_for(&server, Some(TOKEN)), "/api/years").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "startYear": year, "endYear": year, "years": [year] })
    );
}

#[tokio::test]
async fn missing_token_never_reaches_upstream() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(years_body(&[2020]));
        })
        .await;

    for uri in ["/api/contributions", "/api/years"] {
        let response = get(app_for(&server, None), uri).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing GITHUB_TOKEN secret" })
        );
    }

    assert_eq!(mock.hits_async().await, 0);
}
