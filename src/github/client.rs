//! GitHub GraphQL API client.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::UpstreamError;
use crate::utils::current_utc_year;

use super::queries::{
    CalendarVariables, YearsVariables, CONTRIBUTION_CALENDAR_QUERY, CONTRIBUTION_YEARS_QUERY,
};
use super::types::{
    CalendarData, ContributionsByDate, GraphQlRequest, GraphQlResponse, YearSummary, YearsData,
};

/// Product token sent as `User-Agent`; GitHub rejects anonymous agents.
pub const USER_AGENT: &str = concat!("contrib-proxy/", env!("CARGO_PKG_VERSION"));

/// GitHub GraphQL client bound to one login and one credential.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// GraphQL endpoint.
    graphql_url: String,
    /// Login whose contributions are queried.
    username: String,
    /// Bearer token, if configured.
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client from config.
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            // Keep connections alive for reuse
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            graphql_url: config.github_graphql_url.clone(),
            username: config.github_username.clone(),
            token: config.token().map(str::to_owned),
        })
    }

    /// Login whose contributions are queried.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// GraphQL endpoint.
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// Whether a token is configured.
    pub fn has_credential(&self) -> bool {
        self.token.is_some()
    }

    /// Contribution calendar for the UTC calendar year, reshaped by date.
    #[instrument(skip(self), fields(login = %self.username))]
    pub async fn fetch_contributions_for_year(
        &self,
        year: i32,
    ) -> Result<ContributionsByDate, UpstreamError> {
        let variables = CalendarVariables::for_year(&self.username, year)?;
        let data: Option<CalendarData> = self
            .post_query(CONTRIBUTION_CALENDAR_QUERY, &variables)
            .await?;

        let calendar = data.and_then(CalendarData::into_calendar).unwrap_or_default();
        let by_date = ContributionsByDate::from_weeks(&calendar.weeks);

        debug!(
            total = calendar.total_contributions,
            weeks = calendar.weeks.len(),
            active_days = by_date.len(),
            "Fetched contribution calendar"
        );

        Ok(by_date)
    }

    /// Years with recorded activity. Never empty: falls back to the current year.
    #[instrument(skip(self), fields(login = %self.username))]
    pub async fn fetch_contribution_years(&self) -> Result<YearSummary, UpstreamError> {
        let variables = YearsVariables {
            login: &self.username,
        };
        let data: Option<YearsData> = self
            .post_query(CONTRIBUTION_YEARS_QUERY, &variables)
            .await?;

        let years = data.map(YearsData::into_years).unwrap_or_default();
        if years.is_empty() {
            debug!("No contribution years reported, using current year");
        }

        Ok(YearSummary::from_years(years, current_utc_year()))
    }

    /// POST one GraphQL document and return its `data`.
    async fn post_query<V, T>(&self, query: &str, variables: &V) -> Result<Option<T>, UpstreamError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let token = self.token.as_deref().ok_or(UpstreamError::MissingCredential)?;

        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "GitHub GraphQL request failed");
            return Err(UpstreamError::Http { status, body });
        }

        let body: GraphQlResponse<serde_json::Value> = response.json().await?;

        if let Some(errors) = body.errors {
            warn!(errors = %errors, "GitHub GraphQL returned errors");
            return Err(UpstreamError::GraphQl(errors.to_string()));
        }

        Ok(body.data.map(serde_json::from_value::<T>).transpose()?)
    }
}
