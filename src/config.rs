//! Application configuration loaded from environment variables.

use std::net::SocketAddr;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === GitHub ===
    /// Login whose contribution calendar is served.
    pub github_username: String,

    /// Personal access token sent as a bearer credential.
    #[serde(default)]
    pub github_token: Option<String>,

    /// GraphQL endpoint.
    #[serde(default = "default_graphql_url")]
    pub github_graphql_url: String,

    // === Server Configuration ===
    /// Interface to bind the HTTP server on.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Build a config for `username` with every other field defaulted.
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            github_username: username.into(),
            github_token: None,
            github_graphql_url: default_graphql_url(),
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            log_json: false,
        }
    }

    /// Check if the configuration is valid.
    ///
    /// A missing token is not an error: the health endpoint works without it
    /// and the upstream-backed endpoints report it per request.
    pub fn validate(&self) -> Result<(), String> {
        if self.github_username.trim().is_empty() {
            return Err("GITHUB_USERNAME is required".to_string());
        }

        if !(self.github_graphql_url.starts_with("https://")
            || self.github_graphql_url.starts_with("http://"))
        {
            return Err("GITHUB_GRAPHQL_URL must be an http(s) URL".to_string());
        }

        self.bind_addr()?;

        Ok(())
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("invalid bind address {}:{}: {}", self.host, self.port, e))
    }

    /// The token, if one is configured and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        match self.token() {
            Some(token) if token.len() > 4 => match token.get(token.len() - 4..) {
                Some(tail) => format!("****{}", tail),
                None => "****".to_string(),
            },
            Some(_) => "****".to_string(),
            None => "<not set>".to_string(),
        }
    }
}
