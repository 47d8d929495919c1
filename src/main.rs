//! Contribution proxy entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contrib_proxy::api::serve;
use contrib_proxy::config::Config;
use contrib_proxy::error::ProxyError;
use contrib_proxy::github::GitHubClient;
use contrib_proxy::utils::{current_utc_year, resolve_year};

/// REST proxy over the GitHub contributions GraphQL API.
#[derive(Parser, Debug)]
#[command(name = "contrib-proxy")]
#[command(about = "Serves GitHub contributions in a heatmap-friendly shape")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Fetch one year of contributions and print the JSON.
    Contributions {
        /// Calendar year; defaults to the current UTC year.
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Fetch the contribution years summary and print the JSON.
    Years,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load().map_err(ProxyError::from)?;

    init_logging(&config, args.verbose);

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Contributions { year }) => cmd_contributions(&config, year.as_deref()).await,
        Some(Command::Years) => cmd_years(&config).await,
        None => cmd_serve(config, args.port).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("contrib_proxy=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    if config.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

/// Run the HTTP server until SIGINT/SIGTERM.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port_override {
        config.port = port;
    }

    serve(&config).await.map_err(|e| {
        error!("Server failed: {}", e);
        e
    })?;
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CONTRIB PROXY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  GitHub Username: {}", config.github_username);
    println!("  GitHub Token: {}", config.masked_token());
    println!("  GraphQL URL: {}", config.github_graphql_url);
    println!("  Listen: {}:{}", config.host, config.port);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    if config.token().is_none() {
        println!("  WARNING: GITHUB_TOKEN is not set; upstream endpoints will fail!");
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Fetch one year of contributions and print it.
async fn cmd_contributions(config: &Config, year: Option<&str>) -> anyhow::Result<()> {
    config.validate().map_err(anyhow::Error::msg)?;
    let client = GitHubClient::new(config)?;
    let year = resolve_year(year, current_utc_year());

    let by_date = client.fetch_contributions_for_year(year).await?;
    info!(
        year,
        active_days = by_date.len(),
        total = by_date.total(),
        "Fetched contributions"
    );

    println!("{}", serde_json::to_string_pretty(&by_date)?);
    Ok(())
}

/// Fetch the contribution years summary and print it.
async fn cmd_years(config: &Config) -> anyhow::Result<()> {
    config.validate().map_err(anyhow::Error::msg)?;
    let client = GitHubClient::new(config)?;

    let summary = client.fetch_contribution_years().await?;
    info!(
        start = summary.start_year,
        end = summary.end_year,
        "Fetched contribution years"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
