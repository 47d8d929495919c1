//! Small helpers shared by the server and the CLI.

use time::OffsetDateTime;
use tracing::info;

/// Years accepted from the `year` query parameter.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Current calendar year in UTC.
pub fn current_utc_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

/// Parse a `year` query value, falling back to `fallback` when it is absent,
/// not an integer, or outside [`YEAR_RANGE`].
pub fn resolve_year(raw: Option<&str>, fallback: i32) -> i32 {
    raw.and_then(|s| s.trim().parse::<i32>().ok())
        .filter(|y| YEAR_RANGE.contains(y))
        .unwrap_or(fallback)
}

/// Resolves on SIGINT (Ctrl-C) or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("Shutdown signal received, draining in-flight requests");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_year_uses_valid_param() {
        assert_eq!(resolve_year(Some("2021"), 2030), 2021);
        assert_eq!(resolve_year(Some(" 2019 "), 2030), 2019);
    }

    #[test]
    fn resolve_year_falls_back_when_missing_or_malformed() {
        assert_eq!(resolve_year(None, 2030), 2030);
        assert_eq!(resolve_year(Some(""), 2030), 2030);
        assert_eq!(resolve_year(Some("twenty"), 2030), 2030);
        assert_eq!(resolve_year(Some("2021.5"), 2030), 2030);
    }

    #[test]
    fn resolve_year_falls_back_when_out_of_range() {
        assert_eq!(resolve_year(Some("0"), 2030), 2030);
        assert_eq!(resolve_year(Some("-44"), 2030), 2030);
        assert_eq!(resolve_year(Some("10000"), 2030), 2030);
    }

    #[test]
    fn current_year_is_plausible() {
        assert!(current_utc_year() >= 2024);
    }
}
