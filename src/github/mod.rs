//! GitHub contributions: GraphQL queries, client and response reshaping.
//!
//! This module handles:
//! - The two fixed GraphQL documents and their variables
//! - The GraphQL client bound to one login and token
//! - Reshaping the calendar into a date-to-placeholder map
//! - Summarising the contribution years

pub mod client;
pub mod queries;
pub mod types;

pub use client::GitHubClient;
pub use types::{ContributionsByDate, YearSummary, PLACEHOLDER_TOKEN};
