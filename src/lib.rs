//! REST proxy over the GitHub GraphQL contributions API.
//!
//! Exposes three endpoints that reshape the contribution calendar into the
//! structure a heatmap widget expects: one entry per active day, padded to the
//! day's contribution count with a placeholder token.
//!
//! ```text
//! GET /api/contributions?year=2024
//! {
//!   "2024-03-01": ["contribution", "contribution"],
//!   "2024-03-04": ["contribution"]
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`github`]: GraphQL client, queries and response reshaping
//! - [`api`]: HTTP routing, handlers, CORS and cache headers
//! - [`utils`]: Year resolution and shutdown handling

pub mod api;
pub mod config;
pub mod error;
pub mod github;
pub mod utils;

pub use config::Config;
pub use error::{ProxyError, Result, UpstreamError};
