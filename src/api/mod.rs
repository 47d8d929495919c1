//! HTTP API: routing, handlers, CORS and cache headers.

pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;

pub use handlers::AppState;
pub use response::{cors_headers, render_json};
pub use routes::create_router;
pub use server::serve;
