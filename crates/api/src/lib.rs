//! HTTP API layer for quotes-rs.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: the `/quotes` route tree
//! - **Response**: the JSON success envelope
//! - **State**: the service graph handlers run against
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
