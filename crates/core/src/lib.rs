//! Core business logic for quotes-rs.

pub mod services;

pub use services::*;
