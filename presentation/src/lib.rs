//! Presentation layer for docqa-relay
//!
//! This crate contains the HTTP surface (axum router, handlers, error
//! mapping) and the CLI definitions.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use http::{AppState, router, serve};
