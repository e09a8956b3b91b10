//! Receipt upload backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// S3-backed receipt photo storage
pub mod media_storage;

/// HTTP routes
pub mod routes;

/// Server setup and lifecycle
pub mod server;

/// Configuration and universal error handling
pub mod types;
