//! Promocast Server Library
//!
//! This library exports the core modules used by the server binary
//! and by the integration tests.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types for convenience
pub use config::AppSettings;
pub use error::AppError;
