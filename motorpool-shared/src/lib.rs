//! # Motorpool Shared Library
//!
//! Records, persistence, media upload and the record access services used
//! by the Motorpool API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `media`: Media uploader port (Cloudinary, mock)
//! - `models`: Persisted records and their PostgreSQL queries
//! - `sanitize`: Brand parameter sanitization
//! - `services`: User and vehicle record access
//! - `store`: Store ports and their PostgreSQL / in-memory adapters
//! - `token`: User token generation

pub mod db;
pub mod media;
pub mod models;
pub mod sanitize;
pub mod services;
pub mod store;
pub mod token;

/// Current version of the Motorpool shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
