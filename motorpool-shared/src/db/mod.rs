//! Database layer for Motorpool
//!
//! - `pool`: PostgreSQL connection pool with health check
//! - `migrations`: Embedded schema migrations
//!
//! Models are in the `models` module at crate root level.

pub mod migrations;
pub mod pool;
