//! Database models for Motorpool
//!
//! This module contains the persisted records and their PostgreSQL CRUD
//! operations. Services reach them through the ports in [`crate::store`].
//!
//! # Models
//!
//! - `user`: Users with a hosted avatar and an opaque token
//! - `vehicle`: Vehicles with an unvalidated owner reference

pub mod user;
pub mod vehicle;
