//! API route handlers
//!
//! - `health`: Health check endpoint
//! - `users`: User CRUD (multipart bodies, avatar upload)
//! - `vehicles`: Vehicle CRUD and brand lookup (JSON bodies)

pub mod health;
pub mod users;
pub mod vehicles;

use serde::{Deserialize, Serialize};

/// Acknowledgement body for write operations
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
