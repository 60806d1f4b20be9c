//! User token generation
//!
//! Every user receives an opaque secret at creation time. Tokens are 64
//! base62 characters (A-Z, a-z, 0-9), giving roughly 2^381 possibilities.
//!
//! # Example
//!
//! ```
//! use motorpool_shared::token::{generate_user_token, USER_TOKEN_LENGTH};
//!
//! let token = generate_user_token();
//! assert_eq!(token.len(), USER_TOKEN_LENGTH);
//! ```

use rand::Rng;

/// Length of a user token (characters)
pub const USER_TOKEN_LENGTH: usize = 64;

/// Generates a new user token
///
/// Uses `rand::thread_rng()`, a cryptographically secure generator.
pub fn generate_user_token() -> String {
    generate_random_string(USER_TOKEN_LENGTH)
}

fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
