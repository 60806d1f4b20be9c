//! Configuration management for the API server
//!
//! Configuration is read from environment variables, with a `.env` file
//! loaded first when present.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to (default: 8080)
//! - `API_PRODUCTION`: Enables HSTS when `true` (default: false)
//! - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `STORE_TIMEOUT_SECONDS`: Per-call store deadline (default: 10)
//! - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET`: (required)
//! - `CLOUDINARY_FOLDER`: Folder for uploaded avatars (optional)
//! - `CLOUDINARY_API_BASE`: API origin (default: https://api.cloudinary.com)
//! - `UPLOAD_TIMEOUT_SECONDS`: Per-upload deadline (default: 30)
//! - `MAX_UPLOAD_BYTES`: Request body limit (default: 10485760)
//! - `RUST_LOG`: Log filter (default: motorpool_api=debug,motorpool_shared=debug,tower_http=debug)
//!
//! # Example
//!
//! ```no_run
//! use motorpool_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use motorpool_shared::media::cloudinary::{CloudinaryConfig, DEFAULT_API_BASE};
use motorpool_shared::services::ServiceTimeouts;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Media host configuration
    pub media: MediaConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins, `*` for any
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,

    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Deadline for a single store call
    pub store_timeout: Duration,
}

/// Media host configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Cloudinary account settings
    pub cloudinary: CloudinaryConfig,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = parse_var("API_PORT", 8080u16)?;
        let production = parse_var("API_PRODUCTION", false)?;
        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );
        let max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize)?;

        let database_url = required_var("DATABASE_URL")?;
        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 10u32)?;
        let store_timeout = Duration::from_secs(parse_var("STORE_TIMEOUT_SECONDS", 10u64)?);

        let upload_timeout = Duration::from_secs(parse_var("UPLOAD_TIMEOUT_SECONDS", 30u64)?);
        let cloudinary = CloudinaryConfig {
            cloud_name: required_var("CLOUDINARY_CLOUD_NAME")?,
            api_key: required_var("CLOUDINARY_API_KEY")?,
            api_secret: required_var("CLOUDINARY_API_SECRET")?,
            folder: env::var("CLOUDINARY_FOLDER")
                .ok()
                .filter(|folder| !folder.trim().is_empty()),
            api_base: env::var("CLOUDINARY_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            timeout: upload_timeout,
        };

        if store_timeout.is_zero() || upload_timeout.is_zero() {
            anyhow::bail!("STORE_TIMEOUT_SECONDS and UPLOAD_TIMEOUT_SECONDS must be positive");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
                production,
                max_upload_bytes,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                store_timeout,
            },
            media: MediaConfig { cloudinary },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Deadlines handed to the services
    pub fn service_timeouts(&self) -> ServiceTimeouts {
        ServiceTimeouts {
            store: self.database.store_timeout,
            upload: self.media.cloudinary.timeout,
        }
    }
}

fn required_var(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable is required", name))
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}
