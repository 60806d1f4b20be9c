//! Application state and router builder
//!
//! # Example
//!
//! ```no_run
//! use motorpool_api::{app::AppState, config::Config};
//! use motorpool_shared::db::pool::{create_pool, PoolConfig};
//! use motorpool_shared::media::cloudinary::CloudinaryUploader;
//! use motorpool_shared::services::{UserService, VehicleService};
//! use motorpool_shared::store::postgres::{PgUserStore, PgVehicleStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = create_pool(PoolConfig {
//!     url: config.database.url.clone(),
//!     ..Default::default()
//! })
//! .await?;
//! let uploader = CloudinaryUploader::new(config.media.cloudinary.clone())?;
//!
//! let users = UserService::new(
//!     Arc::new(PgUserStore::new(pool.clone())),
//!     Arc::new(uploader),
//!     config.service_timeouts(),
//! );
//! let vehicles = VehicleService::new(
//!     Arc::new(PgVehicleStore::new(pool)),
//!     config.service_timeouts(),
//! );
//!
//! let app = motorpool_api::app::build_router(AppState::new(users, vehicles, config));
//! # Ok(())
//! # }
//! ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use motorpool_shared::services::{UserService, VehicleService};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request by Axum's `State` extractor; every field is
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// User records and avatars
    pub users: UserService,

    /// Vehicle records
    pub vehicles: VehicleService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(users: UserService, vehicles: VehicleService, config: Config) -> Self {
        Self {
            users,
            vehicles,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// ├── /users
/// │   ├── POST   /                 (multipart: username, email, avatar)
/// │   ├── GET    /
/// │   ├── GET    /:id
/// │   ├── PUT    /:id              (multipart: username, email, [avatar])
/// │   └── DELETE /:id
/// └── /vehicles
///     ├── POST   /                 (json: kind, color, brand, owner)
///     ├── GET    /
///     ├── GET    /brand/:brand
///     ├── GET    /:id
///     ├── PUT    /:id              (json: kind, color, brand)
///     └── DELETE /:id
/// ```
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        );

    let vehicle_routes = Router::new()
        .route(
            "/",
            get(routes::vehicles::list_vehicles).post(routes::vehicles::create_vehicle),
        )
        .route(
            "/brand/:brand",
            get(routes::vehicles::get_vehicle_by_brand),
        )
        .route(
            "/:id",
            get(routes::vehicles::get_vehicle)
                .put(routes::vehicles::update_vehicle)
                .delete(routes::vehicles::delete_vehicle),
        );

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/users", user_routes)
        .nest("/vehicles", vehicle_routes)
        .layer(DefaultBodyLimit::max(state.config.api.max_upload_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
