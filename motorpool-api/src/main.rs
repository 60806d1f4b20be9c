//! # Motorpool API Server
//!
//! REST backend for users (with Cloudinary-hosted avatars) and vehicles.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p motorpool-api
//! ```

use motorpool_api::{
    app::{build_router, AppState},
    config::Config,
};
use motorpool_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, PoolConfig},
    },
    media::cloudinary::CloudinaryUploader,
    services::{UserService, VehicleService},
    store::postgres::{PgUserStore, PgVehicleStore},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "motorpool_api=debug,motorpool_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Motorpool API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    run_migrations(&pool).await?;

    let uploader = CloudinaryUploader::new(config.media.cloudinary.clone())?;
    let timeouts = config.service_timeouts();

    let users = UserService::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(uploader),
        timeouts,
    );
    let vehicles = VehicleService::new(Arc::new(PgVehicleStore::new(pool.clone())), timeouts);

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(users, vehicles, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
