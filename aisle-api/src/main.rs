use std::net::SocketAddr;

use aisle_api::{app, AppState};
use aisle_core::ReservationService;
use aisle_store::app_config::Config;
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aisle_api=debug,aisle_core=info,aisle_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    let catalog = config.flight_catalog().context("Invalid flight catalog")?;
    let layout = config.seat_layout().context("Invalid seat layout")?;
    tracing::info!(
        flights = catalog.flights().len(),
        backend = ?config.storage.backend,
        path = %config.storage.path.display(),
        "Starting Aisle API on port {}",
        config.server.port
    );

    let store = aisle_store::open_store(&config.storage, layout.clone());
    let reservations = ReservationService::new(catalog, layout, store);

    let mut app_state = AppState::new(reservations);
    app_state.allowed_origin = config.server.allowed_origin.clone();

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
