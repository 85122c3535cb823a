use std::net::SocketAddr;
use skyhigh_api::{app, AppState};
use skyhigh_store::app_config::Config;
use skyhigh_store::spawn_idle_sweeper;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyhigh_api=debug,skyhigh_offer=debug,skyhigh_store=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        "Starting SkyHigh API on port {} (search delay {}ms)",
        config.server.port,
        config.search.delay_ms
    );

    let app_state = AppState::from_config(&config.search);

    let sweeper = spawn_idle_sweeper(
        app_state.sessions.clone(),
        config.session.idle_timeout(),
        config.session.sweep_interval(),
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
