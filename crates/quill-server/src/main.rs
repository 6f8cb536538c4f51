mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use quill_api::{AppState, AppStateInner};
use quill_auth::session::SessionStore;
use quill_store::{JsonStore, bootstrap};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "quill_server=debug,quill_api=debug,quill_store=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    // Init storage and seed the bootstrap records on first run
    let store = JsonStore::open(&config.data_dir).await?;
    bootstrap::seed_defaults(&store).await?;

    let sessions = match config.session_ttl {
        Some(ttl) => {
            info!("Sessions expire after {}s", ttl.num_seconds());
            SessionStore::with_ttl(ttl)
        }
        None => SessionStore::new(),
    };

    let state: AppState = Arc::new(AppStateInner { store, sessions });

    // Static pages + asset mount
    let static_routes = Router::new()
        .route_service("/", ServeFile::new(config.static_dir.join("index.html")))
        .route_service(
            "/dashboard",
            ServeFile::new(config.static_dir.join("dashboard.html")),
        )
        .nest_service("/static", ServeDir::new(&config.static_dir));

    let app = quill_api::router(state)
        .merge(static_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Quill server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
