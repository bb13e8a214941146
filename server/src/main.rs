use anyhow::{Context, Result};
use axum::Router;
use clients_http::{HttpEventsClient, HttpUsersClient};
use db_memory::MemStore;
use race_core::CoreBuilder;
use server::{AppState, build_router};
use std::{env, sync::Arc};
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, prelude::*};

fn init_tracing_bunyan() -> Result<()> {
    // LOGGING_LEVEL steers the filter; RUST_LOG wins if set
    let level = env::var("LOGGING_LEVEL").unwrap_or_else(|_| "info".into());
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Name identifies the service in log streams
    let formatting_layer = BunyanFormattingLayer::new(
        "race-service".into(),
        std::io::stdout, // single sink: JSON to stdout; no other outputs supported
    );

    // Build a Bunyan-only subscriber:
    // - JsonStorageLayer: propagates span fields to child events
    // - BunyanFormattingLayer: strict Bunyan JSON output
    // - ErrorLayer: enrich errors with span context
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .with(ErrorLayer::default());

    // Set as the single global subscriber (no fallback to fmt/console)
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    // Load .env first if present; ignore if missing (Docker sets envs)
    dotenvy::dotenv().ok();
    // map all log! calls in dependencies to tracing
    LogTracer::init()?;
    // Initialize Bunyan-only tracing before constructing anything else.
    init_tracing_bunyan()?;

    // wire the ports into the core
    let core = CoreBuilder::new()
        .set_store(Arc::new(MemStore::new()))
        .set_events(Arc::new(
            HttpEventsClient::from_env().context("events service configuration")?,
        ))
        .set_auth(Arc::new(
            HttpUsersClient::from_env().context("users service configuration")?,
        ))
        .build();
    let app_state = AppState {
        core: Arc::new(core),
    };
    let app: Router = build_router(app_state);

    let host = env::var("HOST_SERVER").unwrap_or_else(|_| "0.0.0.0".into());
    let port = env::var("HOST_PORT").unwrap_or_else(|_| "8080".into());
    let addr = format!("{host}:{port}");
    info!(%addr, "listening on http server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
