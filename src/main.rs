// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitTrack API Server
//!
//! Serves the tracking core to the dashboard front end over a local JSON API.

use fittrack::{
    config::Config,
    db::FileStore,
    services::{StorageAdapter, Tracker, UuidGenerator},
    time_utils::SystemClock,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting FitTrack API");

    // Open the snapshot store and restore state
    let store = FileStore::open(&config.data_dir, config.max_value_bytes)?;
    let data_dir = store.dir().display().to_string();
    let tracker = Tracker::load(
        StorageAdapter::new(Box::new(store)),
        Box::new(SystemClock),
        Box::new(UuidGenerator),
    );
    tracing::info!(
        activities = tracker.all_activities().len(),
        data_dir = %data_dir,
        "Tracker state restored"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), tracker));

    // Build router
    let app = fittrack::routes::create_router(state);

    // Start server
    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fittrack=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
