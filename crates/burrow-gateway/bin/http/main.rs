mod cli;

use crate::cli::CLI;
use anyhow::Context;
use burrow_core::{EventSink, GeoLocator, ShortcodeStore, SystemClock, UnknownLocator};
use burrow_gateway::geo::MaxMindLocator;
use burrow_gateway::{App, AppState};
use burrow_generator::RandomGenerator;
use burrow_store::{InMemoryStore, StoreSettings, Sweeper};
use burrow_telemetry::{FanoutSink, RemoteSink, RemoteSinkConfig, TracingSink};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const LOG_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    burrow_telemetry::init_tracing(config.log_format.into())?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        log_format = %config.log_format,
        "starting gateway"
    );

    let mut events = FanoutSink::default();
    events.push(Arc::new(TracingSink));
    let remote_worker = config.log_sink_url.as_ref().map(|endpoint| {
        let (sink, worker) = RemoteSink::spawn(
            RemoteSinkConfig::builder()
                .endpoint(endpoint.clone())
                .token(config.log_sink_token.clone())
                .build(),
        );
        events.push(Arc::new(sink));
        info!(%endpoint, "remote log sink enabled");
        worker
    });
    let events: Arc<dyn EventSink> = Arc::new(events);

    let geo: Arc<dyn GeoLocator> = match &config.geoip_db {
        Some(path) => Arc::new(
            MaxMindLocator::open(path)
                .with_context(|| format!("failed to open GeoIP database {}", path.display()))?,
        ),
        None => Arc::new(UnknownLocator),
    };
    info!(provider = geo.name(), "geolocation ready");

    let store: Arc<dyn ShortcodeStore> = Arc::new(
        InMemoryStore::new(RandomGenerator::new(), SystemClock, events.clone()).with_settings(
            StoreSettings::builder()
                .default_validity(config.default_validity_minutes)
                .build(),
        ),
    );

    let sweeper = config
        .sweep_interval_secs
        .map(|secs| Sweeper::spawn(store.clone(), Duration::from_secs(secs.get())));

    let state = AppState::new(store, geo, events, config.public_base_url);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "starting gateway server");

    axum::serve(
        listener,
        App::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
    }
    if let Some(worker) = remote_worker {
        // every sink handle is gone by now, so the worker exits once drained
        if tokio::time::timeout(LOG_FLUSH_TIMEOUT, worker).await.is_err() {
            warn!("gave up flushing remote log events");
        }
    }
    info!("gateway stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
