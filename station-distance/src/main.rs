use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use station_distance::catalog::{
    DiskStore, FileLastSync, KoleoClient, KoleoClientConfig, SeedFiles, TcpProbe,
};
use station_distance::config::AppConfig;
use station_distance::events::notice_channel;
use station_distance::sync::{SyncOrchestrator, SyncSources};
use station_distance::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let remote = KoleoClient::new(KoleoClientConfig::new().with_base_url(&config.api_url))
        .expect("Failed to create Koleo client");
    let store = DiskStore::open(&config.data_dir).await;
    let last_sync = FileLastSync::open(config.last_sync_path()).await;

    let sources = SyncSources {
        remote: Arc::new(remote),
        seed: Arc::new(SeedFiles::new(&config.seed_dir)),
        store: Arc::new(store),
        last_sync: Arc::new(last_sync),
        connectivity: Arc::new(TcpProbe::new(&config.probe_addr)),
    };

    let (notices, mut notice_rx) = notice_channel();
    tokio::spawn(async move {
        while let Ok(notice) = notice_rx.recv().await {
            warn!(?notice, "notice");
        }
    });

    let orchestrator = Arc::new(SyncOrchestrator::new(sources, notices));

    // Syncs once at startup, then once per refresh interval.
    let every = orchestrator.policy().interval();
    orchestrator.clone().spawn_periodic(every);

    let app = create_router(AppState::new(orchestrator));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.listen_addr, "station distance API listening");
    info!("  GET  /health         - Health check");
    info!("  GET  /api/prompts    - Ranked station prompts");
    info!("  GET  /api/distance   - Distance between two stations");
    info!("  GET  /api/status     - Catalog and sync state");
    info!("  POST /api/sync       - Sync the catalog now");

    axum::serve(listener, app).await.expect("Server error");
}
