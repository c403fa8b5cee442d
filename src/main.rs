//! Cache Layer - named caches over a shared key-value store
//!
//! Starts the cache manager and serves the cache admin API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_layer::api::{create_router, AppState};
use cache_layer::{
    spawn_cleanup_task, CacheManager, CacheRegistry, Config, InMemoryStore, KeyValueStore,
    RedisStore,
};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to the store (Redis, or in-memory with a sweeper task)
/// 4. Build the cache manager; an unreachable store aborts startup
/// 5. Serve the admin API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_layer=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache layer");

    let config = Config::from_env().context("invalid cache configuration")?;
    info!(
        "Configuration loaded: customer_ttl={:?}, customer_all_ttl={:?}, port={}, redis={}",
        config.ttl.customer_ttl,
        config.ttl.customer_all_ttl,
        config.server_port,
        config.redis_url.is_some()
    );

    let (store, cleanup_handle) = connect_store(&config).await?;

    let registry =
        CacheRegistry::from_ttl_config(&config.ttl).context("invalid cache registry")?;
    let manager = CacheManager::initialize(store, registry)
        .await
        .context("cache store is not usable")?;
    info!("Cache manager initialized");

    let app = create_router(AppState::new(manager));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Opens the configured store. The in-memory store also gets a sweeper task.
async fn connect_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn KeyValueStore>, Option<JoinHandle<()>>)> {
    match &config.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url)
                .await
                .context("failed to connect to redis")?;
            let store: Arc<dyn KeyValueStore> = Arc::new(store);
            Ok((store, None))
        }
        None => {
            warn!("REDIS_URL not set, caching in process memory");
            let memory = Arc::new(InMemoryStore::new());
            let handle = spawn_cleanup_task(memory.clone(), config.cleanup_interval);
            let store: Arc<dyn KeyValueStore> = memory;
            Ok((store, Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
