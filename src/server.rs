//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, migrations, cache and pinger setup, and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::domain::repositories::EntryRepository;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::{MemoryEntryRepository, PgEntryRepository};
use crate::infrastructure::ping::{HttpPinger, NullPinger, Pinger};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the entry store: in-memory for `memory://`, PostgreSQL otherwise.
///
/// PostgreSQL migrations are applied before the pool is handed out.
async fn open_repository(config: &Config) -> Result<Arc<dyn EntryRepository>> {
    if config.is_memory_store() {
        tracing::warn!("Using in-memory entry store; entries are lost on restart");
        return Ok(Arc::new(MemoryEntryRepository::new()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok(Arc::new(PgEntryRepository::new(Arc::new(pool))))
}

/// Redis when configured and reachable, then the process-local cache if
/// enabled, then no cache at all.
async fn open_cache(config: &Config) -> Arc<dyn CacheService> {
    if !config.is_cache_enabled() {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    }

    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Falling back.", e);
            }
        }
    }

    if config.memory_cache {
        tracing::info!("Cache enabled (in-memory)");
        Arc::new(MemoryCache::with_capacity(
            config.cache_ttl_seconds,
            config.memory_cache_capacity,
        ))
    } else {
        tracing::warn!("Cache unavailable (NullCache)");
        Arc::new(NullCache::new())
    }
}

fn build_pinger(config: &Config) -> Result<Arc<dyn Pinger>> {
    if !config.blog.ping.enabled {
        tracing::info!("Update pings disabled");
        return Ok(Arc::new(NullPinger::new()));
    }

    let pinger = HttpPinger::new(Duration::from_secs(config.blog.ping.timeout_secs))
        .context("Failed to build ping client")?;
    tracing::info!("Update pings enabled");
    Ok(Arc::new(pinger))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The ping client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = open_repository(&config).await?;
    let cache = open_cache(&config).await;
    let pinger = build_pinger(&config)?;

    let state = AppState::new(
        config.blog.clone(),
        config.session_secret.clone(),
        repository,
        cache,
        pinger,
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
