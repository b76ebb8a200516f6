//! Savings tracker entry-point: loads settings, wires storage and runs the
//! HTTP server.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use savings_tracker::inbound::http::health::HealthState;
use savings_tracker::inbound::http::session_config::fingerprint::key_fingerprint;
use savings_tracker::inbound::http::session_config::{BuildMode, session_settings_from_env};
use savings_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use savings_tracker::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(pool) = connect_database(&settings).await? {
        config = config.with_db_pool(pool);
    }

    info!(addr = %config.bind_addr(), "starting savings tracker");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

/// Open the connection pool and apply migrations when a database is configured.
async fn connect_database(settings: &AppSettings) -> io::Result<Option<DbPool>> {
    let Some(url) = settings.database_url() else {
        return Ok(None);
    };

    if settings.run_migrations {
        let applied = run_pending_migrations(url)
            .await
            .map_err(|e| io::Error::other(format!("database migrations failed: {e}")))?;
        info!(applied, "database migrations complete");
    }

    let max_size = settings.db_max_connections().map_err(io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_size))
        .await
        .map_err(|e| io::Error::other(format!("database pool unavailable: {e}")))?;
    Ok(Some(pool))
}
