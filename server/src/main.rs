//! Server entry-point: wires REST endpoints, storage, and OpenAPI docs.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use folio_server::config::AppConfig;
use ortho_config::OrthoConfig;
use folio_server::inbound::http::health::HealthState;
use folio_server::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let app_config = AppConfig::load().map_err(std::io::Error::other)?;
    let bind_addr = app_config.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    match app_config.database_url.as_deref() {
        Some(database_url) => {
            apply_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
            info!("using PostgreSQL storage");
        }
        None => {
            warn!("FOLIO_DATABASE_URL not set; falling back to in-memory storage");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    server::create_server(health_state, config)?.await
}
