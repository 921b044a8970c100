//! Embedded schema migrations applied at startup.
//!
//! Bundles the SQL from the crate's `migrations/` directory into the binary
//! and applies anything pending before the server accepts traffic.
//! `diesel_migrations` drives a synchronous connection, so the work runs on
//! the blocking thread pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::pool::PoolError;

/// Migrations embedded from the crate's migrations directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply any pending migrations against the given database.
///
/// # Errors
///
/// Returns [`PoolError::Build`] when the connection cannot be established or
/// a migration fails, since either leaves the database unusable for the
/// server.
pub async fn apply_migrations(database_url: &str) -> Result<(), PoolError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut connection = PgConnection::establish(&database_url)
            .map_err(|error| PoolError::build(error.to_string()))?;
        let applied = connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|error| PoolError::build(error.to_string()))?;
        for version in applied {
            info!(migration = %version, "applied migration");
        }
        Ok(())
    })
    .await
    .map_err(|error| PoolError::build(error.to_string()))?
}
