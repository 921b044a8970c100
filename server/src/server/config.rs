//! Startup settings consumed by [`create_server`](super::create_server).

use folio_server::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Where to listen and which storage backend to wire in.
///
/// Without a pool the server keeps everything in process memory, which is
/// the mode the integration tests run in.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration listening on `bind_addr` with in-memory storage.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Switch the repositories over to the database behind `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
